pub mod api;
pub mod configuration;
pub mod db;
pub mod entity;
pub mod migration;
pub mod model;
pub mod service;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use actix_web::web::{self, scope};
use tracing::info;

use crate::configuration::Settings;
use crate::service::IssueService;
use crate::store::{IssueStore, MemoryIssueStore, SeaOrmIssueStore};

/// 설정에 맞는 저장소를 만들어 서비스에 주입한다.
pub async fn build_service(settings: &Settings) -> anyhow::Result<IssueService> {
    let store: Arc<dyn IssueStore> = if settings.uses_memory_store() {
        info!("메모리 저장소 사용 (재시작하면 데이터가 사라집니다)");
        Arc::new(MemoryIssueStore::new())
    } else {
        let db = db::init_db(settings).await?;
        Arc::new(SeaOrmIssueStore::new(db))
    };

    Ok(IssueService::new(store))
}

/// 라우트 등록. `IssueService` 는 호출하는 쪽에서 `app_data` 로 넣는다.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api::health_check)
        .service(
            scope("/api")
                .service(api::list_issues)
                .service(api::create_issue)
                .service(api::update_issue)
                .service(api::delete_issue),
        );
}
