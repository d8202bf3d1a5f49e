use sea_orm::{Database, DatabaseConnection};
use tracing::{info, instrument};
use sea_orm::ConnectOptions;
use std::time::Duration;

use crate::configuration::Settings;
use crate::migration::{Migrator, MigratorTrait};

#[instrument(skip(settings))]
pub async fn init_db(settings: &Settings) -> anyhow::Result<DatabaseConnection> {
    info!("데이터베이스 연결 설정 중...");

    let mut options = ConnectOptions::new(settings.database_url.clone());
    options
        .max_connections(settings.db_max_connections)
        .min_connections(settings.db_max_connections.min(5))
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    info!("데이터베이스에 연결 시도 중...");
    let db = Database::connect(options).await?;
    info!("데이터베이스 연결 완료");

    info!("데이터베이스 마이그레이션 실행 중...");
    Migrator::up(&db, None).await?;
    info!("마이그레이션 완료");

    Ok(db)
}
