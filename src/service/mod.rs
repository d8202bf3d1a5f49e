pub mod error;
pub mod filter;
pub mod validator;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::entity::issue::Model as IssueModel;
use crate::model::issue::{CreateIssueRequest, DeleteIssueRequest, UpdateIssueRequest};
use crate::store::IssueStore;

pub use error::IssueError;

/// 요청 단위 진입점. 필터 변환과 검증을 마친 뒤 저장소를 정확히 한 번 호출한다.
#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
}

impl IssueService {
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, query))]
    pub async fn list<I>(&self, project: &str, query: I) -> Result<Vec<IssueModel>, IssueError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let filter = filter::translate(query).inspect_err(|err| warn!("잘못된 필터: {}", err))?;

        self.store
            .list(project, &filter)
            .await
            .map_err(|err| IssueError::from_store(err, None))
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, project: &str, request: CreateIssueRequest) -> Result<IssueModel, IssueError> {
        let issue = self
            .store
            .create(project, request.into())
            .await
            .map_err(|err| IssueError::from_store(err, None))?;

        info!(id = %issue.id, "이슈 생성 완료");
        Ok(issue)
    }

    #[instrument(skip(self, request), fields(id = ?request.id))]
    pub async fn update(&self, request: UpdateIssueRequest) -> Result<IssueModel, IssueError> {
        let (id, patch) = validator::validate_update(request)?;

        let issue = self
            .store
            .update_by_id(&id, patch)
            .await
            .map_err(|err| IssueError::from_store(err, Some(&id)))?;

        info!("이슈 수정 완료");
        Ok(issue)
    }

    /// 삭제한 `_id` 를 돌려준다.
    #[instrument(skip(self, request), fields(id = ?request.id))]
    pub async fn delete(&self, request: DeleteIssueRequest) -> Result<String, IssueError> {
        let id = validator::validate_delete(request)?;

        self.store
            .delete_by_id(&id)
            .await
            .map_err(|err| IssueError::from_store(err, Some(&id)))?;

        info!("이슈 삭제 완료");
        Ok(id)
    }
}
