pub mod memory;
pub mod predicate;
pub mod sea_orm_store;

use async_trait::async_trait;
use sea_orm::{DbErr, Set};
use thiserror::Error;

use crate::entity::issue::{ActiveModel as IssueActiveModel, Model as IssueModel};

pub use memory::MemoryIssueStore;
pub use predicate::{FieldPredicate, FilterValue, IssueFilter};
pub use sea_orm_store::SeaOrmIssueStore;

/// 저장소가 돌려주는 실패의 전부. 엔진 고유의 에러 타입은 이 경계를 넘지 않는다.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("missing required fields: {0:?}")]
    Validation(Vec<&'static str>),
    #[error("no issue with that identifier")]
    NotFound,
    #[error("identifier is not well-formed")]
    InvalidIdentifier,
    #[error("storage fault: {0}")]
    Fault(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            // 조회와 갱신 사이에 행이 사라진 경우
            DbErr::RecordNotUpdated => StoreError::NotFound,
            err => StoreError::Fault(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
}

impl NewIssue {
    /// 비어 있는 필수 필드 이름. 선언 순서를 따른다.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("issue_title", &self.issue_title),
            ("issue_text", &self.issue_text),
            ("created_by", &self.created_by),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(missing))
        }
    }
}

/// 기존 이슈에 덮어쓸 필드. `None` 이면 저장된 값을 그대로 둔다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssuePatch {
    pub fn apply_to(self, issue: &mut IssueModel) {
        if let Some(issue_title) = self.issue_title {
            issue.issue_title = issue_title;
        }
        if let Some(issue_text) = self.issue_text {
            issue.issue_text = issue_text;
        }
        if let Some(created_by) = self.created_by {
            issue.created_by = created_by;
        }
        if let Some(assigned_to) = self.assigned_to {
            issue.assigned_to = assigned_to;
        }
        if let Some(status_text) = self.status_text {
            issue.status_text = status_text;
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
    }

    /// 보낸 필드만 `Set` 으로 표시한다. 나머지 컬럼은 UPDATE 문에 들어가지 않는다.
    pub fn apply_to_active(self, issue: &mut IssueActiveModel) {
        if let Some(issue_title) = self.issue_title {
            issue.issue_title = Set(issue_title);
        }
        if let Some(issue_text) = self.issue_text {
            issue.issue_text = Set(issue_text);
        }
        if let Some(created_by) = self.created_by {
            issue.created_by = Set(created_by);
        }
        if let Some(assigned_to) = self.assigned_to {
            issue.assigned_to = Set(assigned_to);
        }
        if let Some(status_text) = self.status_text {
            issue.status_text = Set(status_text);
        }
        if let Some(open) = self.open {
            issue.open = Set(open);
        }
    }
}

/// 이슈 저장소 어댑터.
///
/// 구현체는 필요한 핸들(커넥션 풀, 락으로 감싼 목록)을 들고 있고
/// 요청 사이에 `Arc<dyn IssueStore>` 로 공유된다.
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn list(&self, project: &str, filter: &IssueFilter) -> Result<Vec<IssueModel>, StoreError>;

    async fn create(&self, project: &str, issue: NewIssue) -> Result<IssueModel, StoreError>;

    async fn update_by_id(&self, id: &str, patch: IssuePatch) -> Result<IssueModel, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

pub(crate) fn parse_id(id: &str) -> Result<uuid::Uuid, StoreError> {
    uuid::Uuid::parse_str(id.trim()).map_err(|_| StoreError::InvalidIdentifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_blank_required_field() {
        let issue = NewIssue {
            issue_text: "body".into(),
            created_by: "  ".into(),
            ..Default::default()
        };

        assert_eq!(issue.missing_fields(), vec!["issue_title", "created_by"]);
        assert_eq!(
            issue.validate(),
            Err(StoreError::Validation(vec!["issue_title", "created_by"]))
        );
    }

    #[test]
    fn row_vanishing_mid_update_is_not_found() {
        assert_eq!(StoreError::from(DbErr::RecordNotUpdated), StoreError::NotFound);
        assert!(matches!(
            StoreError::from(DbErr::Custom("pool timed out".into())),
            StoreError::Fault(_)
        ));
    }

    #[test]
    fn active_patch_marks_only_sent_columns() {
        use sea_orm::{ActiveValue, IntoActiveModel};

        let issue = IssueModel::new(
            "apitest",
            NewIssue {
                issue_title: "title".into(),
                issue_text: "text".into(),
                created_by: "Joe".into(),
                assigned_to: "Ann".into(),
                ..Default::default()
            },
        );
        let mut active = issue.into_active_model();

        IssuePatch {
            assigned_to: Some(String::new()),
            open: Some(false),
            ..Default::default()
        }
        .apply_to_active(&mut active);

        assert_eq!(active.assigned_to, ActiveValue::Set(String::new()));
        assert_eq!(active.open, ActiveValue::Set(false));
        assert_eq!(active.issue_title, ActiveValue::Unchanged("title".to_string()));
    }

    #[test]
    fn parse_id_rejects_malformed_identifiers() {
        assert_eq!(parse_id("5f1a"), Err(StoreError::InvalidIdentifier));
        assert_eq!(parse_id("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"), Err(StoreError::InvalidIdentifier));
        assert!(parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}
