use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("missing _id")]
    MissingIdentifier,

    #[error("no update field(s) sent for {id}")]
    NoUpdateFields { id: String },

    #[error("missing required fields: {}", fields.join(", "))]
    ValidationFailed { fields: Vec<&'static str> },

    #[error("invalid _id {id}")]
    InvalidIdentifier { id: String },

    #[error("no issue with _id {id}")]
    NotFound { id: String },

    #[error("cannot filter {field} by {value:?}")]
    InvalidFilter { field: String, value: String },

    #[error("storage unavailable: {reason}")]
    StorageUnavailable { id: Option<String>, reason: String },
}

impl IssueError {
    /// 호출자가 보낸 `_id`. 응답에 그대로 돌려준다.
    pub fn id(&self) -> Option<&str> {
        match self {
            IssueError::NoUpdateFields { id }
            | IssueError::InvalidIdentifier { id }
            | IssueError::NotFound { id } => Some(id),
            IssueError::StorageUnavailable { id, .. } => id.as_deref(),
            IssueError::MissingIdentifier
            | IssueError::ValidationFailed { .. }
            | IssueError::InvalidFilter { .. } => None,
        }
    }

    pub(crate) fn from_store(err: StoreError, id: Option<&str>) -> Self {
        let id = id.map(str::to_string);
        match (err, id) {
            (StoreError::Validation(fields), _) => IssueError::ValidationFailed { fields },
            (StoreError::NotFound, Some(id)) => IssueError::NotFound { id },
            (StoreError::InvalidIdentifier, Some(id)) => IssueError::InvalidIdentifier { id },
            (StoreError::Fault(reason), id) => IssueError::StorageUnavailable { id, reason },
            (other, None) => IssueError::StorageUnavailable {
                id: None,
                reason: other.to_string(),
            },
        }
    }
}
