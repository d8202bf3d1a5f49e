use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use std::fmt;

use crate::service::IssueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    MissingId,
    NoUpdateFields,
    RequiredFieldsMissing,
    InvalidId,
    InvalidFilter,
    InvalidBody,

    // 404 NOT FOUND
    CouldNotUpdate,
    CouldNotDelete,

    // 500 SERVER ERRORS
    ServerError,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::MissingId => "missing _id",
            ErrorCode::NoUpdateFields => "no update field(s) sent",
            ErrorCode::RequiredFieldsMissing => "missing required fields",
            ErrorCode::InvalidId => "invalid _id",
            ErrorCode::InvalidFilter => "invalid filter",
            ErrorCode::InvalidBody => "invalid request body",

            ErrorCode::CouldNotUpdate => "could not update",
            ErrorCode::CouldNotDelete => "could not delete",

            ErrorCode::ServerError => "Server Error",
        }
    }

    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::MissingId |
            ErrorCode::NoUpdateFields |
            ErrorCode::RequiredFieldsMissing |
            ErrorCode::InvalidId |
            ErrorCode::InvalidFilter |
            ErrorCode::InvalidBody => StatusCode::BAD_REQUEST,

            ErrorCode::CouldNotUpdate |
            ErrorCode::CouldNotDelete => StatusCode::NOT_FOUND,

            ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// 오류가 난 작업. `NotFound` 문구만 작업에 따라 달라진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),
    #[error("{field}={value}: invalid filter")]
    FilterError { field: String, value: String },
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn with_id(code: ErrorCode, id: String) -> Self {
        AppError::ApiError(code, Some(id))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ApiError(code, _) => *code,
            AppError::FilterError { .. } => ErrorCode::InvalidFilter,
        }
    }

    pub fn from_issue_error(err: IssueError, operation: Operation) -> Self {
        match err {
            IssueError::MissingIdentifier => AppError::new(ErrorCode::MissingId),
            IssueError::NoUpdateFields { id } => AppError::with_id(ErrorCode::NoUpdateFields, id),
            IssueError::ValidationFailed { .. } => AppError::new(ErrorCode::RequiredFieldsMissing),
            IssueError::InvalidIdentifier { id } => AppError::with_id(ErrorCode::InvalidId, id),
            IssueError::NotFound { id } => match operation {
                Operation::Delete => AppError::with_id(ErrorCode::CouldNotDelete, id),
                _ => AppError::with_id(ErrorCode::CouldNotUpdate, id),
            },
            IssueError::InvalidFilter { field, value } => AppError::FilterError { field, value },
            IssueError::StorageUnavailable { id, reason } => {
                tracing::error!("저장소 오류 ({:?}): {}", operation, reason);
                AppError::ApiError(ErrorCode::ServerError, id)
            }
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.code().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let response = match self {
            AppError::ApiError(code, id) => ErrorResponse {
                error: code.message().to_string(),
                id: id.clone(),
                field: None,
                value: None,
            },
            AppError::FilterError { field, value } => ErrorResponse {
                error: ErrorCode::InvalidFilter.message().to_string(),
                id: None,
                field: Some(field.clone()),
                value: Some(value.clone()),
            },
        };

        HttpResponse::build(self.status_code())
            .json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn not_found_wording_depends_on_operation() {
        let update = AppError::from_issue_error(IssueError::NotFound { id: "a".into() }, Operation::Update);
        let delete = AppError::from_issue_error(IssueError::NotFound { id: "a".into() }, Operation::Delete);

        assert_eq!(update.code(), ErrorCode::CouldNotUpdate);
        assert_eq!(delete.code(), ErrorCode::CouldNotDelete);
        assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_fault_is_a_server_error() {
        let err = AppError::from_issue_error(
            IssueError::StorageUnavailable { id: Some("a".into()), reason: "pool timed out".into() },
            Operation::Update,
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Server Error");
    }
}
