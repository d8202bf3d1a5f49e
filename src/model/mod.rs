pub mod global_error;
pub mod issue;

pub use global_error::{AppError, ErrorCode, Operation};
pub use issue::{CreateIssueRequest, DeleteIssueRequest, IssueResponse, MutationResponse, UpdateIssueRequest};
