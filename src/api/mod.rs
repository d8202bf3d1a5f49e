mod body;
mod doc;
mod health;
mod issue;

pub use crate::api::doc::ApiDoc;
pub use crate::api::health::health_check;
pub use crate::api::issue::{create_issue, delete_issue, list_issues, update_issue};
