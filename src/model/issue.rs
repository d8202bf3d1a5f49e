use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::entity::issue::Model as IssueModel;
use crate::service::filter::parse_open;
use crate::store::NewIssue;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateIssueRequest {
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
}

impl From<CreateIssueRequest> for NewIssue {
    fn from(request: CreateIssueRequest) -> Self {
        Self {
            issue_title: request.issue_title.unwrap_or_default(),
            issue_text: request.issue_text.unwrap_or_default(),
            created_by: request.created_by.unwrap_or_default(),
            assigned_to: request.assigned_to.unwrap_or_default(),
            status_text: request.status_text.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateIssueRequest {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_open")]
    pub open: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteIssueRequest {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

// HTML 폼은 문자열로, JSON 클라이언트는 bool 로 보낸다.
fn deserialize_open<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OpenFlag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<OpenFlag>::deserialize(deserializer)? {
        None => None,
        Some(OpenFlag::Bool(open)) => Some(open),
        Some(OpenFlag::Text(raw)) if raw.trim().is_empty() => None,
        Some(OpenFlag::Text(raw)) => Some(parse_open(raw.trim())),
    })
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<IssueModel> for IssueResponse {
    fn from(model: IssueModel) -> Self {
        Self {
            id: model.id.to_string(),
            issue_title: model.issue_title,
            issue_text: model.issue_text,
            created_by: model.created_by,
            assigned_to: model.assigned_to,
            status_text: model.status_text,
            open: model.open,
            created_on: model.created_on,
            updated_on: model.updated_on,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl MutationResponse {
    pub fn updated(id: String) -> Self {
        Self {
            result: "successfully updated".to_string(),
            id,
        }
    }

    pub fn deleted(id: String) -> Self {
        Self {
            result: "successfully deleted".to_string(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_accepts_json_bool_or_string() {
        let from_bool: UpdateIssueRequest = serde_json::from_str(r#"{"_id":"x","open":false}"#).unwrap();
        let from_text: UpdateIssueRequest = serde_json::from_str(r#"{"_id":"x","open":"true"}"#).unwrap();
        let blank: UpdateIssueRequest = serde_json::from_str(r#"{"_id":"x","open":""}"#).unwrap();
        let absent: UpdateIssueRequest = serde_json::from_str(r#"{"_id":"x"}"#).unwrap();

        assert_eq!(from_bool.open, Some(false));
        assert_eq!(from_text.open, Some(true));
        assert_eq!(blank.open, None);
        assert_eq!(absent.open, None);
    }

    #[test]
    fn issue_response_uses_underscore_id() {
        let model = IssueModel::new(
            "apitest",
            NewIssue {
                issue_title: "A".into(),
                issue_text: "B".into(),
                created_by: "C".into(),
                ..Default::default()
            },
        );
        let id = model.id.to_string();

        let json = serde_json::to_value(IssueResponse::from(model)).unwrap();

        assert_eq!(json["_id"], id);
        assert_eq!(json["assigned_to"], "");
        assert_eq!(json["open"], true);
        assert!(json.get("project").is_none());
    }
}
