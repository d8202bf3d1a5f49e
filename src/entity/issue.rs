use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project: String,
    #[sea_orm(column_type = "Text")]
    pub issue_title: String,
    #[sea_orm(column_type = "Text")]
    pub issue_text: String,
    #[sea_orm(column_type = "Text")]
    pub created_by: String,
    #[sea_orm(column_type = "Text")]
    pub assigned_to: String,
    #[sea_orm(column_type = "Text")]
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTimeUtc,
    pub updated_on: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// 저장소에 기록되는 시각. 응답으로 받은 값을 그대로 필터에 쓸 수 있도록 초 단위로 자른다.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

impl Model {
    pub fn new(project: &str, issue: crate::store::NewIssue) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            project: project.to_string(),
            issue_title: issue.issue_title,
            issue_text: issue.issue_text,
            created_by: issue.created_by,
            assigned_to: issue.assigned_to,
            status_text: issue.status_text,
            open: true,
            created_on: now,
            updated_on: now,
        }
    }
}

impl ActiveModel {
    pub fn from_new_issue(project: &str, issue: crate::store::NewIssue) -> Self {
        let model = Model::new(project, issue);
        Self {
            id: Set(model.id),
            project: Set(model.project),
            issue_title: Set(model.issue_title),
            issue_text: Set(model.issue_text),
            created_by: Set(model.created_by),
            assigned_to: Set(model.assigned_to),
            status_text: Set(model.status_text),
            open: Set(model.open),
            created_on: Set(model.created_on),
            updated_on: Set(model.updated_on),
        }
    }
}
