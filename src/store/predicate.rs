use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::ColumnTrait;
use sea_query::{Condition, SimpleExpr};
use uuid::Uuid;

use crate::entity::issue::{Column, Model as IssueModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

/// 저장 필드 이름을 키로 하는 동등 비교 필터. 쿼리 문자열에서 만들어진다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    fields: BTreeMap<String, FilterValue>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 모든 항목을 저장 컬럼 조건으로 바꾼다.
    ///
    /// 어떤 저장 이슈에도 참일 수 없는 항목이 있으면 `None` 이다.
    /// 없는 컬럼 이름, 타입이 맞지 않는 값, 형식이 틀린 `_id` 가 그 경우다.
    pub fn resolve(&self) -> Option<Vec<FieldPredicate>> {
        self.fields
            .iter()
            .map(|(field, value)| FieldPredicate::resolve(field, value))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPredicate {
    Id(Uuid),
    Project(String),
    IssueTitle(String),
    IssueText(String),
    CreatedBy(String),
    AssignedTo(String),
    StatusText(String),
    Open(bool),
    CreatedOn(DateTime<Utc>),
    UpdatedOn(DateTime<Utc>),
}

impl FieldPredicate {
    fn resolve(field: &str, value: &FilterValue) -> Option<Self> {
        use FilterValue::*;

        let predicate = match (field, value) {
            ("_id", Text(id)) => FieldPredicate::Id(Uuid::parse_str(id).ok()?),
            ("project", Text(v)) => FieldPredicate::Project(v.clone()),
            ("issue_title", Text(v)) => FieldPredicate::IssueTitle(v.clone()),
            ("issue_text", Text(v)) => FieldPredicate::IssueText(v.clone()),
            ("created_by", Text(v)) => FieldPredicate::CreatedBy(v.clone()),
            ("assigned_to", Text(v)) => FieldPredicate::AssignedTo(v.clone()),
            ("status_text", Text(v)) => FieldPredicate::StatusText(v.clone()),
            ("open", Bool(v)) => FieldPredicate::Open(*v),
            ("created_on", Timestamp(v)) => FieldPredicate::CreatedOn(*v),
            ("updated_on", Timestamp(v)) => FieldPredicate::UpdatedOn(*v),
            _ => return None,
        };

        Some(predicate)
    }

    pub fn matches(&self, issue: &IssueModel) -> bool {
        match self {
            FieldPredicate::Id(v) => issue.id == *v,
            FieldPredicate::Project(v) => issue.project == *v,
            FieldPredicate::IssueTitle(v) => issue.issue_title == *v,
            FieldPredicate::IssueText(v) => issue.issue_text == *v,
            FieldPredicate::CreatedBy(v) => issue.created_by == *v,
            FieldPredicate::AssignedTo(v) => issue.assigned_to == *v,
            FieldPredicate::StatusText(v) => issue.status_text == *v,
            FieldPredicate::Open(v) => issue.open == *v,
            FieldPredicate::CreatedOn(v) => issue.created_on == *v,
            FieldPredicate::UpdatedOn(v) => issue.updated_on == *v,
        }
    }

    pub fn to_expr(&self) -> SimpleExpr {
        match self {
            FieldPredicate::Id(v) => Column::Id.eq(*v),
            FieldPredicate::Project(v) => Column::Project.eq(v.as_str()),
            FieldPredicate::IssueTitle(v) => Column::IssueTitle.eq(v.as_str()),
            FieldPredicate::IssueText(v) => Column::IssueText.eq(v.as_str()),
            FieldPredicate::CreatedBy(v) => Column::CreatedBy.eq(v.as_str()),
            FieldPredicate::AssignedTo(v) => Column::AssignedTo.eq(v.as_str()),
            FieldPredicate::StatusText(v) => Column::StatusText.eq(v.as_str()),
            FieldPredicate::Open(v) => Column::Open.eq(*v),
            FieldPredicate::CreatedOn(v) => Column::CreatedOn.eq(*v),
            FieldPredicate::UpdatedOn(v) => Column::UpdatedOn.eq(*v),
        }
    }
}

pub fn to_condition(predicates: &[FieldPredicate]) -> Condition {
    predicates
        .iter()
        .fold(Condition::all(), |cond, predicate| cond.add(predicate.to_expr()))
}
