//! 메모리 이슈 저장소.
//!
//! 이슈를 생성 순서대로 `tokio::sync::RwLock` 안에 둔다. 작업마다 락을 한 번만 잡으므로
//! 호출 하나는 다른 호출에 대해 원자적이다. 테스트와 `DATABASE_URL=memory` 실행에서 쓴다.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity::issue::{self, Model as IssueModel};
use crate::store::{parse_id, IssueFilter, IssuePatch, IssueStore, NewIssue, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryIssueStore {
    issues: Arc<RwLock<Vec<IssueModel>>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(issues: &[IssueModel], id: Uuid) -> Result<usize, StoreError> {
        issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn list(&self, project: &str, filter: &IssueFilter) -> Result<Vec<IssueModel>, StoreError> {
        let Some(predicates) = filter.resolve() else {
            return Ok(Vec::new());
        };

        let issues = self.issues.read().await;
        Ok(issues
            .iter()
            .filter(|issue| issue.project == project)
            .filter(|issue| predicates.iter().all(|p| p.matches(issue)))
            .cloned()
            .collect())
    }

    async fn create(&self, project: &str, new_issue: NewIssue) -> Result<IssueModel, StoreError> {
        new_issue.validate()?;

        let issue = IssueModel::new(project, new_issue);
        self.issues.write().await.push(issue.clone());

        Ok(issue)
    }

    async fn update_by_id(&self, id: &str, patch: IssuePatch) -> Result<IssueModel, StoreError> {
        let id = parse_id(id)?;

        let mut issues = self.issues.write().await;
        let index = Self::position(&issues, id)?;

        let issue = &mut issues[index];
        patch.apply_to(issue);
        issue.updated_on = issue::now();

        Ok(issue.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;

        let mut issues = self.issues.write().await;
        let index = Self::position(&issues, id)?;
        issues.remove(index);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FilterValue;

    fn new_issue(title: &str) -> NewIssue {
        NewIssue {
            issue_title: title.into(),
            issue_text: "text".into(),
            created_by: "alice".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn list_is_scoped_to_project() {
        let store = MemoryIssueStore::new();
        store.create("apitest", new_issue("one")).await.unwrap();
        store.create("other", new_issue("two")).await.unwrap();

        let issues = store.list("apitest", &IssueFilter::new()).await.unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_title, "one");
    }

    #[tokio::test]
    async fn list_with_unknown_field_matches_nothing() {
        let store = MemoryIssueStore::new();
        store.create("apitest", new_issue("one")).await.unwrap();

        let filter = IssueFilter::new().with("severity", FilterValue::Text("one".into()));
        let issues = store.list("apitest", &filter).await.unwrap();

        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_required_fields() {
        let store = MemoryIssueStore::new();

        let err = store.create("apitest", new_issue("")).await.unwrap_err();

        assert_eq!(err, StoreError::Validation(vec!["issue_title"]));
        assert!(store.list("apitest", &IssueFilter::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_and_malformed_ids() {
        let store = MemoryIssueStore::new();
        let absent = Uuid::new_v4().to_string();
        let patch = IssuePatch {
            open: Some(false),
            ..Default::default()
        };

        assert_eq!(store.update_by_id(&absent, patch.clone()).await, Err(StoreError::NotFound));
        assert_eq!(store.update_by_id("123", patch).await, Err(StoreError::InvalidIdentifier));
        assert_eq!(store.delete_by_id(&absent).await, Err(StoreError::NotFound));
        assert_eq!(store.delete_by_id("123").await, Err(StoreError::InvalidIdentifier));
    }

    #[tokio::test]
    async fn update_only_touches_patched_fields() {
        let store = MemoryIssueStore::new();
        let created = store.create("apitest", new_issue("one")).await.unwrap();

        let patch = IssuePatch {
            open: Some(false),
            ..Default::default()
        };
        let updated = store.update_by_id(&created.id.to_string(), patch).await.unwrap();

        assert!(!updated.open);
        assert_eq!(updated.issue_title, created.issue_title);
        assert_eq!(updated.created_on, created.created_on);
    }

    #[tokio::test]
    async fn update_refreshes_updated_on() {
        let store = MemoryIssueStore::new();
        let created = store.create("apitest", new_issue("one")).await.unwrap();
        // 시각은 초 단위로 잘리므로 1초 넘게 기다린다.
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

        let patch = IssuePatch {
            status_text: Some("fixed".into()),
            ..Default::default()
        };
        let updated = store.update_by_id(&created.id.to_string(), patch).await.unwrap();
        let stored = store.list("apitest", &IssueFilter::new()).await.unwrap();

        assert!(updated.updated_on > created.updated_on);
        assert_eq!(stored[0].updated_on, updated.updated_on);
    }

    #[tokio::test]
    async fn text_filters_compare_case_sensitively() {
        let store = MemoryIssueStore::new();
        store.create("apitest", new_issue("crash")).await.unwrap();

        let upper = IssueFilter::new().with("issue_title", FilterValue::Text("CRASH".into()));

        assert!(store.list("apitest", &upper).await.unwrap().is_empty());
    }
}
