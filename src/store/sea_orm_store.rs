use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::{debug, error, instrument};

use crate::entity::issue::{self, ActiveModel as IssueActiveModel, Entity as IssueEntity, Model as IssueModel};
use crate::store::predicate::{to_condition, FieldPredicate};
use crate::store::{parse_id, IssueFilter, IssuePatch, IssueStore, NewIssue, StoreError};

#[derive(Debug, Clone)]
pub struct SeaOrmIssueStore {
    db: DatabaseConnection,
}

impl SeaOrmIssueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn fault(err: sea_orm::DbErr) -> StoreError {
    let err = StoreError::from(err);
    if let StoreError::Fault(reason) = &err {
        error!("데이터베이스 오류 발생: {}", reason);
    }
    err
}

#[async_trait]
impl IssueStore for SeaOrmIssueStore {
    #[instrument(skip(self))]
    async fn list(&self, project: &str, filter: &IssueFilter) -> Result<Vec<IssueModel>, StoreError> {
        let Some(mut predicates) = filter.resolve() else {
            debug!("존재하지 않는 필드 조건이 포함되어 빈 목록 반환");
            return Ok(Vec::new());
        };
        predicates.push(FieldPredicate::Project(project.to_string()));

        IssueEntity::find()
            .filter(to_condition(&predicates))
            .order_by_asc(issue::Column::CreatedOn)
            .all(&self.db)
            .await
            .map_err(fault)
    }

    #[instrument(skip(self, new_issue))]
    async fn create(&self, project: &str, new_issue: NewIssue) -> Result<IssueModel, StoreError> {
        new_issue.validate()?;

        IssueActiveModel::from_new_issue(project, new_issue)
            .insert(&self.db)
            .await
            .map_err(fault)
    }

    #[instrument(skip(self, patch))]
    async fn update_by_id(&self, id: &str, patch: IssuePatch) -> Result<IssueModel, StoreError> {
        let id = parse_id(id)?;

        let txn = self.db.begin().await.map_err(fault)?;

        let existing = IssueEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(fault)?
            .ok_or(StoreError::NotFound)?;

        let mut issue_model = existing.into_active_model();
        patch.apply_to_active(&mut issue_model);
        issue_model.updated_on = Set(issue::now());

        let updated = issue_model.update(&txn).await.map_err(fault)?;
        txn.commit().await.map_err(fault)?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;

        let result = IssueEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(fault)?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
