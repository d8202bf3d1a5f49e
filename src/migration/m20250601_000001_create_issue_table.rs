use sea_orm::{DbBackend, Schema};
use sea_orm_migration::prelude::*;
use crate::entity::issue::{Column, Entity};

#[derive(DeriveMigrationName)]
pub struct Migration;

// MySQL 기본 콜레이션은 대소문자를 구분하지 않으므로 필터가 정확히 일치하도록 바이너리 콜레이션을 쓴다.
fn issues_table(backend: DbBackend) -> TableCreateStatement {
    let mut table = Schema::new(backend).create_table_from_entity(Entity);
    table.if_not_exists();

    if backend == DbBackend::MySql {
        table.character_set("utf8mb4").collate("utf8mb4_bin");
    }

    table
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {

    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(issues_table(manager.get_database_backend()))
            .await?;

        // 프로젝트 단위 목록 조회용
        manager
            .create_index(
                Index::create()
                    .name("idx_issues_project")
                    .table(Entity)
                    .col(Column::Project)
                    .to_owned()
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entity).to_owned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_table_uses_text_columns_and_binary_collation() {
        let sql = issues_table(DbBackend::MySql).to_string(MysqlQueryBuilder);

        assert!(sql.contains("utf8mb4_bin"), "{sql}");
        for column in ["issue_title", "issue_text", "created_by", "assigned_to", "status_text"] {
            assert!(sql.contains(&format!("`{column}` text")), "{sql}");
        }
    }

    #[test]
    fn sqlite_table_has_no_mysql_options() {
        let sql = issues_table(DbBackend::Sqlite).to_string(SqliteQueryBuilder);

        assert!(!sql.contains("utf8mb4"), "{sql}");
    }
}
