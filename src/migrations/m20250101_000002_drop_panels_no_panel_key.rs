//! Migration: drop the legacy unique constraint on panels.no_panel
//!
//! Older databases were created with `no_panel` unique, which PostgreSQL names
//! `panels_no_panel_key`. Several panels may share a panel number, so the
//! constraint is removed when present. The check and the drop run inside one
//! `DO` block, making the step safe to repeat.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

pub const LEGACY_CONSTRAINT: &str = "panels_no_panel_key";

const DROP_LEGACY_CONSTRAINT_SQL: &str = r#"
DO $$
BEGIN
    IF EXISTS (
        SELECT 1
        FROM pg_constraint
        WHERE conname = 'panels_no_panel_key'
          AND conrelid = 'panels'::regclass
    ) THEN
        ALTER TABLE panels DROP CONSTRAINT panels_no_panel_key;
    END IF;
END
$$;
"#;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            // Constraint names only exist on PostgreSQL
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(DROP_LEGACY_CONSTRAINT_SQL)
            .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Restoring the constraint would fail on databases that now hold
        // duplicate panel numbers
        Ok(())
    }
}
