//! Migration: add the nullable panel_type column to panels

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.has_column("panels", "panel_type").await? {
            return Ok(());
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Panels::Table)
                    .add_column(ColumnDef::new(Panels::PanelType).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Panels::Table)
                    .drop_column(Panels::PanelType)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "panels"]
enum Panels {
    Table,
    #[iden = "panel_type"]
    PanelType,
}
