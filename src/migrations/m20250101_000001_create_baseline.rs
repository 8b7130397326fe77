//! Baseline schema migration - creates every table the tracker needs
//!
//! - Companies and their login accounts (companies, company_accounts)
//! - Panels and the per-vendor sub-assemblies attached to them
//!   (busbars, components, palet, corepart)
//!
//! `panels.panel_type` is intentionally absent here; it is added by a later
//! migration so fresh and legacy databases follow the same upgrade path.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================================
        // Companies
        // =====================================================================

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Name)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Companies::Role).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanyAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyAccounts::Username)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyAccounts::Password).text().not_null())
                    .col(ColumnDef::new(CompanyAccounts::CompanyId).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(CompanyAccounts::Table, CompanyAccounts::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================================
        // Panels
        // =====================================================================

        manager
            .create_table(
                Table::create()
                    .table(Panels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Panels::NoPp)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Panels::NoPanel).text().null())
                    .col(ColumnDef::new(Panels::NoWbs).text().null())
                    .col(ColumnDef::new(Panels::Project).text().null())
                    .col(ColumnDef::new(Panels::PercentProgress).double().null())
                    .col(
                        ColumnDef::new(Panels::StartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Panels::TargetDelivery)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Panels::StatusBusbarPcc).text().null())
                    .col(ColumnDef::new(Panels::StatusBusbarMcc).text().null())
                    .col(ColumnDef::new(Panels::StatusComponent).text().null())
                    .col(ColumnDef::new(Panels::StatusPalet).text().null())
                    .col(ColumnDef::new(Panels::StatusCorepart).text().null())
                    .col(
                        ColumnDef::new(Panels::AoBusbarPcc)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Panels::AoBusbarMcc)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Panels::CreatedBy).text().null())
                    .col(ColumnDef::new(Panels::VendorId).text().null())
                    .col(
                        ColumnDef::new(Panels::IsClosed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Panels::ClosedDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================================
        // Per-vendor sub-assemblies
        // =====================================================================

        manager
            .create_table(
                Table::create()
                    .table(Busbars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Busbars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Busbars::PanelNoPp).text().not_null())
                    .col(ColumnDef::new(Busbars::Vendor).text().not_null())
                    .col(ColumnDef::new(Busbars::Remarks).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Busbars::Table, Busbars::PanelNoPp)
                            .to(Panels::Table, Panels::NoPp)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_busbars_panel_no_pp_vendor")
                    .table(Busbars::Table)
                    .col(Busbars::PanelNoPp)
                    .col(Busbars::Vendor)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        create_vendor_table(manager, Components::Table, "uq_components_panel_no_pp_vendor")
            .await?;
        create_vendor_table(manager, Palet::Table, "uq_palet_panel_no_pp_vendor").await?;
        create_vendor_table(manager, Corepart::Table, "uq_corepart_panel_no_pp_vendor").await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first, then panels, then accounts before companies
        manager
            .drop_table(Table::drop().table(Corepart::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Palet::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Components::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Busbars::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Panels::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(CompanyAccounts::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).if_exists().to_owned())
            .await
    }
}

/// Components, palet and corepart share one shape: a vendor attached to a panel
async fn create_vendor_table<T>(
    manager: &SchemaManager<'_>,
    table: T,
    unique_index: &str,
) -> Result<(), DbErr>
where
    T: IntoIden + Copy + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(
                    ColumnDef::new(VendorPart::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(VendorPart::PanelNoPp).text().not_null())
                .col(ColumnDef::new(VendorPart::Vendor).text().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .from(table, VendorPart::PanelNoPp)
                        .to(Panels::Table, Panels::NoPp)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name(unique_index)
                .table(table)
                .col(VendorPart::PanelNoPp)
                .col(VendorPart::Vendor)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    Role,
}

#[derive(Iden)]
enum CompanyAccounts {
    Table,
    Username,
    Password,
    CompanyId,
}

#[derive(Iden)]
enum Panels {
    Table,
    NoPp,
    NoPanel,
    NoWbs,
    Project,
    PercentProgress,
    StartDate,
    TargetDelivery,
    StatusBusbarPcc,
    StatusBusbarMcc,
    StatusComponent,
    StatusPalet,
    StatusCorepart,
    AoBusbarPcc,
    AoBusbarMcc,
    CreatedBy,
    VendorId,
    IsClosed,
    ClosedDate,
}

#[derive(Iden)]
enum Busbars {
    Table,
    Id,
    PanelNoPp,
    Vendor,
    Remarks,
}

#[derive(Iden, Clone, Copy)]
enum Components {
    Table,
}

#[derive(Iden, Clone, Copy)]
#[iden = "palet"]
enum Palet {
    Table,
}

#[derive(Iden, Clone, Copy)]
#[iden = "corepart"]
enum Corepart {
    Table,
}

/// Columns shared by the vendor sub-assembly tables
#[derive(Iden)]
enum VendorPart {
    Id,
    PanelNoPp,
    Vendor,
}
