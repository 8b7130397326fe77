pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_baseline;
mod m20250101_000002_drop_panels_no_panel_key;
mod m20250101_000003_add_panel_type;

pub use m20250101_000002_drop_panels_no_panel_key::LEGACY_CONSTRAINT;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_baseline::Migration),
            Box::new(m20250101_000002_drop_panels_no_panel_key::Migration),
            Box::new(m20250101_000003_add_panel_type::Migration),
        ]
    }
}
