//! First-run demo data

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use crate::error::Result;
use crate::models::prelude::*;
use crate::models::{company, company_account};
use crate::services::security::hash_password;

/// Password shared by every seeded account
pub const DEMO_PASSWORD: &str = "123";

/// (id, name, role)
pub const SEED_COMPANIES: [(&str, &str, &str); 8] = [
    ("admin", "Administrator", "admin"),
    ("viewer", "Viewer", "viewer"),
    ("warehouse", "Warehouse", "warehouse"),
    ("gpe", "PT GPE", "k3"),
    ("dsm", "PT DSM", "k3"),
    ("presisi", "PT Presisi", "k5"),
    ("abacus", "PT Abacus", "k5"),
    ("triangle", "PT Triangle", "k5"),
];

/// (username, company_id)
pub const SEED_ACCOUNTS: [(&str, &str); 12] = [
    ("admin", "admin"),
    ("viewer", "viewer"),
    ("warehouse", "warehouse"),
    ("gpe", "gpe"),
    ("gpe_2", "gpe"),
    ("dsm", "dsm"),
    ("dsm_2", "dsm"),
    ("presisi", "presisi"),
    ("presisi_2", "presisi"),
    ("abacus", "abacus"),
    ("abacus_2", "abacus"),
    ("triangle", "triangle"),
];

/// Seed companies and accounts when the companies table is empty.
///
/// Returns whether seeding ran. The whole seed is one transaction.
pub async fn seed_if_empty(db: &DatabaseConnection) -> Result<bool> {
    let existing = Company::find().count(db).await?;
    if existing > 0 {
        tracing::debug!("Found {} companies, skipping seed", existing);
        return Ok(false);
    }

    let password = hash_password(DEMO_PASSWORD)?;

    let txn = db.begin().await?;
    seed_companies(&txn).await?;
    seed_accounts(&txn, &password).await?;
    txn.commit().await?;

    tracing::info!(
        "Seeded {} companies and {} accounts",
        SEED_COMPANIES.len(),
        SEED_ACCOUNTS.len()
    );
    Ok(true)
}

async fn seed_companies<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    for (id, name, role) in SEED_COMPANIES {
        let model = company::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            role: Set(role.to_string()),
        };

        Company::insert(model)
            .on_conflict(
                OnConflict::column(company::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn seed_accounts<C>(db: &C, password: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    for (username, company_id) in SEED_ACCOUNTS {
        let model = company_account::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            company_id: Set(company_id.to_string()),
        };

        CompanyAccount::insert(model)
            .on_conflict(
                OnConflict::column(company_account::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}
