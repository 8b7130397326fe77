//! Generic row reader
//!
//! A [`RecordKind`] names an entity and owns its table and column projection;
//! the rows come back as the matching [`Record`] arm.

use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, QueryResult};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{busbar, company, company_account, component, corepart, palet, panel};
use crate::services::tables::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Company,
    CompanyAccount,
    Panel,
    Busbar,
    Component,
    Palet,
    Corepart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Company(company::Model),
    CompanyAccount(company_account::Model),
    Panel(panel::Model),
    Busbar(busbar::Model),
    Component(component::Model),
    Palet(palet::Model),
    Corepart(corepart::Model),
}

impl RecordKind {
    pub fn table(self) -> Table {
        match self {
            RecordKind::Company => Table::Companies,
            RecordKind::CompanyAccount => Table::CompanyAccounts,
            RecordKind::Panel => Table::Panels,
            RecordKind::Busbar => Table::Busbars,
            RecordKind::Component => Table::Components,
            RecordKind::Palet => Table::Palet,
            RecordKind::Corepart => Table::Corepart,
        }
    }

    /// Kinds that can be listed in full
    pub fn supports_read_all(self) -> bool {
        matches!(
            self,
            RecordKind::Company | RecordKind::CompanyAccount | RecordKind::Panel
        )
    }

    /// Kinds that can be filtered by a list of ids
    pub fn supports_read_in(self) -> bool {
        matches!(
            self,
            RecordKind::Panel
                | RecordKind::Busbar
                | RecordKind::Component
                | RecordKind::Palet
                | RecordKind::Corepart
        )
    }

    fn decode(self, row: &QueryResult) -> std::result::Result<Record, DbErr> {
        Ok(match self {
            RecordKind::Company => Record::Company(company::Model::from_query_result(row, "")?),
            RecordKind::CompanyAccount => {
                Record::CompanyAccount(company_account::Model::from_query_result(row, "")?)
            }
            RecordKind::Panel => Record::Panel(panel::Model::from_query_result(row, "")?),
            RecordKind::Busbar => Record::Busbar(busbar::Model::from_query_result(row, "")?),
            RecordKind::Component => {
                Record::Component(component::Model::from_query_result(row, "")?)
            }
            RecordKind::Palet => Record::Palet(palet::Model::from_query_result(row, "")?),
            RecordKind::Corepart => Record::Corepart(corepart::Model::from_query_result(row, "")?),
        })
    }

    fn select(self) -> SelectStatement {
        let table = self.table();
        Query::select()
            .columns(table.columns().iter().map(|def| Alias::new(def.name)))
            .from(Alias::new(table.name()))
            .order_by(Alias::new(table.primary_key()), Order::Asc)
            .to_owned()
    }
}

/// Read every row of the kind's table, ordered by primary key
pub async fn read_all<C>(db: &C, kind: RecordKind) -> Result<Vec<Record>>
where
    C: ConnectionTrait,
{
    if !kind.supports_read_all() {
        return Err(AppError::BadRequest(format!(
            "Record kind {:?} cannot be listed",
            kind
        )));
    }

    fetch(db, kind, kind.select()).await
}

/// Read the rows whose `column` matches any of `ids`.
///
/// An empty id list returns an empty result without touching the store.
pub async fn read_in<C>(db: &C, kind: RecordKind, column: &str, ids: &[String]) -> Result<Vec<Record>>
where
    C: ConnectionTrait,
{
    if !kind.supports_read_in() {
        return Err(AppError::BadRequest(format!(
            "Record kind {:?} cannot be filtered by id",
            kind
        )));
    }

    let def = kind.table().column(column).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown column '{}' for table '{}'",
            column,
            kind.table().name()
        ))
    })?;

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut select = kind.select();
    select.and_where(Expr::col(Alias::new(def.name)).is_in(ids.iter().cloned()));

    fetch(db, kind, select).await
}

async fn fetch<C>(db: &C, kind: RecordKind, select: SelectStatement) -> Result<Vec<Record>>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let rows = db.query_all(backend.build(&select)).await?;

    rows.iter()
        .map(|row| kind.decode(row).map_err(AppError::from))
        .collect()
}

/// Typed view over [`Record`] for callers that know which kind they asked for
pub trait RecordModel: Sized {
    const KIND: RecordKind;

    fn from_record(record: Record) -> Option<Self>;
}

macro_rules! record_model {
    ($model:ty, $variant:ident) => {
        impl RecordModel for $model {
            const KIND: RecordKind = RecordKind::$variant;

            fn from_record(record: Record) -> Option<Self> {
                match record {
                    Record::$variant(model) => Some(model),
                    _ => None,
                }
            }
        }
    };
}

record_model!(company::Model, Company);
record_model!(company_account::Model, CompanyAccount);
record_model!(panel::Model, Panel);
record_model!(busbar::Model, Busbar);
record_model!(component::Model, Component);
record_model!(palet::Model, Palet);
record_model!(corepart::Model, Corepart);

/// [`read_all`] unwrapped into concrete models
pub async fn read_all_as<T, C>(db: &C) -> Result<Vec<T>>
where
    T: RecordModel,
    C: ConnectionTrait,
{
    Ok(read_all(db, T::KIND)
        .await?
        .into_iter()
        .filter_map(T::from_record)
        .collect())
}

/// [`read_in`] unwrapped into concrete models
pub async fn read_in_as<T, C>(db: &C, column: &str, ids: &[String]) -> Result<Vec<T>>
where
    T: RecordModel,
    C: ConnectionTrait,
{
    Ok(read_in(db, T::KIND, column, ids)
        .await?
        .into_iter()
        .filter_map(T::from_record)
        .collect())
}
