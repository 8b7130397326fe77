//! Generic upsert writer
//!
//! One contract powers API writes and imports: a partial column map is
//! inserted into a whitelisted table and conflicts on the table's declared
//! target update every written non-key column. When nothing but key columns
//! were supplied the conflict branch does nothing.
//!
//! The store checks NOT NULL on the proposed row before it resolves a
//! conflict, so a map that omits a required column is applied as an UPDATE of
//! the existing row instead. Without an existing row it is reported as
//! [`UpsertOutcome::Incomplete`].

use sea_orm::sea_query::{Alias, Expr, OnConflict, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DbBackend, Statement, Value};

use crate::error::{AppError, Result};
use crate::services::tables::{PartialRow, Table};

/// Result of applying one partial row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Rows inserted or updated
    Written(u64),
    /// No existing row matched and these required columns were absent
    Incomplete(Vec<&'static str>),
}

/// Written columns in schema order, after rejecting unknown ones
fn written_values(table: Table, row: &PartialRow) -> Result<Vec<(&'static str, Value)>> {
    if let Some(unknown) = row.keys().find(|key| table.writable_column(key).is_none()) {
        return Err(AppError::BadRequest(format!(
            "Unknown column '{}' for table '{}'",
            unknown,
            table.name()
        )));
    }

    // Schema order keeps placeholder numbering stable
    Ok(table
        .writable_columns()
        .filter_map(|def| match row.get(def.name) {
            Some(Some(value)) => Some((def.name, value.clone())),
            _ => None,
        })
        .collect())
}

fn target_condition(table: Table, values: &[(&'static str, Value)]) -> Vec<SimpleExpr> {
    table
        .conflict_target()
        .iter()
        .filter_map(|column| {
            values
                .iter()
                .find(|(name, _)| name == column)
                .map(|(name, value)| Expr::col(Alias::new(*name)).eq(value.clone()))
        })
        .collect()
}

/// Build the upsert statement for `row`, or `None` when no column carries a value
pub fn build_upsert(backend: DbBackend, table: &str, row: &PartialRow) -> Result<Option<Statement>> {
    let table = Table::from_name(table)?;
    let values = written_values(table, row)?;

    if values.is_empty() {
        return Ok(None);
    }

    let target = table.conflict_target();
    let updates: Vec<&str> = values
        .iter()
        .map(|(column, _)| *column)
        .filter(|column| !target.contains(column))
        .collect();

    let mut on_conflict = OnConflict::columns(target.iter().map(|column| Alias::new(*column)));
    if updates.is_empty() {
        on_conflict.do_nothing();
    } else {
        on_conflict.update_columns(updates.iter().map(|column| Alias::new(*column)));
    }

    let mut insert = Query::insert();
    insert
        .into_table(Alias::new(table.name()))
        .columns(values.iter().map(|(column, _)| Alias::new(*column)))
        .values(values.iter().map(|(_, value)| SimpleExpr::Value(value.clone())))
        .map_err(|e| AppError::Internal(format!("Failed to build insert: {}", e)))?
        .on_conflict(on_conflict.to_owned());

    Ok(Some(backend.build(&insert)))
}

/// Build an UPDATE of the row matching the conflict target, or `None` when the
/// target is incomplete or there is no non-key column to set
pub fn build_update(backend: DbBackend, table: &str, row: &PartialRow) -> Result<Option<Statement>> {
    let table = Table::from_name(table)?;
    let values = written_values(table, row)?;
    let target = table.conflict_target();

    let condition = target_condition(table, &values);
    if condition.len() != target.len() {
        return Ok(None);
    }

    let updates: Vec<(Alias, SimpleExpr)> = values
        .iter()
        .filter(|(column, _)| !target.contains(column))
        .map(|(column, value)| (Alias::new(*column), SimpleExpr::Value(value.clone())))
        .collect();

    if updates.is_empty() {
        return Ok(None);
    }

    let mut update = Query::update();
    update.table(Alias::new(table.name())).values(updates);
    for expr in condition {
        update.and_where(expr);
    }

    Ok(Some(backend.build(&update)))
}

async fn target_exists<C>(db: &C, table: Table, row: &PartialRow) -> Result<bool>
where
    C: ConnectionTrait,
{
    let values = written_values(table, row)?;
    let target = table.conflict_target();
    let condition = target_condition(table, &values);
    if condition.len() != target.len() {
        return Ok(false);
    }

    let mut select = Query::select();
    select
        .column(Alias::new(target[0]))
        .from(Alias::new(table.name()))
        .limit(1);
    for expr in condition {
        select.and_where(expr);
    }

    let backend = db.get_database_backend();
    Ok(db.query_one(backend.build(&select)).await?.is_some())
}

/// Apply `row` to `table`.
///
/// Complete rows go through the INSERT with its conflict clause. Rows missing
/// a required column update the existing row that matches the conflict target.
pub async fn try_upsert<C>(db: &C, table: &str, row: &PartialRow) -> Result<UpsertOutcome>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let Some(insert) = build_upsert(backend, table, row)? else {
        tracing::debug!("Skipping empty upsert into {}", table);
        return Ok(UpsertOutcome::Written(0));
    };

    let resolved = Table::from_name(table)?;
    let missing = resolved.missing_required(row);
    if missing.is_empty() {
        let result = db.execute(insert).await?;
        return Ok(UpsertOutcome::Written(result.rows_affected()));
    }

    if let Some(update) = build_update(backend, table, row)? {
        let affected = db.execute(update).await?.rows_affected();
        if affected > 0 {
            return Ok(UpsertOutcome::Written(affected));
        }
    } else if target_exists(db, resolved, row).await? {
        // Key columns only: an existing row makes this a no-op
        return Ok(UpsertOutcome::Written(0));
    }

    Ok(UpsertOutcome::Incomplete(missing))
}

/// Upsert `row` into `table`, returning the number of rows written.
///
/// A row without any usable column is a silent no-op. A new row missing a
/// required column is a client error.
pub async fn upsert<C>(db: &C, table: &str, row: &PartialRow) -> Result<u64>
where
    C: ConnectionTrait,
{
    match try_upsert(db, table, row).await? {
        UpsertOutcome::Written(rows) => Ok(rows),
        UpsertOutcome::Incomplete(missing) => Err(AppError::BadRequest(format!(
            "New row in '{}' is missing required column(s): {}",
            table,
            missing.join(", ")
        ))),
    }
}
