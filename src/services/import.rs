//! Bulk import of JSON documents and xlsx workbooks
//!
//! Both formats become a document keyed by table name. Rows are written with
//! the generic upsert inside one transaction, parents before children.

use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{AppError, Result};
use crate::services::dates::CANONICAL_FORMAT;
use crate::services::security::hash_row_password;
use crate::services::tables::{row_from_cells, Table};
use crate::services::upsert::{try_upsert, UpsertOutcome};

/// Row counts per table name
pub type ImportSummary = BTreeMap<String, u64>;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ImportReport {
    /// Rows written per table
    pub imported: ImportSummary,
    /// Rows left out per table because a key or required column was unusable
    pub skipped: ImportSummary,
}

/// Import a document of the shape `{table: [row, ...]}`.
///
/// Keys that do not name a table are ignored. Cells are parsed leniently, so a
/// malformed value is stored as absent instead of failing the import. A row
/// that cannot become a new record without that value is skipped and counted.
pub async fn import_document(db: &DatabaseConnection, document: &Value) -> Result<ImportReport> {
    let document = document
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Import document must be a JSON object".to_string()))?;

    let mut sections: BTreeMap<Table, &Vec<Value>> = BTreeMap::new();
    for (key, rows) in document {
        let Some(table) = Table::from_sheet_name(key) else {
            tracing::debug!("Ignoring unknown import section '{}'", key);
            continue;
        };
        let rows = rows.as_array().ok_or_else(|| {
            AppError::BadRequest(format!("Import section '{}' must be an array of rows", key))
        })?;
        sections.insert(table, rows);
    }

    let txn = db.begin().await?;
    let mut report = ImportReport::default();

    // Table ordering is parent before child
    for (table, rows) in sections {
        let mut written = 0;
        let mut skipped = 0;

        for (index, row) in rows.iter().enumerate() {
            let cells = row.as_object().ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Row {} of '{}' must be a JSON object",
                    index + 1,
                    table.name()
                ))
            })?;

            let mut partial = row_from_cells(table, cells);
            if table == Table::CompanyAccounts {
                hash_row_password(&mut partial)?;
            }

            match try_upsert(&txn, table.name(), &partial).await? {
                UpsertOutcome::Written(rows) => written += rows,
                UpsertOutcome::Incomplete(missing) => {
                    tracing::warn!(
                        "Skipping row {} of '{}': no usable value for {}",
                        index + 1,
                        table.name(),
                        missing.join(", ")
                    );
                    skipped += 1;
                }
            }
        }

        report.imported.insert(table.name().to_string(), written);
        if skipped > 0 {
            report.skipped.insert(table.name().to_string(), skipped);
        }
    }

    txn.commit().await?;

    tracing::info!("Imported {:?}, skipped {:?}", report.imported, report.skipped);
    Ok(report)
}

/// Import an xlsx workbook with one sheet per table
pub async fn import_workbook(db: &DatabaseConnection, bytes: &[u8]) -> Result<ImportReport> {
    let document = workbook_to_document(bytes)?;
    import_document(db, &document).await
}

/// Read every sheet that names a table into an import document. The first row
/// of each sheet holds the column headers.
pub fn workbook_to_document(bytes: &[u8]) -> Result<Value> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let mut document = Map::new();

    for sheet in workbook.sheet_names() {
        let Some(table) = Table::from_sheet_name(&sheet) else {
            tracing::debug!("Ignoring unknown sheet '{}'", sheet);
            continue;
        };

        let range = workbook.worksheet_range(&sheet)?;
        let mut rows = range.rows();

        let Some(header) = rows.next() else {
            continue;
        };
        let header: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();

        let records: Vec<Value> = rows
            .filter_map(|cells| {
                let record: Map<String, Value> = header
                    .iter()
                    .zip(cells)
                    .filter(|(name, _)| !name.trim().is_empty())
                    .filter_map(|(name, cell)| cell_to_json(cell).map(|value| (name.clone(), value)))
                    .collect();
                (!record.is_empty()).then_some(Value::Object(record))
            })
            .collect();

        document.insert(table.name().to_string(), Value::Array(records));
    }

    Ok(Value::Object(document))
}

fn cell_to_json(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(Value::String(s.clone()))
        }
        Data::Int(i) => Some(Value::from(*i)),
        // Whole numbers come back as floats; keep ids like 1001 free of ".0"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(Value::from(*f as i64)),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|naive| Value::String(naive.format(CANONICAL_FORMAT).to_string())),
    }
}
