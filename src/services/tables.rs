//! Closed whitelist of tables and columns
//!
//! Every table or column name that reaches SQL as an identifier is resolved
//! through [`Table`]. Caller-supplied strings never become identifiers directly.

use std::collections::BTreeMap;

use sea_orm::Value;
use serde_json::{Map, Value as JsonValue};

use crate::error::{AppError, Result};
use crate::services::dates::parse_date;
use crate::services::fields;

/// A partial row: column name to value, where `None` means "not supplied"
pub type PartialRow = BTreeMap<String, Option<Value>>;

/// Roles a company may hold
pub const COMPANY_ROLES: [&str; 5] = ["admin", "viewer", "warehouse", "k3", "k5"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Double,
    Boolean,
    Timestamp,
    /// Auto-increment key, read-only through the generic writer
    Serial,
    /// Text restricted to [`COMPANY_ROLES`]
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

use ColumnKind::{Boolean, Double, Role, Serial, Text, Timestamp};

const fn col(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

const COMPANY_COLUMNS: &[ColumnSpec] = &[col("id", Text), col("name", Text), col("role", Role)];

const COMPANY_ACCOUNT_COLUMNS: &[ColumnSpec] = &[
    col("username", Text),
    col("password", Text),
    col("company_id", Text),
];

const PANEL_COLUMNS: &[ColumnSpec] = &[
    col("no_pp", Text),
    col("no_panel", Text),
    col("no_wbs", Text),
    col("project", Text),
    col("percent_progress", Double),
    col("start_date", Timestamp),
    col("target_delivery", Timestamp),
    col("status_busbar_pcc", Text),
    col("status_busbar_mcc", Text),
    col("status_component", Text),
    col("status_palet", Text),
    col("status_corepart", Text),
    col("ao_busbar_pcc", Timestamp),
    col("ao_busbar_mcc", Timestamp),
    col("created_by", Text),
    col("vendor_id", Text),
    col("is_closed", Boolean),
    col("closed_date", Timestamp),
    col("panel_type", Text),
];

const BUSBAR_COLUMNS: &[ColumnSpec] = &[
    col("id", Serial),
    col("panel_no_pp", Text),
    col("vendor", Text),
    col("remarks", Text),
];

const VENDOR_PART_COLUMNS: &[ColumnSpec] = &[
    col("id", Serial),
    col("panel_no_pp", Text),
    col("vendor", Text),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Companies,
    CompanyAccounts,
    Panels,
    Busbars,
    Components,
    Palet,
    Corepart,
}

impl Table {
    /// All tables in dependency order: parents before children
    pub const ALL: [Table; 7] = [
        Table::Companies,
        Table::CompanyAccounts,
        Table::Panels,
        Table::Busbars,
        Table::Components,
        Table::Palet,
        Table::Corepart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Companies => "companies",
            Table::CompanyAccounts => "company_accounts",
            Table::Panels => "panels",
            Table::Busbars => "busbars",
            Table::Components => "components",
            Table::Palet => "palet",
            Table::Corepart => "corepart",
        }
    }

    /// Resolve a table name exactly; unknown names are a client error
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == name)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown table '{}'", name)))
    }

    /// Resolve a sheet or document key, ignoring case and spaces
    pub fn from_sheet_name(name: &str) -> Option<Self> {
        let wanted = fields::normalize_key(name);
        Self::ALL
            .into_iter()
            .find(|table| fields::normalize_key(table.name()) == wanted)
    }

    /// Full column projection in schema order
    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Table::Companies => COMPANY_COLUMNS,
            Table::CompanyAccounts => COMPANY_ACCOUNT_COLUMNS,
            Table::Panels => PANEL_COLUMNS,
            Table::Busbars => BUSBAR_COLUMNS,
            Table::Components | Table::Palet | Table::Corepart => VENDOR_PART_COLUMNS,
        }
    }

    pub fn column(self, name: &str) -> Option<&'static ColumnSpec> {
        self.columns().iter().find(|def| def.name == name)
    }

    /// Columns accepted by the generic writer, in schema order
    pub fn writable_columns(self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns().iter().filter(|def| def.kind != Serial)
    }

    pub fn writable_column(self, name: &str) -> Option<&'static ColumnSpec> {
        self.writable_columns().find(|def| def.name == name)
    }

    pub fn primary_key(self) -> &'static str {
        match self {
            Table::Companies => "id",
            Table::CompanyAccounts => "username",
            Table::Panels => "no_pp",
            Table::Busbars | Table::Components | Table::Palet | Table::Corepart => "id",
        }
    }

    /// Columns whose duplication routes an insert into its conflict branch
    pub fn conflict_target(self) -> &'static [&'static str] {
        match self {
            Table::Companies => &["id"],
            Table::CompanyAccounts => &["username"],
            Table::Panels => &["no_pp"],
            Table::Busbars | Table::Components | Table::Palet | Table::Corepart => {
                &["panel_no_pp", "vendor"]
            }
        }
    }

    /// NOT NULL writable columns, conflict target included. A new row cannot
    /// be inserted without all of them.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Table::Companies => &["id", "name", "role"],
            Table::CompanyAccounts => &["username", "password", "company_id"],
            Table::Panels => &["no_pp"],
            Table::Busbars | Table::Components | Table::Palet | Table::Corepart => {
                &["panel_no_pp", "vendor"]
            }
        }
    }

    /// Required columns that `row` leaves absent
    pub fn missing_required(self, row: &PartialRow) -> Vec<&'static str> {
        self.required_columns()
            .iter()
            .copied()
            .filter(|column| !matches!(row.get(*column), Some(Some(_))))
            .collect()
    }
}

impl ColumnKind {
    /// Convert a JSON request value. `null` means absent; type mismatches are
    /// client errors.
    pub fn from_json(self, column: &str, value: &JsonValue) -> Result<Option<Value>> {
        let mismatch = |expected: &str| {
            AppError::BadRequest(format!(
                "Column '{}' expects {}, got {}",
                column, expected, value
            ))
        };

        if value.is_null() {
            return Ok(None);
        }

        match self {
            Text => match value {
                JsonValue::String(s) => Ok(Some(Value::from(s.clone()))),
                JsonValue::Number(n) => Ok(Some(Value::from(n.to_string()))),
                _ => Err(mismatch("a string")),
            },
            Double => match value {
                JsonValue::Number(n) => n
                    .as_f64()
                    .map(|f| Some(Value::from(f)))
                    .ok_or_else(|| mismatch("a number")),
                JsonValue::String(s) => parse_number(s)
                    .map(|f| Some(Value::from(f)))
                    .ok_or_else(|| mismatch("a number")),
                _ => Err(mismatch("a number")),
            },
            Boolean => match value {
                JsonValue::Bool(b) => Ok(Some(Value::from(*b))),
                JsonValue::String(s) => parse_bool(s)
                    .map(|b| Some(Value::from(b)))
                    .ok_or_else(|| mismatch("a boolean")),
                JsonValue::Number(n) => match n.as_i64() {
                    Some(0) => Ok(Some(Value::from(false))),
                    Some(1) => Ok(Some(Value::from(true))),
                    _ => Err(mismatch("a boolean")),
                },
                _ => Err(mismatch("a boolean")),
            },
            Timestamp => match value {
                JsonValue::String(s) if s.trim().is_empty() => Ok(None),
                JsonValue::String(s) => parse_date(s)
                    .map(|dt| Some(Value::from(dt)))
                    .ok_or_else(|| mismatch("a date")),
                _ => Err(mismatch("a date string")),
            },
            Role => match value {
                JsonValue::String(s) => parse_role(s)
                    .map(|role| Some(Value::from(role.to_string())))
                    .ok_or_else(|| mismatch(&format!("one of {}", COMPANY_ROLES.join(", ")))),
                _ => Err(mismatch("a role string")),
            },
            Serial => Err(AppError::BadRequest(format!(
                "Column '{}' is generated by the database",
                column
            ))),
        }
    }

    /// Convert an imported cell rendering. Empty or unparseable cells are
    /// absent, never errors.
    pub fn parse_cell(self, raw: &str) -> Option<Value> {
        if raw.trim().is_empty() {
            return None;
        }

        match self {
            Text => Some(Value::from(raw.to_string())),
            Double => parse_number(raw).map(Value::from),
            Boolean => parse_bool(raw).map(Value::from),
            Timestamp => parse_date(raw).map(Value::from),
            Role => parse_role(raw).map(|role| Value::from(role.to_string())),
            Serial => None,
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_role(raw: &str) -> Option<&'static str> {
    let wanted = raw.trim().to_lowercase();
    COMPANY_ROLES.into_iter().find(|role| *role == wanted)
}

/// Build a partial row from an API request body
pub fn row_from_json(table: Table, body: &Map<String, JsonValue>) -> Result<PartialRow> {
    let mut row = PartialRow::new();

    for (key, value) in body {
        let def = table.writable_column(key).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unknown column '{}' for table '{}'",
                key,
                table.name()
            ))
        })?;
        row.insert(def.name.to_string(), def.kind.from_json(def.name, value)?);
    }

    Ok(row)
}

/// Build a partial row from an imported row, reading every writable column
/// through the case-insensitive lookup
pub fn row_from_cells(table: Table, cells: &Map<String, JsonValue>) -> PartialRow {
    table
        .writable_columns()
        .map(|def| {
            let raw = fields::lookup(cells, def.name);
            (def.name.to_string(), def.kind.parse_cell(&raw))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_table_names_round_trip() {
        for table in Table::ALL {
            assert_eq!(Table::from_name(table.name()).unwrap(), table);
        }
    }

    #[test]
    fn test_unknown_table_is_bad_request() {
        let err = Table::from_name("users").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_sheet_names_are_case_insensitive() {
        assert_eq!(
            Table::from_sheet_name("Company Accounts"),
            Some(Table::CompanyAccounts)
        );
        assert_eq!(Table::from_sheet_name("PANELS"), Some(Table::Panels));
        assert_eq!(Table::from_sheet_name("Sheet1"), None);
    }

    #[test]
    fn test_panel_projection_includes_panel_type() {
        let names: Vec<&str> = Table::Panels.columns().iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 19);
        assert_eq!(names.first(), Some(&"no_pp"));
        assert_eq!(names.last(), Some(&"panel_type"));
    }

    #[test]
    fn test_conflict_targets() {
        assert_eq!(Table::Companies.conflict_target(), ["id"]);
        assert_eq!(Table::CompanyAccounts.conflict_target(), ["username"]);
        assert_eq!(Table::Panels.conflict_target(), ["no_pp"]);
        for child in [Table::Busbars, Table::Components, Table::Palet, Table::Corepart] {
            assert_eq!(child.conflict_target(), ["panel_no_pp", "vendor"]);
        }
    }

    #[test]
    fn test_missing_required_columns() {
        let mut row = PartialRow::new();
        row.insert("id".to_string(), Some(Value::from("acme".to_string())));
        row.insert("name".to_string(), None);

        assert_eq!(Table::Companies.missing_required(&row), ["name", "role"]);
        assert_eq!(Table::Panels.missing_required(&PartialRow::new()), ["no_pp"]);

        let mut panel = PartialRow::new();
        panel.insert("no_pp".to_string(), Some(Value::from("P1".to_string())));
        assert!(Table::Panels.missing_required(&panel).is_empty());
    }

    #[test]
    fn test_serial_id_is_not_writable() {
        assert!(Table::Busbars.column("id").is_some());
        assert!(Table::Busbars.writable_column("id").is_none());
    }

    #[test]
    fn test_row_from_json_types_values() {
        let row = row_from_json(
            Table::Panels,
            &object(json!({
                "no_pp": "P1",
                "percent_progress": 42.5,
                "is_closed": false,
                "start_date": "04-Aug-2025",
                "project": null,
            })),
        )
        .unwrap();

        assert_eq!(row["no_pp"], Some(Value::from("P1".to_string())));
        assert_eq!(row["percent_progress"], Some(Value::from(42.5)));
        assert_eq!(row["is_closed"], Some(Value::from(false)));
        assert_eq!(
            row["start_date"],
            Some(Value::from(Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap()))
        );
        assert_eq!(row["project"], None);
    }

    #[test]
    fn test_row_from_json_rejects_unknown_column() {
        let err = row_from_json(Table::Busbars, &object(json!({ "colour": "red" }))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("colour")));
    }

    #[test]
    fn test_row_from_json_rejects_bad_role() {
        let err = row_from_json(
            Table::Companies,
            &object(json!({ "id": "x", "name": "X", "role": "owner" })),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_row_from_json_rejects_bad_date() {
        let err =
            row_from_json(Table::Panels, &object(json!({ "start_date": "someday" }))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_row_from_cells_is_lenient() {
        let row = row_from_cells(
            Table::Panels,
            &object(json!({
                "No PP": 1001,
                "Percent Progress": "75%",
                "Start Date": "garbage",
                "Target Delivery": "8/4/2025",
                "Is Closed": "no",
            })),
        );

        assert_eq!(row["no_pp"], Some(Value::from("1001".to_string())));
        assert_eq!(row["percent_progress"], Some(Value::from(75.0)));
        assert_eq!(row["start_date"], None);
        assert_eq!(
            row["target_delivery"],
            Some(Value::from(Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap()))
        );
        assert_eq!(row["is_closed"], Some(Value::from(false)));
        assert_eq!(row["project"], None);
        assert_eq!(row.len(), Table::Panels.writable_columns().count());
    }

    #[test]
    fn test_row_from_cells_normalizes_role() {
        let row = row_from_cells(
            Table::Companies,
            &object(json!({ "ID": "gpe", "Name": "PT GPE", "Role": " K3 " })),
        );
        assert_eq!(row["role"], Some(Value::from("k3".to_string())));
    }
}
