//! Downloadable import templates

use rust_xlsxwriter::{Format, Workbook};
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::services::tables::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    CompaniesAndAccounts,
    Operational,
}

impl Dataset {
    /// `companies_and_accounts` selects identities; any other name is operational
    pub fn from_name(name: &str) -> Self {
        match name {
            "companies_and_accounts" => Dataset::CompaniesAndAccounts,
            _ => Dataset::Operational,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::CompaniesAndAccounts => "companies_and_accounts",
            Dataset::Operational => "operational",
        }
    }

    pub fn tables(self) -> &'static [Table] {
        match self {
            Dataset::CompaniesAndAccounts => &[Table::Companies, Table::CompanyAccounts],
            Dataset::Operational => &[
                Table::Panels,
                Table::Busbars,
                Table::Components,
                Table::Palet,
                Table::Corepart,
            ],
        }
    }
}

/// Column headers of a template sheet. `panel_type` is accepted on import but
/// left out of the template.
pub fn template_columns(table: Table) -> Vec<&'static str> {
    table
        .writable_columns()
        .map(|def| def.name)
        .filter(|name| *name != "panel_type")
        .collect()
}

fn example_row(table: Table) -> Value {
    match table {
        Table::Companies => json!({ "id": "vendor_a", "name": "PT Vendor A", "role": "k3" }),
        Table::CompanyAccounts => json!({
            "username": "vendor_a_user",
            "password": "123",
            "company_id": "vendor_a",
        }),
        Table::Panels => json!({
            "no_pp": "PP-0001",
            "no_panel": "PNL-01",
            "no_wbs": "WBS-01",
            "project": "Example Project",
            "percent_progress": 25,
            "start_date": "04-Aug-2025",
            "target_delivery": "2025-09-01T00:00:00Z",
            "status_component": "Open",
            "vendor_id": "gpe,presisi",
            "is_closed": false,
        }),
        Table::Busbars => json!({
            "panel_no_pp": "PP-0001",
            "vendor": "gpe",
            "remarks": "PCC ready",
        }),
        Table::Components | Table::Palet | Table::Corepart => {
            json!({ "panel_no_pp": "PP-0001", "vendor": "presisi" })
        }
    }
}

/// Template as a document of the form `{sheet: [{column: value}]}`
pub fn json_template(dataset: Dataset) -> Value {
    let document: Map<String, Value> = dataset
        .tables()
        .iter()
        .map(|table| {
            let example = example_row(*table);
            let row: Map<String, Value> = template_columns(*table)
                .into_iter()
                .map(|column| {
                    let value = example.get(column).cloned().unwrap_or(Value::Null);
                    (column.to_string(), value)
                })
                .collect();
            (table.name().to_string(), Value::Array(vec![Value::Object(row)]))
        })
        .collect();

    Value::Object(document)
}

/// Template as an xlsx workbook with one sheet per table
pub fn workbook_template(dataset: Dataset) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in dataset.tables() {
        let example = example_row(*table);
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.name())?;

        for (col, column) in template_columns(*table).into_iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, column, &header_format)?;

            match example.get(column) {
                Some(Value::String(s)) => {
                    sheet.write_string(1, col, s)?;
                }
                Some(Value::Number(n)) => {
                    if let Some(f) = n.as_f64() {
                        sheet.write_number(1, col, f)?;
                    }
                }
                Some(Value::Bool(b)) => {
                    sheet.write_boolean(1, col, *b)?;
                }
                _ => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use std::io::Cursor;

    #[test]
    fn test_dataset_from_name() {
        assert_eq!(
            Dataset::from_name("companies_and_accounts"),
            Dataset::CompaniesAndAccounts
        );
        assert_eq!(Dataset::from_name("panels"), Dataset::Operational);
        assert_eq!(Dataset::from_name(""), Dataset::Operational);
    }

    #[test]
    fn test_panel_template_has_eighteen_columns() {
        let columns = template_columns(Table::Panels);
        assert_eq!(columns.len(), 18);
        assert_eq!(columns.first(), Some(&"no_pp"));
        assert_eq!(columns.last(), Some(&"closed_date"));
    }

    #[test]
    fn test_child_template_columns() {
        assert_eq!(
            template_columns(Table::Busbars),
            vec!["panel_no_pp", "vendor", "remarks"]
        );
        assert_eq!(template_columns(Table::Palet), vec!["panel_no_pp", "vendor"]);
    }

    #[test]
    fn test_identity_json_template() {
        let template = json_template(Dataset::CompaniesAndAccounts);
        let sheets = template.as_object().unwrap();

        assert_eq!(sheets.len(), 2);
        assert_eq!(template["companies"][0]["role"], "k3");
        assert_eq!(template["company_accounts"][0]["company_id"], "vendor_a");
    }

    #[test]
    fn test_operational_json_template() {
        let template = json_template(Dataset::Operational);
        let sheets = template.as_object().unwrap();

        assert_eq!(sheets.len(), 5);
        let panel = template["panels"][0].as_object().unwrap();
        assert_eq!(panel.len(), 18);
        assert_eq!(panel["no_pp"], "PP-0001");
        assert_eq!(panel["closed_date"], Value::Null);
        assert!(!panel.contains_key("panel_type"));
    }

    #[test]
    fn test_workbook_template_sheets() {
        let bytes = workbook_template(Dataset::Operational).unwrap();
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();

        assert_eq!(
            workbook.sheet_names(),
            vec!["panels", "busbars", "components", "palet", "corepart"]
        );

        let range = workbook.worksheet_range("panels").unwrap();
        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(header, template_columns(Table::Panels));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("PP-0001".to_string())));
    }
}
