use serde::Serialize;
use tab_core::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Rows read from a cursor, ready to print.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// A one-column listing (table names, column names).
#[derive(Debug)]
pub struct ListResponse {
    pub header: &'static str,
    pub items: Vec<String>,
}

/// Render query rows in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_query(response: &QueryResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Raw => Ok(serde_json::to_string(response)?),
        OutputFormat::Table => {
            if response.columns.is_empty() {
                return Ok(String::from("(no columns)"));
            }
            let headers = response
                .columns
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>();
            let rows = response
                .rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect::<Vec<_>>();
            Ok(table::render_table(
                &headers,
                &rows,
                table::TableOptions::from_env(),
            ))
        }
    }
}

/// Render a one-column listing in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_list(response: &ListResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&response.items)?),
        OutputFormat::Raw => Ok(response.items.join("\n")),
        OutputFormat::Table => {
            let rows = response
                .items
                .iter()
                .map(|item| vec![item.clone()])
                .collect::<Vec<_>>();
            Ok(table::render_table(
                &[response.header],
                &rows,
                table::TableOptions::from_env(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tab_core::Value;

    use super::{ListResponse, QueryResponse, render_list, render_query};
    use crate::cli::OutputFormat;

    fn sample() -> QueryResponse {
        QueryResponse {
            columns: vec!["A_STRING".into(), "COL1".into()],
            rows: vec![
                vec![Value::from("b"), Value::from(20)],
                vec![Value::from("c"), Value::Null],
            ],
        }
    }

    #[test]
    fn json_render_keeps_columns_and_rows() {
        let out = render_query(&sample(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["columns"][1], "COL1");
        assert_eq!(parsed["rows"][0][1], 20);
        assert!(parsed["rows"][1][1].is_null());
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render_query(&sample(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["rows"][0][0], "b");
    }

    #[test]
    fn table_render_lists_headers_in_ordinal_order() {
        let out = render_query(&sample(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.find("A_STRING") < header.find("COL1"));
        assert!(out.contains("null"));
    }

    #[test]
    fn list_renders_one_item_per_line() {
        let response = ListResponse {
            header: "table",
            items: vec!["T1".into(), "T2".into()],
        };
        assert_eq!(
            render_list(&response, OutputFormat::Raw).expect("raw render"),
            "T1\nT2"
        );
        let table = render_list(&response, OutputFormat::Table).expect("table render");
        assert_eq!(table.lines().count(), 4);
    }
}
