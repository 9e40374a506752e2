use serde_json::Value;

use crate::chat::message::Row;

/// Tabular projection of result rows, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
}

/// Project rows into a table. Columns are the union of keys across all
/// rows in first-seen order; a row missing a column gets an empty cell.
/// Returns None for an empty row set, which renders no table at all.
pub fn project(rows: &[Row]) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }

    let mut header: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !header.iter().any(|h| h == key) {
                header.push(key.clone());
            }
        }
    }

    let body = rows
        .iter()
        .map(|row| {
            header
                .iter()
                .map(|col| row.get(col).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Some(Table { header, body })
}

/// Raw stringification: JSON strings unquoted, everything else as-is.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Table {
    pub fn to_display(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(String::len).collect();
        for row in &self.body {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.body {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        if i + 1 < cells.len() {
            for _ in cell.len()..widths[i] {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(json: &str) -> Vec<Row> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn header_and_body_follow_first_row_key_order() {
        let rows = rows(r#"[{"a":1,"b":2},{"a":3,"b":4}]"#);
        let table = project(&rows).unwrap();
        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.body, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn column_set_is_union_with_empty_fill() {
        let rows = rows(r#"[{"city":"Oslo"},{"city":"Bergen","sales":9}]"#);
        let table = project(&rows).unwrap();
        assert_eq!(table.header, vec!["city", "sales"]);
        assert_eq!(table.body[0], vec!["Oslo", ""]);
        assert_eq!(table.body[1], vec!["Bergen", "9"]);
    }

    #[test]
    fn strings_render_unquoted_and_scalars_raw() {
        let rows = rows(r#"[{"name":"Top 5","total":1200.5,"active":true,"gap":null}]"#);
        let table = project(&rows).unwrap();
        assert_eq!(table.body[0], vec!["Top 5", "1200.5", "true", "null"]);
    }

    #[test]
    fn empty_row_set_yields_no_table() {
        assert!(project(&[]).is_none());
    }

    #[test]
    fn display_pads_columns_to_widest_cell() {
        let rows = rows(r#"[{"city":"Oslo","sales":1},{"city":"Trondheim","sales":42}]"#);
        let rendered = project(&rows).unwrap().to_display();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "city       sales");
        assert_eq!(lines[1], "---------  -----");
        assert_eq!(lines[2], "Oslo       1");
        assert_eq!(lines[3], "Trondheim  42");
    }
}
