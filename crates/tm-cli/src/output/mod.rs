use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable value in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_table(serde_json::to_value(value)?)),
    }
}

/// Print a serializable value to stdout in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Arrays of objects become one row per item; a single object becomes a
/// key/value listing; anything else is a one-cell table.
fn render_table(value: Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let columns = column_names(&items);
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    columns
                        .iter()
                        .map(|column| map.get(column).map_or_else(|| "-".into(), cell))
                        .collect()
                })
                .collect::<Vec<Vec<String>>>();
            let headers = columns.iter().map(String::as_str).collect::<Vec<_>>();
            table::render(&headers, &rows)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render(&["value"], &rows)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render(&["field", "value"], &rows)
        }
        scalar => table::render(&["value"], &[vec![cell(&scalar)]]),
    }
}

/// Union of keys in first-seen order.
fn column_names(items: &[Value]) -> Vec<String> {
    let mut columns = Vec::<String>::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
        if !columns.contains(key) {
            columns.push(key.clone());
        }
    }
    columns
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        id: i64,
        role: &'static str,
    }

    #[test]
    fn json_is_pretty() {
        let out = render(&Row { id: 1, role: "dev" }, OutputFormat::Json).unwrap();
        assert!(out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["role"], "dev");
    }

    #[test]
    fn raw_is_one_line() {
        let out = render(&Row { id: 1, role: "dev" }, OutputFormat::Raw).unwrap();
        assert_eq!(out, r#"{"id":1,"role":"dev"}"#);
    }

    #[test]
    fn list_renders_one_row_per_item() {
        let rows = vec![Row { id: 1, role: "dev" }, Row { id: 20, role: "designer" }];
        let out = render(&rows, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("id") && lines[0].contains("role"));
        assert!(lines[3].contains("designer"));
    }

    #[test]
    fn empty_list_table() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn object_renders_field_value_pairs() {
        let out = render(&Row { id: 7, role: "dev" }, OutputFormat::Table).unwrap();
        assert!(out.lines().next().is_some_and(|l| l.starts_with("field")));
        assert!(out.contains("role"));
    }
}
