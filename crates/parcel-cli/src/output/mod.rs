use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_value_table(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_rows(items)),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["field", "value"], &rows, options()))
        }
        scalar => Ok(table::render_table(&["value"], &[vec![cell(scalar)]], options())),
    }
}

/// Objects become one row each; columns are the sorted union of keys.
fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }
    headers.sort_unstable();

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&headers, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
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
        parcel_id: &'static str,
        grade: &'static str,
        reasons: Vec<&'static str>,
    }

    fn row() -> Row {
        Row {
            parcel_id: "mapo-101",
            grade: "S",
            reasons: vec!["priced within budget", "grade S"],
        }
    }

    #[test]
    fn json_render_is_pretty_and_parses() {
        let out = render(&row(), OutputFormat::Json).expect("json render");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed["parcel_id"], "mapo-101");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&row(), OutputFormat::Raw).expect("raw render");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_for_object_lists_fields() {
        let out = render(&row(), OutputFormat::Table).expect("table render");
        assert!(out.starts_with("field"));
        assert!(out.contains("priced within budget, grade S"));
    }

    #[test]
    fn table_for_array_sorts_columns() {
        let out = render(&vec![row(), row()], OutputFormat::Table).expect("table render");
        let header = out.lines().next().expect("header line");
        let columns: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(columns, vec!["grade", "parcel_id", "reasons"]);
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let rows: Vec<serde_json::Value> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).expect("render"), "(no rows)");
    }
}
