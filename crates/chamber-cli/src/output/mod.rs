use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print pre-rendered text (CSV, receipt documents) unchanged.
pub fn output_text(text: &str) {
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options());
    }

    let headers = column_order(items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()));
    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options())
}

/// Identifying columns first, then the rest alphabetically.
fn column_order<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut headers: Vec<String> = keys.cloned().collect();
    headers.sort_by_key(|key| {
        let lead = LEAD_COLUMNS.iter().position(|lead| *lead == key.as_str());
        (lead.unwrap_or(LEAD_COLUMNS.len()), key.clone())
    });
    headers.dedup();
    headers
}

const LEAD_COLUMNS: [&str; 5] = ["id", "number", "name", "title", "slug"];

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        verified: bool,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            id: "biz-1",
            verified: true,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "biz-1");
        assert_eq!(parsed["verified"], true);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            id: "biz-1",
            verified: false,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example {
            id: "biz-1",
            verified: true,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("verified"));
    }

    #[test]
    fn table_render_for_array_uses_union_of_keys() {
        let rows = vec![
            serde_json::json!({"id": "cat-1", "slug": "retail"}),
            serde_json::json!({"id": "cat-2", "name": "Services"}),
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header");
        assert!(header.contains("id") && header.contains("name") && header.contains("slug"));
        assert!(out.contains('-'));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let rows: Vec<Example> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn identifying_columns_lead() {
        let keys = ["verified", "slug", "address", "name", "id", "name"].map(String::from);
        assert_eq!(
            super::column_order(keys.iter()),
            vec!["id", "name", "slug", "address", "verified"]
        );
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(super::value_to_cell(&serde_json::Value::Null), "-");
    }
}
