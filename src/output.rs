use comfy_table::{ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde_json::Value;

pub struct Column {
    pub header: &'static str,
    pub path: &'static str,
    pub wide_only: bool,
}

impl Column {
    pub const fn new(header: &'static str, path: &'static str) -> Self {
        Self {
            header,
            path,
            wide_only: false,
        }
    }

    pub const fn wide(header: &'static str, path: &'static str) -> Self {
        Self {
            header,
            path,
            wide_only: true,
        }
    }
}

fn extract_field(value: &Value, path: &str) -> String {
    let mut current = value;
    for key in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(key).unwrap_or(&Value::Null);
            }
            _ => return "-".to_string(),
        }
    }
    match current {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        other => other.to_string(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Renders `data` as json, yaml, or a table (`wide` includes wide-only columns).
pub fn render_to_string(data: &Value, columns: &[Column], format: &str) -> String {
    match format {
        "json" => serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string()),
        "yaml" => serde_yaml::to_string(data).unwrap_or_else(|_| data.to_string()),
        _ => {
            let wide = format == "wide";
            let active: Vec<&Column> = columns.iter().filter(|c| wide || !c.wide_only).collect();

            match data {
                Value::Array(items) if items.is_empty() => "None declared.".to_string(),
                Value::Array(items) => {
                    let mut table = new_table();
                    table.set_header(active.iter().map(|c| c.header).collect::<Vec<_>>());
                    for item in items {
                        table.add_row(
                            active
                                .iter()
                                .map(|c| extract_field(item, c.path))
                                .collect::<Vec<_>>(),
                        );
                    }
                    table.to_string()
                }
                Value::Object(_) => {
                    let mut table = new_table();
                    table.set_header(vec!["Field", "Value"]);
                    for col in &active {
                        table.add_row(vec![col.header.to_string(), extract_field(data, col.path)]);
                    }
                    table.to_string()
                }
                _ => serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string()),
            }
        }
    }
}

pub fn render(data: &Value, columns: &[Column], format: &str) {
    println!("{}", render_to_string(data, columns, format));
}

pub fn print_heading(msg: &str) {
    use colored::Colorize;
    println!("{}", msg.bold());
}

pub fn print_success(msg: &str) {
    use colored::Colorize;
    println!("{}", msg.green());
}

pub fn print_error(msg: &str) {
    use colored::Colorize;
    eprintln!("{}", msg.red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLUMNS: &[Column] = &[
        Column::new("Name", "name"),
        Column::new("Required", "required"),
        Column::wide("Note", "meta.note"),
    ];

    #[test]
    fn extracts_nested_and_missing_fields() {
        let v = json!({"a": {"b": 3}, "s": "", "t": true});
        assert_eq!(extract_field(&v, "a.b"), "3");
        assert_eq!(extract_field(&v, "a.c"), "-");
        assert_eq!(extract_field(&v, "s"), "-");
        assert_eq!(extract_field(&v, "t"), "yes");
        assert_eq!(extract_field(&v, "a.b.c"), "-");
    }

    #[test]
    fn table_hides_wide_columns_unless_asked() {
        let rows = json!([{"name": "who", "required": false, "meta": {"note": "hidden"}}]);
        let narrow = render_to_string(&rows, COLUMNS, "table");
        assert!(narrow.contains("who"));
        assert!(!narrow.contains("hidden"));
        let wide = render_to_string(&rows, COLUMNS, "wide");
        assert!(wide.contains("hidden"));
    }

    #[test]
    fn empty_list_and_json_formats() {
        assert_eq!(render_to_string(&json!([]), COLUMNS, "table"), "None declared.");
        let out = render_to_string(&json!({"a": 1}), COLUMNS, "json");
        assert_eq!(out, "{\n  \"a\": 1\n}");
        let out = render_to_string(&json!({"a": 1}), COLUMNS, "yaml");
        assert_eq!(out.trim(), "a: 1");
    }
}
