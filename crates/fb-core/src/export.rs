//! Export emitters: field collection → JSON / standalone HTML.
//!
//! JSON is the collection serialized verbatim (struct order = key order).
//! HTML renders a small subset of kinds as live controls — text field,
//! checkbox, select — and degrades everything else to a label line. Both
//! documents are returned as strings; downloading is the host's job.

use crate::model::{FieldKind, FormField};
use std::fmt::Write;

/// Serialize the collection as pretty-printed JSON. An empty collection
/// yields the empty-array document.
#[must_use]
pub fn export_json(fields: &[FormField]) -> String {
    serde_json::to_string_pretty(fields).unwrap_or_else(|_| "[]".to_string())
}

/// Download filename for a JSON export, stamped by the caller.
#[must_use]
pub fn json_filename(timestamp_ms: u64) -> String {
    format!("form-{timestamp_ms}.json")
}

/// Download filename for an HTML export, stamped by the caller.
#[must_use]
pub fn html_filename(timestamp_ms: u64) -> String {
    format!("form-{timestamp_ms}.html")
}

/// Fields in reading order for rendered output: sorted by y, top first.
/// Ties keep collection order.
#[must_use]
pub fn preview_entries(fields: &[FormField]) -> Vec<FormField> {
    let mut ordered = fields.to_vec();
    ordered.sort_by(|a, b| a.y.total_cmp(&b.y));
    ordered
}

/// Emit a standalone HTML document for the collection.
#[must_use]
pub fn export_html(fields: &[FormField]) -> String {
    let mut body = String::with_capacity(1024);
    for field in preview_entries(fields) {
        emit_field(&mut body, &field);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generated Form</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; }}
        h1 {{ color: #333; }}
        .form-container {{ background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
    </style>
</head>
<body>
    <div class="form-container">
        <h1>Generated Form</h1>
        <div id="form-content">
{body}            <button type="button" onclick="submitForm()" style="background: #007bff; color: white; padding: 10px 20px; border: none; border-radius: 4px; cursor: pointer;">
                Submit
            </button>
        </div>
    </div>
    <script>
        function submitForm() {{
            alert('Form submitted!');
        }}
    </script>
</body>
</html>"#
    )
}

fn emit_field(out: &mut String, field: &FormField) {
    let label = escape_html(&field.label);
    let key = escape_html(&field.key);

    match field.kind {
        FieldKind::TextField => {
            let required = if field.required { " *" } else { "" };
            let placeholder = field
                .placeholder
                .as_deref()
                .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                r#"            <div style="margin-bottom: 16px;">
                <label style="display: block; margin-bottom: 4px; font-weight: bold;">{label}{required}</label>
                <input type="text" name="{key}"{placeholder} style="width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px;" />
            </div>"#
            );
        }
        FieldKind::Checkbox => {
            let _ = writeln!(
                out,
                r#"            <div style="margin-bottom: 16px;">
                <label style="display: flex; align-items: center;">
                    <input type="checkbox" name="{key}" style="margin-right: 8px;" />
                    {label}
                </label>
            </div>"#
            );
        }
        FieldKind::Select => {
            let _ = writeln!(
                out,
                r#"            <div style="margin-bottom: 16px;">
                <label style="display: block; margin-bottom: 4px; font-weight: bold;">{label}</label>
                <select name="{key}" style="width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px;">
                    <option value="">Select an option</option>"#
            );
            for option in &field.options {
                let option = escape_html(option);
                let _ = writeln!(
                    out,
                    r#"                    <option value="{option}">{option}</option>"#
                );
            }
            let _ = writeln!(
                out,
                r#"                </select>
            </div>"#
            );
        }
        _ => {
            let _ = writeln!(
                out,
                r#"            <div style="margin-bottom: 16px;">{label}</div>"#
            );
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::descriptor_by_id;
    use crate::id::FieldId;
    use crate::model::Position;
    use pretty_assertions::assert_eq;

    fn field(kind_tag: &str, suffix: &str, y: f32) -> FormField {
        descriptor_by_id(kind_tag).unwrap().instantiate(
            FieldId::intern(&format!("{kind_tag}-{suffix}")),
            format!("{kind_tag}_{suffix}"),
            Position::new(0.0, y),
        )
    }

    #[test]
    fn empty_collection_exports_empty_array() {
        assert_eq!(export_json(&[]), "[]");
    }

    #[test]
    fn empty_html_contains_only_the_submit_control() {
        let html = export_html(&[]);
        assert!(html.contains("Submit"));
        assert!(!html.contains("<input type=\"text\""));
        assert!(!html.contains("<select"));
        assert!(!html.contains("<input type=\"checkbox\""));
    }

    #[test]
    fn json_roundtrips_through_serde() {
        let fields = vec![field("textfield", "j1", 0.0), field("select", "j2", 50.0)];
        let json = export_json(&fields);
        let parsed: Vec<FormField> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fields);
    }

    #[test]
    fn html_orders_fields_by_y() {
        let top = field("textfield", "top", 10.0);
        let bottom = field("checkbox", "bottom", 300.0);
        let html = export_html(&[bottom, top.clone()]);
        let first = html.find(&top.key).unwrap();
        let second = html.find("checkbox_bottom").unwrap();
        assert!(first < second, "lower-y field must render first");
    }

    #[test]
    fn unsupported_kinds_degrade_to_label_lines() {
        let html = export_html(&[field("table", "t1", 0.0)]);
        assert!(html.contains(">Table</div>"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn select_renders_its_options() {
        let mut select = field("select", "opt", 0.0);
        select.options = ["One", "Two"].iter().map(|s| s.to_string()).collect();
        let html = export_html(&[select]);
        assert!(html.contains(r#"<option value="One">One</option>"#));
        assert!(html.contains(r#"<option value="Two">Two</option>"#));
    }

    #[test]
    fn labels_are_escaped() {
        let mut f = field("textfield", "esc", 0.0);
        f.label = "<b>Name</b> & more".to_string();
        let html = export_html(&[f]);
        assert!(html.contains("&lt;b&gt;Name&lt;/b&gt; &amp; more"));
    }

    #[test]
    fn filenames_carry_the_timestamp() {
        assert_eq!(json_filename(1700000000000), "form-1700000000000.json");
        assert_eq!(html_filename(1700000000000), "form-1700000000000.html");
    }
}
