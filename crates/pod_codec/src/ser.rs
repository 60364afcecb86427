//! Dictionary to text.

use pod_runtime::{Dict, List, Value};

use crate::escape::escape_into;

/// Serialize a dictionary to its compact text form. Never fails: shapes
/// without a Render capability come out as the literal string
/// `"Unknown Type"`.
pub fn to_text(dict: &Dict) -> String {
    let mut out = String::with_capacity(dict.len() * 16 + 2);
    write_dict(dict, &mut out);
    out
}

fn write_dict(dict: &Dict, out: &mut String) {
    out.push('{');
    for (i, (key, value)) in dict.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        escape_into(key, out);
        out.push_str("\":");
        write_value(value, out);
    }
    out.push('}');
}

fn write_list(list: &List, out: &mut String) {
    out.push('[');
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(item, out);
    }
    out.push(']');
}

fn write_value(value: &Value, out: &mut String) {
    if let Some(dict) = value.as_dict() {
        write_dict(dict, out);
        return;
    }
    if let Some(list) = value.as_list() {
        write_list(list, out);
        return;
    }
    if let Some(text) = value.as_text() {
        out.push('"');
        escape_into(text, out);
        out.push('"');
        return;
    }
    // Scalars answer the Render selector with their literal form; anything
    // that does not is emitted as the documented lossy fallback.
    if !value.render_into(out) {
        out.push_str("\"Unknown Type\"");
    }
}
