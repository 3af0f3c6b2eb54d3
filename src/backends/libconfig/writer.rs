use super::{Group, Scalar, Setting};
use crate::convert::ValueKind;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render a top-level group as libconfig text
pub fn render_document(group: &Group) -> String {
    let mut out = String::new();
    render_group_body(&mut out, group, 0);
    out
}

fn render_group_body(out: &mut String, group: &Group, depth: usize) {
    for (name, setting) in group {
        let pad = INDENT.repeat(depth);
        match setting {
            Setting::Group(children) => {
                let _ = writeln!(out, "{}{} :", pad, name);
                let _ = writeln!(out, "{}{{", pad);
                render_group_body(out, children, depth + 1);
                let _ = writeln!(out, "{}}};", pad);
            }
            other => {
                let _ = write!(out, "{}{} = ", pad, name);
                render_value(out, other, depth);
                out.push_str(";\n");
            }
        }
    }
}

fn render_value(out: &mut String, setting: &Setting, depth: usize) {
    match setting {
        Setting::Scalar(scalar) => out.push_str(&render_scalar(scalar)),
        Setting::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_scalar).collect();
            let _ = write!(out, "[{}]", rendered.join(", "));
        }
        Setting::List(items) if items.iter().all(|i| matches!(i, Setting::Scalar(_))) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(out, item, depth);
            }
            out.push(')');
        }
        Setting::List(items) => {
            let pad = INDENT.repeat(depth + 1);
            out.push_str("(\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&pad);
                render_value(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            let _ = write!(out, "{})", INDENT.repeat(depth));
        }
        Setting::Group(children) => {
            out.push_str("{\n");
            render_group_body(out, children, depth + 1);
            let _ = write!(out, "{}}}", INDENT.repeat(depth));
        }
    }
}

pub fn render_scalar(scalar: &Scalar) -> String {
    match scalar.kind {
        ValueKind::String => quote(&scalar.text),
        ValueKind::Float => {
            let text = scalar.text.trim();
            if text.contains(['.', 'e', 'E']) {
                text.to_string()
            } else {
                format!("{}.0", text)
            }
        }
        ValueKind::Integer | ValueKind::Boolean => scalar.text.clone(),
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
