//! Detail renderer: formats a record's auxiliary fields as a sorted,
//! styled, character-wrapped key/value block. The same formatting
//! serves the inline expansion under a record and the full-screen
//! detail view; only indent and wrapping width differ.

use crate::theme;
use ratatui::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// indent for the inline block under an expanded record
pub const INLINE_INDENT: usize = 4;
/// indent for the full-screen detail view
pub const FULL_INDENT: usize = 2;

fn value_span(value: &Value) -> Span<'static> {
    match value {
        Value::String(s) => Span::styled(format!("\"{s}\""), theme::STRING_STYLE),
        Value::Number(n) => Span::styled(n.to_string(), theme::NUMBER_STYLE),
        Value::Bool(b) => Span::styled(b.to_string(), theme::BOOL_STYLE),
        Value::Null => Span::styled("null".to_string(), theme::NULL_STYLE),
        // arrays and objects fall back to compact JSON text
        composite => Span::styled(
            serde_json::to_string(composite).unwrap_or_default(),
            theme::STRING_STYLE,
        ),
    }
}

fn entry_spans(key: &str, value: &Value, indent: usize) -> Vec<Span<'static>> {
    vec![
        Span::raw(" ".repeat(indent)),
        Span::styled(format!("\"{key}\""), theme::KEY_STYLE),
        Span::raw(": "),
        value_span(value),
    ]
}

/// hard character-count wrap of one styled line; no word-boundary
/// awareness, styles survive the split
fn wrap_spans(spans: Vec<Span<'static>>, width: u16) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(spans)];
    }

    let width = width as usize;
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_len = 0usize;

    for span in spans {
        let style = span.style;
        let mut chunk = String::new();
        for ch in span.content.chars() {
            chunk.push(ch);
            current_len += 1;
            if current_len == width {
                current.push(Span::styled(std::mem::take(&mut chunk), style));
                lines.push(Line::from(std::mem::take(&mut current)));
                current_len = 0;
            }
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}

/// deterministic key/value block: keys come out in lexicographic order
/// (the detail bag is a BTreeMap), each entry wrapped at `width`
pub fn detail_lines(
    details: &BTreeMap<String, Value>,
    width: u16,
    indent: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (key, value) in details {
        lines.extend(wrap_spans(entry_spans(key, value, indent), width));
    }
    lines
}

/// inline block rendered under an expanded record in the page
pub fn inline_lines(details: &BTreeMap<String, Value>, width: u16) -> Vec<Line<'static>> {
    detail_lines(details, width, INLINE_INDENT)
}

/// screen lines the inline block occupies; the pager charges this on
/// top of the record's own line
pub fn inline_line_count(details: &BTreeMap<String, Value>, width: u16) -> usize {
    inline_lines(details, width).len()
}

/// full-screen block shown in detail mode
pub fn full_lines(details: &BTreeMap<String, Value>, width: u16) -> Vec<Line<'static>> {
    detail_lines(details, width, FULL_INDENT)
}
