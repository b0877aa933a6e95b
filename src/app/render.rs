use super::{App, INPUT_PLACEHOLDER, Mode};
use crate::{detail, pager, record::LogRecord, theme};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

// column where every message starts, regardless of header width
const MESSAGE_COLUMN: usize = 36;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.width = area.width;
        self.height = area.height;
        self.clamp_view();

        let lines = match &self.mode {
            Mode::Input { buffer, hint } => self.input_lines(buffer, hint.as_deref()),
            Mode::Browsing => self.browsing_lines(),
            Mode::RegexEntry { buffer } => self.regex_lines(buffer),
            Mode::FullDetail { lines, offset } => self.detail_view_lines(lines, *offset),
        };

        Paragraph::new(lines).render(area, buf);
    }
}

impl App {
    fn input_lines(&self, buffer: &str, hint: Option<&str>) -> Vec<Line<'static>> {
        let mut lines = vec![Line::styled("Paste Logs", theme::TITLE_STYLE), Line::default()];

        if buffer.is_empty() {
            let placeholder = hint.unwrap_or(INPUT_PLACEHOLDER);
            lines.push(Line::styled(placeholder.to_string(), theme::HINT_STYLE));
        } else {
            // show the tail of the buffer that fits above the footer
            let visible = self.page_budget().max(1);
            let buffered: Vec<&str> = buffer.lines().collect();
            let start = buffered.len().saturating_sub(visible);
            for raw in &buffered[start..] {
                lines.push(Line::from(raw.to_string()));
            }
        }

        lines.push(Line::default());
        lines.push(Line::styled(
            "(Enter = done, Esc = quit)",
            theme::HINT_STYLE,
        ));
        lines
    }

    fn browsing_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::styled("Log Viewer", theme::TITLE_STYLE), Line::default()];

        let filtered = self.filtered();
        let page = pager::build_page(
            &self.records,
            &filtered,
            self.offset,
            self.page_budget(),
            self.width,
        );

        if page.is_empty() {
            lines.push(Line::styled(
                "No logs match the selected filter.",
                theme::HINT_STYLE,
            ));
        }

        for (row, &handle) in page.iter().enumerate() {
            let record = &self.records[handle];
            lines.push(record_line(record, row == self.cursor));
            if record.expanded && record.has_details() {
                lines.extend(detail::inline_lines(&record.details, self.width));
            }
        }

        lines.push(Line::default());
        lines.push(self.footer_line());
        lines
    }

    fn regex_lines(&self, buffer: &str) -> Vec<Line<'static>> {
        vec![
            Line::styled("Exclude Logs by Regex", theme::TITLE_STYLE),
            Line::default(),
            Line::from(format!("> {buffer}")),
            Line::default(),
            Line::styled(
                "comma-separated patterns (Enter = apply, Esc = cancel)",
                theme::HINT_STYLE,
            ),
        ]
    }

    fn detail_view_lines(&self, lines: &[Line<'static>], offset: usize) -> Vec<Line<'static>> {
        let mut out = vec![
            Line::styled("Full Detail", theme::TITLE_STYLE),
            Line::default(),
        ];

        let start = offset.min(lines.len());
        let end = (start + self.detail_height()).min(lines.len());
        out.extend(lines[start..end].iter().cloned());

        out.push(Line::default());
        out.push(Line::styled("(↑↓ scroll, q/esc back)", theme::HINT_STYLE));
        out
    }

    fn footer_line(&self) -> Line<'static> {
        let mut status = String::new();
        if let Some(level) = &self.filter.level {
            status.push_str(&format!(" [level: {level}]"));
        }
        if !self.filter.exclude.is_empty() {
            status.push_str(&format!(" [exclude: {}]", self.filter.exclude.len()));
        }

        Line::styled(
            format!(
                "(q quit, ↑↓ scroll, ⏎/space expand, v detail, e/w/i/d/a filter, r regex){status}"
            ),
            theme::HINT_STYLE,
        )
    }
}

/// one record row: cursor prefix, expansion indicator, bracketed
/// timestamp and level, message aligned to a fixed column
fn record_line(record: &LogRecord, selected: bool) -> Line<'static> {
    let prefix = if selected { "> " } else { "  " };
    let indicator = if record.has_details() {
        if record.expanded { "⏷ " } else { "⏵ " }
    } else {
        "  "
    };

    let level = record.level.to_ascii_uppercase();
    let ts = format!("[{}]", record.timestamp);
    let lv = format!("[{level}]");
    let header_width =
        prefix.chars().count() + ts.chars().count() + lv.chars().count();
    let spacing = " ".repeat(MESSAGE_COLUMN.saturating_sub(header_width));
    let level_style = theme::level_style(&level);

    let mut spans = vec![Span::raw(prefix.to_string())];
    match level.as_str() {
        // alarming levels color the whole row
        "ERROR" | "WARN" | "WARNING" => spans.push(Span::styled(
            format!("{indicator}{ts}{lv}{spacing}{}", record.message),
            level_style,
        )),
        _ => {
            spans.push(Span::styled(
                format!("{indicator}{ts}"),
                theme::PLAIN_STYLE,
            ));
            spans.push(Span::styled(lv, level_style));
            spans.push(Span::styled(
                format!("{spacing}{}", record.message),
                theme::PLAIN_STYLE,
            ));
        }
    }

    let line = Line::from(spans);
    if selected {
        line.style(theme::SELECTED_STYLE)
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;

    fn sample_record(line: &str) -> LogRecord {
        parse_records(line).records.remove(0)
    }

    #[test]
    fn test_record_line_marks_cursor_and_expansion() {
        let mut record =
            sample_record(r#"{"level":"INFO","timestamp":"t1","message":"hello","k":1}"#);

        let text = record_line(&record, true).to_string();
        assert!(text.starts_with("> ⏵ [t1][INFO]"));
        assert!(text.ends_with("hello"));

        record.expanded = true;
        let text = record_line(&record, false).to_string();
        assert!(text.starts_with("  ⏷ "));
    }

    #[test]
    fn test_record_without_details_has_no_indicator() {
        let record = sample_record(r#"{"level":"INFO","timestamp":"t1","message":"m"}"#);
        let text = record_line(&record, false).to_string();
        assert!(text.starts_with("    [t1][INFO]"));
    }

    #[test]
    fn test_message_starts_at_fixed_column() {
        let short = sample_record(r#"{"level":"INFO","timestamp":"t","message":"msg"}"#);
        let text = record_line(&short, false).to_string();
        let column = text.char_indices().count() - "msg".chars().count();
        assert_eq!(column, MESSAGE_COLUMN + 2); // indicator sits before the header
    }
}
