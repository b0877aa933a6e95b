//! View state machine and event loop. One input event is fully
//! processed, then a fresh frame is rendered, before the next event is
//! accepted; all state is owned by this single loop.

use crate::{
    detail,
    filter::{self, FilterState},
    pager,
    record::{self, LogRecord},
};
use anyhow::{Result, anyhow};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend, prelude::*};
use std::io;
use std::time::Duration;

mod events;
mod render;

// fixed chrome around the page: title + blank above, blank + footer below
const CHROME_LINES: u16 = 4;
const EVENT_POLL_INTERVAL_MS: u64 = 100;

const INPUT_PLACEHOLDER: &str = "Paste logs here and press Enter when done...";
const EMPTY_PARSE_HINT: &str = "No valid logs found. Try again.";
const EMPTY_INPUT_HINT: &str = "Paste some logs first.";

/// interaction mode; each variant carries only the state that is
/// meaningful inside it
pub enum Mode {
    /// capture raw text to parse
    Input {
        buffer: String,
        hint: Option<String>,
    },
    /// navigate and filter parsed records
    Browsing,
    /// capture comma-separated exclusion patterns
    RegexEntry { buffer: String },
    /// full-screen scroll over one record's detail block
    FullDetail {
        lines: Vec<Line<'static>>,
        offset: usize,
    },
}

pub struct App {
    mode: Mode,
    records: Vec<LogRecord>,
    filter: FilterState,
    /// index into the current page
    cursor: usize,
    /// index into the filtered sequence of the first page-eligible record
    offset: usize,
    width: u16,
    height: u16,
    is_exiting: bool,
}

/// run the viewer; `records` pre-loaded from a pipe or remote fetch
/// skips Input mode entirely
pub fn start(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    records: Option<Vec<LogRecord>>,
) -> Result<()> {
    color_eyre::install().or(Err(anyhow!("error installing color_eyre")))?;

    let mut app = match records {
        Some(records) => App::with_records(records),
        None => App::new(),
    };

    let size = terminal.size()?;
    app.width = size.width;
    app.height = size.height;

    app.run(terminal)
}

// ============================================================================
// Initialization and lifecycle
// ============================================================================
impl App {
    fn new() -> Self {
        Self {
            mode: Mode::Input {
                buffer: String::new(),
                hint: None,
            },
            records: Vec::new(),
            filter: FilterState::default(),
            cursor: 0,
            offset: 0,
            width: 0,
            height: 0,
            is_exiting: false,
        }
    }

    fn with_records(records: Vec<LogRecord>) -> Self {
        let mut app = Self::new();
        app.records = records;
        app.mode = Mode::Browsing;
        app
    }

    fn run(mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.is_exiting {
            if event::poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Paste(text) => self.handle_paste(&text),
                    Event::Resize(width, height) => {
                        log::debug!("terminal resized to {width}x{height}");
                        self.width = width;
                        self.height = height;
                    }
                    _ => {}
                }
            }

            terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
        }

        Ok(())
    }
}

// ============================================================================
// Derived view data
// ============================================================================
impl App {
    /// lines available to the page after the fixed chrome
    fn page_budget(&self) -> usize {
        self.height.saturating_sub(CHROME_LINES) as usize
    }

    /// lines visible in full-detail mode
    fn detail_height(&self) -> usize {
        self.height.saturating_sub(CHROME_LINES) as usize
    }

    fn filtered(&self) -> Vec<usize> {
        filter::filtered_indices(&self.records, &self.filter)
    }

    fn current_page(&self) -> Vec<usize> {
        let filtered = self.filtered();
        pager::build_page(
            &self.records,
            &filtered,
            self.offset,
            self.page_budget(),
            self.width,
        )
    }

    /// pull cursor, offset and the detail scroll back inside bounds;
    /// runs before every frame so a resize or filter change needs no
    /// separate invalidation
    fn clamp_view(&mut self) {
        let filtered = self.filtered();
        self.offset = self.offset.min(filtered.len());

        let page = pager::build_page(
            &self.records,
            &filtered,
            self.offset,
            self.page_budget(),
            self.width,
        );
        self.cursor = if page.is_empty() {
            0
        } else {
            self.cursor.min(page.len() - 1)
        };

        let visible = self.height.saturating_sub(CHROME_LINES) as usize;
        if let Mode::FullDetail { lines, offset } = &mut self.mode {
            *offset = (*offset).min(lines.len().saturating_sub(visible));
        }
    }
}

// ============================================================================
// Browsing operations
// ============================================================================
impl App {
    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else {
            self.offset = self.offset.saturating_sub(1);
        }
    }

    fn move_down(&mut self) {
        let filtered = self.filtered();
        let page = pager::build_page(
            &self.records,
            &filtered,
            self.offset,
            self.page_budget(),
            self.width,
        );
        if page.is_empty() {
            return;
        }

        if self.cursor + 1 < page.len() {
            self.cursor += 1;
        } else if self.offset + page.len() < filtered.len() {
            // scroll by one, not by a page
            self.offset += 1;
        }
    }

    /// flip expansion on the record under the cursor only
    fn toggle_expand(&mut self) {
        let page = self.current_page();
        if let Some(&handle) = page.get(self.cursor) {
            self.records[handle].expanded = !self.records[handle].expanded;
        }
    }

    /// enter full-detail mode for the record under the cursor; no-op
    /// when it has no details
    fn open_detail(&mut self) {
        let page = self.current_page();
        let Some(&handle) = page.get(self.cursor) else {
            return;
        };
        let record = &self.records[handle];
        if !record.has_details() {
            return;
        }

        let lines = detail::full_lines(&record.details, self.width);
        self.mode = Mode::FullDetail { lines, offset: 0 };
    }

    /// any filter change returns to the top and collapses everything
    fn reset_view(&mut self) {
        self.cursor = 0;
        self.offset = 0;
        for record in &mut self.records {
            record.expanded = false;
        }
    }

    fn set_level_filter(&mut self, token: &str) {
        self.reset_view();
        self.filter.set_level(token);
        log::debug!("level filter set to {token}");
    }

    fn clear_filters(&mut self) {
        self.reset_view();
        self.filter.clear();
    }

    fn enter_regex_entry(&mut self) {
        self.reset_view();
        self.mode = Mode::RegexEntry {
            buffer: String::new(),
        };
    }
}

// ============================================================================
// Mode transitions with data
// ============================================================================
impl App {
    fn submit_input(&mut self) {
        let Mode::Input { buffer, .. } = &self.mode else {
            return;
        };

        if buffer.trim().is_empty() {
            self.mode = Mode::Input {
                buffer: String::new(),
                hint: Some(EMPTY_INPUT_HINT.to_string()),
            };
            return;
        }

        let outcome = record::parse_records(buffer);
        if outcome.records.is_empty() {
            // non-trivial input with zero valid records: re-prompt
            self.mode = Mode::Input {
                buffer: String::new(),
                hint: Some(EMPTY_PARSE_HINT.to_string()),
            };
            return;
        }

        log::debug!(
            "parsed {} records ({} lines skipped)",
            outcome.records.len(),
            outcome.skipped
        );
        self.records = outcome.records;
        self.reset_view();
        self.mode = Mode::Browsing;
    }

    fn apply_exclude_patterns(&mut self) {
        let Mode::RegexEntry { buffer } = &self.mode else {
            return;
        };

        let (patterns, rejected) = filter::compile_exclude_patterns(buffer);
        if !rejected.is_empty() {
            log::debug!("dropped {} invalid exclusion patterns", rejected.len());
        }
        self.filter.exclude = patterns;
        self.reset_view();
        self.mode = Mode::Browsing;
    }

    fn handle_paste(&mut self, text: &str) {
        match &mut self.mode {
            Mode::Input { buffer, hint } => {
                buffer.push_str(text);
                *hint = None;
            }
            Mode::RegexEntry { buffer } => buffer.push_str(text),
            _ => {}
        }
    }
}
