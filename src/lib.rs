//! # logsift
//!
//! An interactive terminal viewer for line-delimited JSON application
//! logs. Paste or pipe log text in, then filter, page through, and
//! drill into individual records.
//!
//! ## Overview
//!
//! Each input line is decoded as one JSON object; `level`, `timestamp`
//! and `message` are promoted to record fields and everything else
//! (minus a fixed set of routing identifiers) lands in a sorted detail
//! bag. The viewer is a single-threaded state machine over four modes:
//!
//! - **Input**: paste area for raw log text
//! - **Browsing**: navigate, expand, and filter records
//! - **RegexEntry**: comma-separated exclusion patterns
//! - **FullDetail**: full-screen scroll over one record's details
//!
//! Pagination is a greedy, variable-height forward fill recomputed on
//! every frame: a collapsed record costs one line, an expanded one
//! also pays for its wrapped detail block, and a record that does not
//! fully fit is left for the next page.
//!
//! ## Remote fetch
//!
//! [`source::RawLogSource`] is the boundary to an optional remote
//! fetch path: a workflow name in, raw log text out. The shipped
//! [`source::CommandSource`] delegates to an external command, so
//! tokens and endpoints never enter the viewer.

pub mod app;
pub mod detail;
pub mod filter;
pub mod pager;
pub mod record;
pub mod source;
pub mod theme;

pub use filter::{FilterState, compile_exclude_patterns, filtered_indices};
pub use record::{LogRecord, ParseOutcome, parse_records};
pub use source::{CommandSource, RawLogSource};
