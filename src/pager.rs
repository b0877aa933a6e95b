//! Pager: greedy, variable-height, forward-fill page computation.
//! Recomputed on every render frame, never cached, so expansion
//! toggles and resizes need no invalidation step.

use crate::detail;
use crate::record::LogRecord;

/// screen lines a record consumes: one for itself, plus its wrapped
/// inline detail block when expanded
pub fn record_height(record: &LogRecord, width: u16) -> usize {
    if record.expanded && record.has_details() {
        1 + detail::inline_line_count(&record.details, width)
    } else {
        1
    }
}

/// contiguous run of record handles that fits in `budget` lines
/// starting at `offset` into the filtered sequence; a record that does
/// not fully fit is left out. The record at `offset` is always
/// included when one exists, so the page never starves even when the
/// budget is below its height.
pub fn build_page(
    records: &[LogRecord],
    filtered: &[usize],
    offset: usize,
    budget: usize,
    width: u16,
) -> Vec<usize> {
    let mut page = Vec::new();
    let mut used = 0usize;

    for &handle in filtered.iter().skip(offset) {
        let height = record_height(&records[handle], width);

        if page.is_empty() {
            // minimum viable page
            page.push(handle);
            if height > budget {
                break;
            }
            used = height;
            continue;
        }

        if used + height > budget {
            break;
        }
        page.push(handle);
        used += height;
    }

    page
}
