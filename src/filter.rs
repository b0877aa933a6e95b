use crate::record::LogRecord;
use regex::Regex;

/// active view filter: an optional level token plus pre-compiled
/// exclusion patterns
#[derive(Debug, Default, Clone)]
pub struct FilterState {
    /// None means no level filtering
    pub level: Option<String>,
    /// a record is excluded when ANY pattern matches its searchable text
    pub exclude: Vec<Regex>,
}

impl FilterState {
    pub fn set_level(&mut self, token: &str) {
        self.level = Some(token.to_string());
    }

    pub fn clear(&mut self) {
        self.level = None;
        self.exclude.clear();
    }

    fn passes(&self, record: &LogRecord) -> bool {
        if let Some(level) = &self.level
            && !record.level.eq_ignore_ascii_case(level)
        {
            return false;
        }

        // the combined text catches patterns spanning fields, the
        // per-field checks keep anchors ($, ^) usable on each field
        let searchable = record.searchable_text();
        !self.exclude.iter().any(|re| {
            re.is_match(&searchable)
                || re.is_match(&record.message)
                || re.is_match(&record.level)
                || re.is_match(&record.timestamp)
        })
    }
}

/// pure filtering pass: indices of the records that survive the filter,
/// in their original relative order
pub fn filtered_indices(records: &[LogRecord], filter: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.passes(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// compile a comma-separated pattern list; fragments that fail to
/// compile are dropped and reported separately so the silent-drop
/// behavior stays verifiable
pub fn compile_exclude_patterns(input: &str) -> (Vec<Regex>, Vec<String>) {
    let mut patterns = Vec::new();
    let mut rejected = Vec::new();

    for fragment in input.split(',') {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        match Regex::new(fragment) {
            Ok(re) => patterns.push(re),
            Err(_) => rejected.push(fragment.to_string()),
        }
    }

    (patterns, rejected)
}
