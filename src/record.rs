use serde_json::Value;
use std::collections::BTreeMap;

/// keys promoted to record fields, plus routing identifiers that carry
/// no viewer value; none of these land in `details`
const EXCLUDED_KEYS: &[&str] = &[
    "level",
    "timestamp",
    "message",
    "jobName",
    "traceId",
    "requestId",
    "workflowId",
    "currentExecutedFlow",
];

/// placeholder for a promoted field that is absent from the source object
pub const ABSENT_FIELD: &str = "<none>";

/// one parsed log line: promoted fields plus an auxiliary detail bag
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: String,
    pub timestamp: String,
    pub message: String,
    pub details: BTreeMap<String, Value>,
    pub expanded: bool,
}

impl LogRecord {
    /// text the exclusion patterns are matched against
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.message, self.level, self.timestamp)
    }

    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }
}

/// result of parsing raw input
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<LogRecord>,
    /// non-blank lines that failed to decode as a JSON object
    pub skipped: usize,
}

/// stringify a promoted field with permissive conversion: a present
/// non-string value becomes its textual representation, an absent key
/// becomes the [`ABSENT_FIELD`] sentinel
fn promote_field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        None => ABSENT_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// parse newline-delimited JSON objects into records, preserving input
/// order; blank lines are ignored, undecodable lines are dropped and
/// only counted
pub fn parse_records(input: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(line) else {
            outcome.skipped += 1;
            continue;
        };

        let mut details = BTreeMap::new();
        for (key, value) in &map {
            if !EXCLUDED_KEYS.contains(&key.as_str()) {
                details.insert(key.clone(), value.clone());
            }
        }

        outcome.records.push(LogRecord {
            level: promote_field(&map, "level"),
            timestamp: promote_field(&map, "timestamp"),
            message: promote_field(&map, "message"),
            details,
            expanded: false,
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_valid_and_invalid_lines() {
        let input = concat!(
            r#"{"level":"ERROR","timestamp":"t1","message":"boom","code":500}"#,
            "\n",
            "not json\n",
            r#"{"level":"INFO","timestamp":"t2","message":"ok"}"#,
        );
        let outcome = parse_records(input);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 1);

        let first = &outcome.records[0];
        assert_eq!(first.level, "ERROR");
        assert_eq!(first.timestamp, "t1");
        assert_eq!(first.message, "boom");
        assert_eq!(first.details.len(), 1);
        assert_eq!(first.details["code"], serde_json::json!(500));

        let second = &outcome.records[1];
        assert_eq!(second.message, "ok");
        assert!(second.details.is_empty());
    }

    #[test]
    fn test_invalid_line_preserves_order_of_the_rest() {
        let input = concat!(
            r#"{"message":"a"}"#,
            "\n{{{broken\n",
            r#"{"message":"b"}"#,
            "\n",
            r#"{"message":"c"}"#,
        );
        let outcome = parse_records(input);
        let messages: Vec<&str> = outcome
            .records
            .iter()
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_blank_lines_are_ignored_not_counted() {
        let outcome = parse_records("\n   \n\t\n");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_non_object_json_is_dropped() {
        // valid JSON, but not an object
        let outcome = parse_records("42\n\"text\"\n[1,2]");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped, 3);
    }

    #[test]
    fn test_details_never_contain_promoted_or_routing_keys() {
        let input = r#"{"level":"INFO","timestamp":"t","message":"m","jobName":"j","traceId":"tr","requestId":"rq","workflowId":"wf","currentExecutedFlow":"f","custom":1,"other":"x"}"#;
        let outcome = parse_records(input);
        let record = &outcome.records[0];

        for key in EXCLUDED_KEYS {
            assert!(!record.details.contains_key(*key), "leaked key {key}");
        }
        assert_eq!(record.details.len(), 2);
        assert!(record.details.contains_key("custom"));
        assert!(record.details.contains_key("other"));
    }

    #[test]
    fn test_absent_fields_use_sentinel() {
        let outcome = parse_records(r#"{"extra":true}"#);
        let record = &outcome.records[0];
        assert_eq!(record.level, ABSENT_FIELD);
        assert_eq!(record.timestamp, ABSENT_FIELD);
        assert_eq!(record.message, ABSENT_FIELD);
    }

    #[test]
    fn test_present_non_string_fields_are_stringified() {
        let outcome =
            parse_records(r#"{"level":7,"timestamp":null,"message":{"nested":true}}"#);
        let record = &outcome.records[0];
        assert_eq!(record.level, "7");
        assert_eq!(record.timestamp, "null");
        assert_eq!(record.message, r#"{"nested":true}"#);
    }

    #[test]
    fn test_searchable_text_joins_message_level_timestamp() {
        let outcome =
            parse_records(r#"{"level":"WARN","timestamp":"t9","message":"slow query"}"#);
        assert_eq!(outcome.records[0].searchable_text(), "slow query WARN t9");
    }
}
