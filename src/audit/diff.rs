//! Human-readable change summaries for audit entries

use serde_json::Value;

const MAX_STRING_LEN: usize = 50;

/// Summarize the top-level differences between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let changed_or_removed = before_obj.iter().filter_map(|(key, old)| {
                match after_obj.get(key) {
                    Some(new) if new == old => None,
                    Some(new) => Some(format!("{}: {} -> {}", key, format_value(old), format_value(new))),
                    None => Some(format!("{}: {} -> (removed)", key, format_value(old))),
                }
            });
            let added = after_obj
                .iter()
                .filter(|(key, _)| !before_obj.contains_key(*key))
                .map(|(key, new)| format!("{}: (added) -> {}", key, format_value(new)));

            changed_or_removed.chain(added).collect::<Vec<_>>()
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renamed_account() {
        let before = json!({"id": 1, "name": "Checking", "tags": ["asset"]});
        let after = json!({"id": 1, "name": "Main Checking", "tags": ["asset"]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "name: \"Checking\" -> \"Main Checking\"");
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"desc": "old"});
        let after = json!({"tags": ["asset", "cash"]});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("desc: \"old\" -> (removed)"));
        assert!(diff.contains("tags: (added) -> [2 items]"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Test", "amount": 100});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_scalar_change() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
    }

    #[test]
    fn test_long_strings_are_truncated_on_char_boundaries() {
        let before = json!({"notes": "é".repeat(100)});
        let after = json!({"notes": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }
}
