//! Pattern matching used to classify accounts and transactions

/// Whether `tags` contains every `+`-separated sub-tag of `pattern`
///
/// Sub-tags are trimmed and compared exactly: `"taxable + liquid"` needs both
/// `taxable` and `liquid`.
pub fn has_all_tags<S: AsRef<str>>(tags: &[S], pattern: &str) -> bool {
    pattern
        .split('+')
        .map(str::trim)
        .all(|wanted| tags.iter().any(|t| t.as_ref() == wanted))
}

/// Whether `label` starts with any `|`-separated alternative of `pattern`
pub fn matches_prefix(label: &str, pattern: &str) -> bool {
    pattern.split('|').any(|prefix| label.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_conjunction() {
        let tags = ["asset", "taxable"];
        assert!(!has_all_tags(&tags, "taxable+liquid"));
        assert!(has_all_tags(&tags, "taxable"));
        assert!(has_all_tags(&tags, "asset"));
        assert!(has_all_tags(&["asset", "taxable", "liquid"], "taxable + liquid"));
    }

    #[test]
    fn test_tags_are_exact() {
        assert!(!has_all_tags(&["Cash"], "cash"));
        assert!(!has_all_tags(&["cash-ish"], "cash"));
    }

    #[test]
    fn test_prefix_alternatives() {
        assert!(matches_prefix("Taxes/Federal", "Taxes/"));
        assert!(matches_prefix("Home/HOA", "Home/Mortgage Interest|Home/HOA"));
        assert!(!matches_prefix("Home/Repairs", "Home/Mortgage Interest|Home/HOA"));
        assert!(!matches_prefix("Other Taxes/Federal", "Taxes/"));
    }
}
