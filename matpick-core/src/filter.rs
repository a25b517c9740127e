//! Search filtering and the rendered-result cap
//!
//! Matching is a case-insensitive substring test against the display label
//! or the secondary (supplier) label. Results keep input order.

use crate::option::{OptionKeys, PickOption};

/// Upper bound on rows rendered in the result list
pub const MAX_RENDERED_RESULTS: usize = 100;

/// Whether `option` matches an already-lowercased query
fn matches_lowered(option: &PickOption, query_lower: &str, keys: &OptionKeys) -> bool {
    if option.label(keys).to_lowercase().contains(query_lower) {
        return true;
    }
    option
        .secondary(keys)
        .map(|secondary| secondary.to_lowercase().contains(query_lower))
        .unwrap_or(false)
}

/// Whether a single option matches `query`
pub fn option_matches(option: &PickOption, query: &str, keys: &OptionKeys) -> bool {
    query.is_empty() || matches_lowered(option, &query.to_lowercase(), keys)
}

/// Indices of all options matching `query`, in input order
pub fn filter_options(options: &[PickOption], query: &str, keys: &OptionKeys) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let query_lower = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| matches_lowered(option, &query_lower, keys))
        .map(|(index, _)| index)
        .collect()
}

/// Matches after the cap has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedMatches {
    /// Indices that will be rendered (at most `limit`)
    pub shown: Vec<usize>,
    /// Number of matches before capping
    pub total: usize,
}

impl CappedMatches {
    /// Whether some matches were left out
    pub fn is_truncated(&self) -> bool {
        self.total > self.shown.len()
    }
}

/// Keep the first `limit` matches and remember how many there were
pub fn cap_matches(mut matches: Vec<usize>, limit: usize) -> CappedMatches {
    let total = matches.len();
    matches.truncate(limit);
    CappedMatches {
        shown: matches,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn materials() -> Vec<PickOption> {
        vec![
            PickOption::record([("id", json!(1)), ("name", json!("Cement"))]),
            PickOption::record([("id", json!(2)), ("name", json!("Steel"))]),
            PickOption::record([
                ("id", json!(3)),
                ("name", json!("Gravel 20mm")),
                ("supplier_name", json!("Cemex Aggregates")),
            ]),
        ]
    }

    #[test]
    fn test_filter_case_insensitive() {
        let keys = OptionKeys::default();
        assert_eq!(filter_options(&materials(), "STEEL", &keys), vec![1]);
    }

    #[test]
    fn test_filter_matches_supplier_name() {
        let keys = OptionKeys::default();
        // "cem" hits Cement by label and Gravel by supplier
        assert_eq!(filter_options(&materials(), "cem", &keys), vec![0, 2]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let keys = OptionKeys::default();
        assert_eq!(filter_options(&materials(), "", &keys), vec![0, 1, 2]);
    }

    #[test]
    fn test_text_options() {
        let keys = OptionKeys::default();
        let options = vec![PickOption::text("North Site"), PickOption::text("South Site")];
        assert_eq!(filter_options(&options, "south", &keys), vec![1]);
        assert!(option_matches(&options[0], "", &keys));
    }

    #[test]
    fn test_cap_matches() {
        let capped = cap_matches((0..150).collect(), MAX_RENDERED_RESULTS);
        assert_eq!(capped.shown.len(), 100);
        assert_eq!(capped.total, 150);
        assert!(capped.is_truncated());

        let capped = cap_matches(vec![4, 9], MAX_RENDERED_RESULTS);
        assert_eq!(capped.shown, vec![4, 9]);
        assert!(!capped.is_truncated());
    }
}
