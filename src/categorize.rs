//! Local categorization using the built-in rule table
use crate::assignment::CategoryAssignment;
use crate::rules::{CATEGORY_RULES, CategoryRule, OTHER_CATEGORY, first_match};
use crate::tab_data::{TabDescriptor, TabId};

/// Categorize tabs with the built-in rules.
///
/// Each tab goes to the first rule (in table order) with a pattern contained
/// in its lowercased URL; unmatched tabs go to "other", which is appended
/// last and only when non-empty. Pure and deterministic.
pub fn categorize_local(tabs: &[TabDescriptor]) -> CategoryAssignment {
    categorize_with_rules(CATEGORY_RULES, tabs)
}

/// Categorize tabs with an arbitrary rule table
pub fn categorize_with_rules(rules: &[CategoryRule], tabs: &[TabDescriptor]) -> CategoryAssignment {
    let mut categories = CategoryAssignment::new();
    let mut other: Vec<TabId> = Vec::new();

    for tab in tabs {
        match first_match(rules, &tab.url) {
            Some(rule) => categories.push(rule.name, tab.id),
            None => other.push(tab.id),
        }
    }

    for id in other {
        categories.push(OTHER_CATEGORY, id);
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tab(id: TabId, url: &str) -> TabDescriptor {
        TabDescriptor::new(id, &format!("Tab {}", id), url)
    }

    fn ids(tabs: &[TabDescriptor]) -> Vec<TabId> {
        tabs.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_categorize_local_end_to_end() {
        let tabs = vec![
            create_test_tab(1, "https://github.com/x"),
            create_test_tab(2, "https://youtube.com/watch?v=1"),
            create_test_tab(3, "https://coinbase.com/trade"),
        ];

        let result = categorize_local(&tabs);

        let expected: CategoryAssignment = vec![
            ("dev", vec![1]),
            ("video", vec![2]),
            ("finance", vec![3]),
        ]
        .into_iter()
        .collect();
        assert_eq!(result, expected);
        assert_eq!(result.get(OTHER_CATEGORY), None);
    }

    #[test]
    fn test_unmatched_tabs_go_to_other_last() {
        let tabs = vec![
            create_test_tab(1, "https://example.org"),
            create_test_tab(2, "https://github.com/rust-lang/rust"),
            create_test_tab(3, "https://example.net/page"),
            create_test_tab(4, "https://gitlab.com/group/project"),
        ];

        let result = categorize_local(&tabs);

        assert_eq!(result.names(), vec!["dev", "other"]);
        assert_eq!(result.get("dev"), Some(&[2, 4][..]));
        assert_eq!(result.get(OTHER_CATEGORY), Some(&[1, 3][..]));
    }

    #[test]
    fn test_result_is_partition_of_input() {
        let tabs = vec![
            create_test_tab(10, "https://www.reddit.com/r/rust"),
            create_test_tab(11, "https://stockx.com/sneakers"),
            create_test_tab(12, "https://docs.google.com/document/d/1"),
            create_test_tab(13, "https://example.com"),
            create_test_tab(14, "https://mail.google.com/mail/u/0"),
            create_test_tab(15, "https://www.bbc.com/news"),
            create_test_tab(16, "http://localhost:8080"),
            create_test_tab(17, "https://claude.ai/chat"),
        ];

        let result = categorize_local(&tabs);

        assert!(result.is_partition_of(&ids(&tabs)));
        assert_eq!(result.tab_count(), tabs.len());
    }

    #[test]
    fn test_idempotent() {
        let tabs = vec![
            create_test_tab(1, "https://www.netflix.com/browse"),
            create_test_tab(2, "https://www.amazon.com/dp/1"),
            create_test_tab(3, "https://example.com"),
        ];

        assert_eq!(categorize_local(&tabs), categorize_local(&tabs));
    }

    #[test]
    fn test_empty_input() {
        assert!(categorize_local(&[]).is_empty());
    }

    #[test]
    fn test_custom_rules_first_match_wins() {
        let rules = [
            CategoryRule { name: "work", patterns: &["corp", "jira"] },
            CategoryRule { name: "tickets", patterns: &["jira"] },
        ];
        let tabs = vec![
            create_test_tab(1, "https://JIRA.example.com/browse/X-1"),
            create_test_tab(2, "https://intranet.corp"),
        ];

        let result = categorize_with_rules(&rules, &tabs);

        assert_eq!(result.get("work"), Some(&[1, 2][..]));
        assert_eq!(result.get("tickets"), None);
    }
}
