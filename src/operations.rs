//! Tab operations: duplicates, group planning, ungrouping, status text

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::assignment::CategoryAssignment;
use crate::tab_data::{TabId, TabInfo};

/// Tab group colours supported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    pub const ALL: [GroupColor; 9] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
        GroupColor::Orange,
    ];

    /// Name the host API expects
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }

    /// Swatch shown next to a group in the popup
    pub fn css_color(&self) -> &'static str {
        match self {
            GroupColor::Grey => "#888",
            GroupColor::Blue => "#4a9eff",
            GroupColor::Red => "#f87171",
            GroupColor::Yellow => "#f9a826",
            GroupColor::Green => "#4ade80",
            GroupColor::Pink => "#f472b6",
            GroupColor::Purple => "#a78bfa",
            GroupColor::Cyan => "#22d3ee",
            GroupColor::Orange => "#fb923c",
        }
    }
}

/// One tab group to create
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPlan {
    pub title: String,
    pub color: GroupColor,
    pub tab_ids: Vec<TabId>,
}

/// Counts shown at the top of the popup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabStats {
    pub tabs: usize,
    pub duplicates: usize,
    pub groups: usize,
}

impl TabStats {
    pub fn collect(tabs: &[TabInfo], group_count: usize) -> TabStats {
        let (_, duplicate_ids) = make_tabs_unique(tabs);
        TabStats {
            tabs: tabs.len(),
            duplicates: duplicate_ids.len(),
            groups: group_count,
        }
    }
}

/// URL used for duplicate detection: the fragment is ignored
fn dedup_key(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// Make tabs unique by URL (keep first occurrence, ignore `#fragment`)
pub fn make_tabs_unique(tabs: &[TabInfo]) -> (Vec<TabInfo>, Vec<TabId>) {
    let mut seen_urls = HashSet::new();
    let mut keep_tabs = Vec::new();
    let mut remove_ids = Vec::new();

    for tab in tabs {
        let Some(key) = tab.url.as_deref().map(dedup_key).filter(|k| !k.is_empty()) else {
            continue;
        };
        if seen_urls.insert(key) {
            keep_tabs.push(tab.clone());
        } else {
            remove_ids.push(tab.id);
        }
    }

    (keep_tabs, remove_ids)
}

/// Ids of tabs that currently belong to a group
pub fn grouped_tab_ids(tabs: &[TabInfo]) -> Vec<TabId> {
    tabs.iter().filter(|t| t.is_grouped()).map(|t| t.id).collect()
}

/// Turn an assignment into groups to create, colours cycling through `colors`
pub fn plan_groups(assignment: &CategoryAssignment, colors: &[GroupColor]) -> Vec<GroupPlan> {
    let palette: &[GroupColor] = if colors.is_empty() { &GroupColor::ALL } else { colors };

    assignment
        .iter()
        .filter(|(_, ids)| !ids.is_empty())
        .enumerate()
        .map(|(i, (name, ids))| GroupPlan {
            title: name.to_string(),
            color: palette[i % palette.len()],
            tab_ids: ids.to_vec(),
        })
        .collect()
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

pub fn organized_message(tab_count: usize, group_count: usize) -> String {
    format!("Organized {} into {} ✨", plural(tab_count, "tab"), plural(group_count, "group"))
}

pub fn not_enough_tabs_message() -> String {
    "Not enough tabs to organize! 😸".to_string()
}

pub fn remote_fallback_message(reason: &str) -> String {
    format!("AI failed: {} — using local mode", reason)
}

pub fn closed_duplicates_message(count: usize) -> String {
    format!("Closed {} 🧹", plural(count, "duplicate"))
}

pub fn ungrouped_message(count: usize) -> String {
    if count == 0 {
        "No groups to undo 😸".to_string()
    } else {
        format!("Ungrouped {} — back to normal 🐾", plural(count, "tab"))
    }
}

pub fn key_saved_message(len: Option<usize>) -> String {
    match len {
        Some(len) => format!("API key saved 🔑 ({} chars)", len),
        None => "API key cleared".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab_data::TAB_GROUP_ID_NONE;

    fn create_test_tab(id: TabId, url: &str, group_id: i32) -> TabInfo {
        TabInfo::new(id, Some(url.to_string()), format!("Tab {}", id), group_id)
    }

    #[test]
    fn test_make_tabs_unique() {
        let tabs = vec![
            create_test_tab(1, "https://google.com", TAB_GROUP_ID_NONE),
            create_test_tab(2, "https://github.com", TAB_GROUP_ID_NONE),
            create_test_tab(3, "https://google.com", TAB_GROUP_ID_NONE), // duplicate
            create_test_tab(4, "https://microsoft.com", TAB_GROUP_ID_NONE),
            create_test_tab(5, "https://github.com#readme", 3), // duplicate, fragment ignored
        ];

        let (keep, remove) = make_tabs_unique(&tabs);

        assert_eq!(keep.len(), 3);
        assert_eq!(remove, vec![3, 5]);
    }

    #[test]
    fn test_make_tabs_unique_skips_tabs_without_url() {
        let tabs = vec![
            TabInfo::new(1, None, "New Tab".to_string(), TAB_GROUP_ID_NONE),
            TabInfo::new(2, None, "New Tab".to_string(), TAB_GROUP_ID_NONE),
            create_test_tab(3, "https://google.com", TAB_GROUP_ID_NONE),
        ];

        let (keep, remove) = make_tabs_unique(&tabs);

        assert_eq!(keep.len(), 1);
        assert!(remove.is_empty());
    }

    #[test]
    fn test_make_tabs_unique_skips_fragment_only_urls() {
        let tabs = vec![
            create_test_tab(1, "#a", TAB_GROUP_ID_NONE),
            create_test_tab(2, "#b", TAB_GROUP_ID_NONE),
            create_test_tab(3, "#a", TAB_GROUP_ID_NONE),
            create_test_tab(4, "https://google.com", TAB_GROUP_ID_NONE),
        ];

        let (keep, remove) = make_tabs_unique(&tabs);

        assert_eq!(keep.iter().map(|t| t.id).collect::<Vec<_>>(), vec![4]);
        assert!(remove.is_empty());
        assert_eq!(TabStats::collect(&tabs, 0).duplicates, 0);
    }

    #[test]
    fn test_query_strings_are_not_duplicates() {
        let tabs = vec![
            create_test_tab(1, "https://youtube.com/watch?v=1", TAB_GROUP_ID_NONE),
            create_test_tab(2, "https://youtube.com/watch?v=2", TAB_GROUP_ID_NONE),
        ];

        let (_, remove) = make_tabs_unique(&tabs);

        assert!(remove.is_empty());
    }

    #[test]
    fn test_tab_stats() {
        let tabs = vec![
            create_test_tab(1, "https://google.com", TAB_GROUP_ID_NONE),
            create_test_tab(2, "https://google.com#a", 5),
            create_test_tab(3, "https://github.com", 5),
        ];

        let stats = TabStats::collect(&tabs, 1);

        assert_eq!(stats, TabStats { tabs: 3, duplicates: 1, groups: 1 });
    }

    #[test]
    fn test_grouped_tab_ids() {
        let tabs = vec![
            create_test_tab(1, "https://google.com", TAB_GROUP_ID_NONE),
            create_test_tab(2, "https://github.com", 7),
            create_test_tab(3, "https://rust-lang.org", 8),
        ];

        assert_eq!(grouped_tab_ids(&tabs), vec![2, 3]);
    }

    #[test]
    fn test_plan_groups_cycles_colors() {
        let assignment: CategoryAssignment = vec![
            ("dev", vec![1, 2]),
            ("video", vec![3]),
            ("other", vec![4]),
        ]
        .into_iter()
        .collect();

        let plans = plan_groups(&assignment, &[GroupColor::Blue, GroupColor::Red]);

        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].title, "dev");
        assert_eq!(plans[0].tab_ids, vec![1, 2]);
        assert_eq!(plans[0].color, GroupColor::Blue);
        assert_eq!(plans[1].color, GroupColor::Red);
        assert_eq!(plans[2].color, GroupColor::Blue);
    }

    #[test]
    fn test_plan_groups_empty_palette_uses_defaults() {
        let assignment: CategoryAssignment = vec![("dev", vec![1])].into_iter().collect();

        let plans = plan_groups(&assignment, &[]);

        assert_eq!(plans[0].color, GroupColor::Grey);
    }

    #[test]
    fn test_group_plan_serializes_for_host() {
        let plan = GroupPlan {
            title: "dev".to_string(),
            color: GroupColor::Cyan,
            tab_ids: vec![4, 5],
        };

        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json, serde_json::json!({"title": "dev", "color": "cyan", "tabIds": [4, 5]}));
    }

    #[test]
    fn test_messages() {
        assert_eq!(organized_message(5, 2), "Organized 5 tabs into 2 groups ✨");
        assert_eq!(organized_message(2, 1), "Organized 2 tabs into 1 group ✨");
        assert_eq!(closed_duplicates_message(1), "Closed 1 duplicate 🧹");
        assert_eq!(closed_duplicates_message(3), "Closed 3 duplicates 🧹");
        assert_eq!(ungrouped_message(0), "No groups to undo 😸");
        assert_eq!(ungrouped_message(4), "Ungrouped 4 tabs — back to normal 🐾");
        assert_eq!(remote_fallback_message("rate limited"), "AI failed: rate limited — using local mode");
        assert_eq!(key_saved_message(Some(40)), "API key saved 🔑 (40 chars)");
        assert_eq!(key_saved_message(None), "API key cleared");
    }

    #[test]
    fn test_color_names_match_serde() {
        for color in GroupColor::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.as_str()));
        }
    }
}
