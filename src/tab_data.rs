//! Data structures for tab organization
use serde::{Deserialize, Serialize};

/// Host tab identifier, stable within a browser session
pub type TabId = i32;

/// Group id the host reports for a tab that is not in any group
pub const TAB_GROUP_ID_NONE: i32 = -1;

/// URL prefixes of browser-internal pages that can never be grouped by topic
const PRIVILEGED_PREFIXES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "chrome-untrusted://",
    "devtools://",
    "edge://",
    "about:",
    "view-source:",
];

/// Information about a browser tab, as reported by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default = "ungrouped")]
    pub group_id: i32,
}

fn ungrouped() -> i32 {
    TAB_GROUP_ID_NONE
}

impl TabInfo {
    pub fn new(id: TabId, url: Option<String>, title: String, group_id: i32) -> TabInfo {
        TabInfo {
            id,
            url,
            title,
            group_id,
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id != TAB_GROUP_ID_NONE
    }
}

/// A tab eligible for categorization. The URL is always present and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabDescriptor {
    pub id: TabId,
    pub title: String,
    pub url: String,
}

impl TabDescriptor {
    pub fn new(id: TabId, title: &str, url: &str) -> TabDescriptor {
        TabDescriptor {
            id,
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    /// Build a descriptor from a host tab, if the tab has a usable URL
    pub fn from_tab(tab: &TabInfo) -> Option<TabDescriptor> {
        let url = tab.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        Some(TabDescriptor::new(tab.id, &tab.title, url))
    }
}

/// True for browser-internal pages (settings, extensions, devtools, ...)
pub fn is_privileged_url(url: &str) -> bool {
    let lower = url.trim_start().to_lowercase();
    PRIVILEGED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Pick the candidate tabs: ungrouped, with a real, non-privileged URL
pub fn select_candidates(tabs: &[TabInfo]) -> Vec<TabDescriptor> {
    tabs.iter()
        .filter(|tab| !tab.is_grouped())
        .filter_map(TabDescriptor::from_tab)
        .filter(|descriptor| !is_privileged_url(&descriptor.url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: TabId, url: Option<&str>, group_id: i32) -> TabInfo {
        TabInfo::new(id, url.map(str::to_string), format!("Tab {}", id), group_id)
    }

    #[test]
    fn test_deserialize_host_tab_ignores_extra_fields() {
        let json = r#"{"id": 7, "url": "https://github.com", "title": "GitHub",
                       "pinned": true, "index": 3, "groupId": 12, "active": false}"#;
        let tab: TabInfo = serde_json::from_str(json).unwrap();

        assert_eq!(tab.id, 7);
        assert_eq!(tab.url.as_deref(), Some("https://github.com"));
        assert_eq!(tab.group_id, 12);
        assert!(tab.is_grouped());
        // host-only fields like pinned/index/active are ignored
        assert_eq!(tab, TabInfo::new(7, Some("https://github.com".to_string()), "GitHub".to_string(), 12));
    }

    #[test]
    fn test_deserialize_privileged_tab_without_url() {
        let tab: TabInfo = serde_json::from_str(r#"{"id": 1}"#).unwrap();

        assert_eq!(tab.url, None);
        assert_eq!(tab.title, "");
        assert_eq!(tab.group_id, TAB_GROUP_ID_NONE);
    }

    #[test]
    fn test_is_privileged_url() {
        assert!(is_privileged_url("chrome://settings"));
        assert!(is_privileged_url("chrome-extension://abc/popup.html"));
        assert!(is_privileged_url("about:blank"));
        assert!(is_privileged_url("CHROME://newtab"));
        assert!(!is_privileged_url("https://chrome.google.com/webstore"));
        assert!(!is_privileged_url("http://localhost:3000"));
    }

    #[test]
    fn test_select_candidates() {
        let tabs = vec![
            tab(1, Some("https://github.com/rust-lang"), TAB_GROUP_ID_NONE),
            tab(2, Some("chrome://extensions"), TAB_GROUP_ID_NONE),
            tab(3, Some("https://youtube.com"), 4),
            tab(4, None, TAB_GROUP_ID_NONE),
            tab(5, Some("   "), TAB_GROUP_ID_NONE),
            tab(6, Some("https://news.ycombinator.com"), TAB_GROUP_ID_NONE),
        ];

        let candidates = select_candidates(&tabs);
        let ids: Vec<TabId> = candidates.iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![1, 6]);
        assert_eq!(candidates[0].title, "Tab 1");
    }
}
