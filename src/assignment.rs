//! Category assignment: the ordered mapping from category name to tab ids
use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::rules::OTHER_CATEGORY;
use crate::tab_data::TabId;

/// Ordered mapping of category name to tab ids.
///
/// Categories keep the order in which they were first used, which is the
/// order groups are created and coloured in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAssignment {
    categories: Vec<(String, Vec<TabId>)>,
}

/// Corrections made while reconciling a mapping against its input tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Ids that were not part of the input
    pub foreign: usize,
    /// Ids assigned more than once (all but the first dropped)
    pub duplicates: usize,
    /// Input ids the mapping left out, moved to "other"
    pub missing: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.foreign == 0 && self.duplicates == 0 && self.missing == 0
    }
}

impl CategoryAssignment {
    pub fn new() -> Self {
        CategoryAssignment {
            categories: Vec::new(),
        }
    }

    /// Append a tab id to a category, creating the category on first use
    pub fn push(&mut self, category: &str, id: TabId) {
        match self.categories.iter_mut().find(|(name, _)| name == category) {
            Some((_, ids)) => ids.push(id),
            None => self.categories.push((category.to_string(), vec![id])),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[TabId]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TabId])> {
        self.categories
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of assigned tab ids
    pub fn tab_count(&self) -> usize {
        self.categories.iter().map(|(_, ids)| ids.len()).sum()
    }

    /// True if every input id appears exactly once and nothing else appears
    pub fn is_partition_of(&self, input: &[TabId]) -> bool {
        let expected: HashSet<TabId> = input.iter().copied().collect();
        let mut seen = HashSet::new();

        for (_, ids) in &self.categories {
            for id in ids {
                if !expected.contains(id) || !seen.insert(*id) {
                    return false;
                }
            }
        }

        seen.len() == expected.len()
    }

    /// Force this mapping into a strict partition of `input`.
    ///
    /// Category names are trimmed and lowercased (blank names become
    /// "other"), unknown and repeated ids are dropped, omitted input ids are
    /// appended to "other" in input order, and empty categories are removed.
    pub fn reconcile(self, input: &[TabId]) -> (CategoryAssignment, ReconcileReport) {
        let expected: HashSet<TabId> = input.iter().copied().collect();
        let mut assigned = HashSet::new();
        let mut report = ReconcileReport::default();
        let mut result = CategoryAssignment::new();

        for (name, ids) in self.categories {
            let name = normalize_name(&name);
            for id in ids {
                if !expected.contains(&id) {
                    report.foreign += 1;
                } else if !assigned.insert(id) {
                    report.duplicates += 1;
                } else {
                    result.push(&name, id);
                }
            }
        }

        for id in input {
            if assigned.insert(*id) {
                report.missing += 1;
                result.push(OTHER_CATEGORY, *id);
            }
        }

        (result, report)
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        OTHER_CATEGORY.to_string()
    } else {
        name
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<TabId>)> for CategoryAssignment {
    fn from_iter<I: IntoIterator<Item = (S, Vec<TabId>)>>(iter: I) -> Self {
        let mut assignment = CategoryAssignment::new();
        for (name, ids) in iter {
            let name = name.into();
            for id in ids {
                assignment.push(&name, id);
            }
        }
        assignment
    }
}

impl Serialize for CategoryAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, ids) in &self.categories {
            map.serialize_entry(name, ids)?;
        }
        map.end()
    }
}
