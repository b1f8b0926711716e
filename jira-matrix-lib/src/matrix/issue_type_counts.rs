use std::collections::BTreeMap;
use std::collections::btree_map;

/// Number of issues per issue type name, as produced by a single query.
///
/// Keys are whatever issue type names the tracker reports; there is no fixed set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTypeCounts {
    counts: BTreeMap<String, u64>,
}

impl IssueTypeCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more issue of the given type.
    pub fn increment(&mut self, issue_type: impl Into<String>) {
        *self.counts.entry(issue_type.into()).or_default() += 1;
    }

    /// The count for an issue type, zero when the type was never seen.
    #[must_use]
    pub fn get(&self, issue_type: &str) -> u64 {
        self.counts.get(issue_type).copied().unwrap_or_default()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Issue type names in sorted order.
    pub fn issue_types(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Per-type sum of `self` and `other` over the given issue types.
    ///
    /// Every listed type gets an entry, including those absent from both inputs.
    #[must_use]
    pub fn merged<'a>(&self, other: &Self, issue_types: impl IntoIterator<Item = &'a str>) -> Self {
        let counts = issue_types
            .into_iter()
            .map(|issue_type| (issue_type.to_string(), self.get(issue_type) + other.get(issue_type)))
            .collect();

        Self { counts }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for IssueTypeCounts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for (k, v) in iter {
            *counts.entry(k.into()).or_default() += v;
        }

        Self { counts }
    }
}

impl IntoIterator for IssueTypeCounts {
    type Item = (String, u64);
    type IntoIter = btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
