//! Sorted rule index with binary search lookup.

mod verify;

use crate::{Category, Query, Result, Rule};

/// RuleIndex is an immutable, sorted sequence of rules.
///
/// Rules are ordered by category, then port-range start, then IP-range
/// start. Lookups are a single binary search, O(log n) in the number of
/// rules. An empty index matches nothing.
///
/// # Examples
/// ```
/// use rangewall::{Query, RawRule, Rule, RuleIndex};
///
/// let rule = Rule::from_raw(&RawRule::new("inbound", "tcp", "80", "192.168.1.2")).unwrap();
/// let index = RuleIndex::build([rule]).unwrap();
///
/// assert!(index.matches(&Query::parse("inbound", "tcp", 80, "192.168.1.2").unwrap()));
/// assert!(!index.matches(&Query::parse("inbound", "tcp", 81, "192.168.1.2").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleIndex {
    rules: Vec<Rule>,
}

impl RuleIndex {
    /// Create an index that denies everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sort the rules and reject layouts the search cannot handle.
    ///
    /// Fails with `OverlappingRules` when two rules match a common packet
    /// and with `StraddlingRules` when two rules in a category have
    /// partially overlapping port ranges.
    pub fn build<I: IntoIterator<Item = Rule>>(rules: I) -> Result<Self> {
        let index = Self::sorted(rules);
        verify::check_layout(&index.rules)?;
        log::debug!("Built rule index with {} rules", index.len());
        Ok(index)
    }

    /// Sort the rules without rejecting bad layouts.
    ///
    /// The caller guarantees the rules are disjoint. Debug builds still run
    /// the layout check and log a warning on violation.
    pub fn build_unchecked<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let index = Self::sorted(rules);
        if cfg!(debug_assertions) {
            if let Err(e) = verify::check_layout(&index.rules) {
                log::warn!("Rule index may miss matches: {}", e);
            }
        }
        index
    }

    fn sorted<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let mut rules: Vec<Rule> = rules.into_iter().collect();
        rules.sort_by_key(Rule::sort_key);
        Self { rules }
    }

    /// Check whether any rule matches the query.
    pub fn matches(&self, query: &Query) -> bool {
        self.find(query).is_some()
    }

    /// Find the rule matching the query.
    pub fn find(&self, query: &Query) -> Option<&Rule> {
        self.rules
            .binary_search_by(|rule| rule.compare(query))
            .ok()
            .map(|idx| &self.rules[idx])
    }

    /// Check every rule in turn. O(n); used to cross-check `matches`.
    pub fn scan(&self, query: &Query) -> bool {
        self.rules.iter().any(|rule| rule.contains(query))
    }

    /// Get the number of rules in this index.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if this index has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get the rules in index order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Get the number of rules in a category.
    pub fn count(&self, category: Category) -> usize {
        let start = self.rules.partition_point(|rule| rule.category < category);
        let end = self.rules.partition_point(|rule| rule.category <= category);
        end - start
    }
}

impl<'a> IntoIterator for &'a RuleIndex {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
