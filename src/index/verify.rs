//! Layout check for sorted rule sequences.

use crate::{Error, Result, Rule};

/// Check that a sorted rule sequence can be binary searched.
///
/// Within a category, consecutive rules must either have disjoint port
/// ranges, or identical port ranges with disjoint IP ranges. Checking
/// neighbours is enough: once every neighbouring pair is strictly ordered
/// the whole sequence is.
pub(crate) fn check_layout(rules: &[Rule]) -> Result<()> {
    for pair in rules.windows(2) {
        let (first, second) = (pair[0], pair[1]);

        if first.category != second.category || first.ports.end() < second.ports.start() {
            continue;
        }
        if first.ports == second.ports && first.ips.end() < second.ips.start() {
            continue;
        }

        if first.overlaps(&second) {
            return Err(Error::OverlappingRules { first, second });
        }
        return Err(Error::StraddlingRules { first, second });
    }
    Ok(())
}
