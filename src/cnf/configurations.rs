//! Parent-configuration enumeration
//!
//! A configuration assigns one value index to each parent of a variable,
//! drawn from the Cartesian product of the parent domains. Value indices
//! are 1-based in the parameter layer of the encoding.

use itertools::Itertools;

/// Enumerate every configuration of the given parent domains.
///
/// Each parent ranges over its own domain only, so the result has exactly
/// `domain_sizes.iter().product()` entries. Order is deterministic: the
/// last parent varies fastest. A variable with no parents never reaches
/// this enumerator; an empty slice yields no configurations.
pub fn parent_configurations(domain_sizes: &[usize]) -> Vec<Vec<usize>> {
    if domain_sizes.is_empty() {
        return Vec::new();
    }

    domain_sizes
        .iter()
        .map(|&size| 1..=size)
        .multi_cartesian_product()
        .collect()
}

/// Number of configurations the enumerator will produce
pub fn configuration_count(domain_sizes: &[usize]) -> usize {
    domain_sizes.iter().product()
}
