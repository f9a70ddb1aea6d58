//! Clause generation for the ENC1 encoding
//!
//! Two independent clause families per variable: indicator clauses enforce
//! that exactly one domain value holds, parameter clauses tie each
//! parameter literal to the parent configuration that activates it.

use super::configurations::{configuration_count, parent_configurations};
use super::formula::{Clause, Literal, ParentValue, Proposition};
use crate::network::{Network, NetworkVariable};
use anyhow::Result;
use itertools::Itertools;

/// Generates ENC1 clauses for the variables of one network
pub struct ClauseGenerator<'a> {
    network: &'a Network,
}

impl<'a> ClauseGenerator<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    /// Indicator clauses for one variable: a one-hot encoding of its domain.
    ///
    /// One at-least-one clause over all indicators, then one at-most-one
    /// clause per unordered indicator pair: 1 + d(d-1)/2 clauses total.
    pub fn indicator_clauses(&self, variable: &NetworkVariable) -> Vec<Clause> {
        let domain = variable.domain_size();
        let mut clauses = Vec::with_capacity(Self::expected_indicator_count(domain));

        let at_least_one = (0..domain)
            .map(|value| Literal::positive(Proposition::indicator(&variable.name, value)))
            .collect();
        clauses.push(Clause::new(at_least_one));

        for (i, j) in (0..domain).tuple_combinations() {
            clauses.push(Clause::binary(
                Literal::negative(Proposition::indicator(&variable.name, i)),
                Literal::negative(Proposition::indicator(&variable.name, j)),
            ));
        }

        clauses
    }

    /// Parameter clauses for one variable.
    ///
    /// Without parents, each value gets a free unit literal θ(v, x); nothing
    /// constrains it, the truth value only anchors the prior weight for the
    /// downstream model counter. With parents, each (configuration, value)
    /// pair gets the biconditional expansion: one forward clause
    /// ¬λ(p₁,c₁)∨…∨¬λ(pₖ,cₖ)∨θ and k reverse clauses ¬θ∨λ(pᵢ,cᵢ).
    ///
    /// Parent indicators inside these clauses use the 1-based configuration
    /// values of the parameter layer.
    pub fn parameter_clauses(&self, variable: &NetworkVariable) -> Result<Vec<Clause>> {
        if !variable.has_parents() {
            return Ok((0..variable.domain_size())
                .map(|value| {
                    Clause::unit(Literal::positive(Proposition::prior(&variable.name, value)))
                })
                .collect());
        }

        let parent_sizes = self.network.parent_domain_sizes(variable)?;
        let parent_count = variable.parents.len();
        let capacity = Self::expected_parameter_count(variable.domain_size(), &parent_sizes);
        let mut clauses = Vec::with_capacity(capacity);

        for config in parent_configurations(&parent_sizes) {
            let condition: Vec<ParentValue> = variable
                .parents
                .iter()
                .zip(&config)
                .map(|(parent, &value)| ParentValue::new(parent.clone(), value))
                .collect();

            for value in 0..variable.domain_size() {
                let theta = Proposition::parameter(&variable.name, value, condition.clone());

                // configuration holds -> theta
                let mut forward = Vec::with_capacity(parent_count + 1);
                for pv in &condition {
                    forward.push(Literal::negative(Proposition::indicator(
                        &pv.parent, pv.value,
                    )));
                }
                forward.push(Literal::positive(theta.clone()));
                clauses.push(Clause::new(forward));

                // theta -> every parent indicator of the configuration
                for pv in &condition {
                    clauses.push(Clause::binary(
                        Literal::negative(theta.clone()),
                        Literal::positive(Proposition::indicator(&pv.parent, pv.value)),
                    ));
                }
            }
        }

        Ok(clauses)
    }

    /// Indicator clause count for a domain size: 1 + d(d-1)/2
    pub fn expected_indicator_count(domain: usize) -> usize {
        1 + domain * domain.saturating_sub(1) / 2
    }

    /// Parameter clause count: domain unit facts for a root variable,
    /// domain * prod(parent domains) * (1 + parent count) otherwise
    pub fn expected_parameter_count(domain: usize, parent_sizes: &[usize]) -> usize {
        if parent_sizes.is_empty() {
            domain
        } else {
            domain * configuration_count(parent_sizes) * (1 + parent_sizes.len())
        }
    }
}
