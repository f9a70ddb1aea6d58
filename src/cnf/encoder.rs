//! ENC1 encoder orchestration
//!
//! Composes the indicator and parameter clause families into the output
//! formula: indicator clauses for all variables in network order, then
//! parameter clauses for all variables in network order.

use super::clauses::ClauseGenerator;
use super::formula::{Clause, Formula};
use crate::network::Network;
use anyhow::Result;
use rayon::prelude::*;

/// Translates a network into the ENC1 CNF formula
pub struct Enc1Encoder {
    parallel: bool,
}

impl Enc1Encoder {
    /// Create an encoder; `parallel` enables per-variable clause
    /// construction on the rayon thread pool
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Encode the network into a CNF formula.
    ///
    /// Pure function of the network: two runs produce identical clause
    /// sequences. Each variable's clauses are built independently; in
    /// parallel mode the per-variable lists are merged back in network
    /// order, so the output does not depend on scheduling.
    pub fn encode(&self, network: &Network) -> Result<Formula> {
        let generator = ClauseGenerator::new(network);

        let build = |variable| -> Result<(Vec<Clause>, Vec<Clause>)> {
            let indicators = generator.indicator_clauses(variable);
            let parameters = generator.parameter_clauses(variable)?;
            Ok((indicators, parameters))
        };

        let per_variable: Vec<(Vec<Clause>, Vec<Clause>)> = if self.parallel {
            network.variables().par_iter().map(build).collect::<Result<_>>()?
        } else {
            network.variables().iter().map(build).collect::<Result<_>>()?
        };

        let (indicator_sections, parameter_sections): (Vec<_>, Vec<_>) =
            per_variable.into_iter().unzip();

        let mut clauses: Vec<Clause> = indicator_sections.into_iter().flatten().collect();
        clauses.extend(parameter_sections.into_iter().flatten());

        Ok(Formula::new(clauses))
    }

    /// Predict the size of the encoding from the closed-form clause counts,
    /// without building any clauses
    pub fn statistics(&self, network: &Network) -> Result<EncodingStatistics> {
        let mut stats = EncodingStatistics {
            network_name: network.name.clone(),
            variable_count: network.len(),
            indicator_clauses: 0,
            parameter_clauses: 0,
            parameter_literals: 0,
            total_clauses: 0,
        };

        for variable in network.variables() {
            let domain = variable.domain_size();
            let parent_sizes = network.parent_domain_sizes(variable)?;

            stats.indicator_clauses += ClauseGenerator::expected_indicator_count(domain);
            stats.parameter_clauses +=
                ClauseGenerator::expected_parameter_count(domain, &parent_sizes);
            stats.parameter_literals += domain * parent_sizes.iter().product::<usize>();
        }

        stats.total_clauses = stats.indicator_clauses + stats.parameter_clauses;
        Ok(stats)
    }
}

impl Default for Enc1Encoder {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Size of an encoding, derived from network structure alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub network_name: String,
    pub variable_count: usize,
    pub indicator_clauses: usize,
    pub parameter_clauses: usize,
    pub parameter_literals: usize,
    pub total_clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Encoding Statistics ({}):", self.network_name)?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Indicator clauses: {}", self.indicator_clauses)?;
        writeln!(f, "  Parameter clauses: {}", self.parameter_clauses)?;
        writeln!(f, "  Parameter literals: {}", self.parameter_literals)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        Ok(())
    }
}
