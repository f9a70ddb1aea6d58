//! Encoded-formula artifact
//!
//! The formula plus the metadata a downstream weighted model counter (or a
//! format converter) wants to know before consuming it.

use crate::cnf::{Clause, Formula};
use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The output artifact of one encoding run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedFormula {
    /// Name of the encoded network
    pub network_name: String,
    /// The CNF formula, indicator section first
    pub formula: Formula,
    /// Time taken to build the formula
    #[serde(skip)]
    pub encode_time: Duration,
    /// Size breakdown of the formula
    pub metadata: FormulaMetadata,
}

/// Size breakdown of an encoded formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaMetadata {
    /// Number of variables in the source network
    pub variable_count: usize,
    /// Clauses in the indicator (one-hot) section
    pub indicator_clause_count: usize,
    /// Clauses in the parameter section
    pub parameter_clause_count: usize,
    /// Unit parameter facts of parent-less variables
    pub free_parameter_count: usize,
    /// Total clause count
    pub total_clause_count: usize,
    /// Total literal occurrences
    pub literal_count: usize,
    /// Width of the widest clause
    pub max_clause_width: usize,
}

impl EncodedFormula {
    /// Create an artifact, analyzing the formula for its metadata
    pub fn new(network: &Network, formula: Formula, encode_time: Duration) -> Self {
        let metadata = FormulaMetadata::analyze(network, &formula);

        Self {
            network_name: network.name.clone(),
            formula,
            encode_time,
            metadata,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// One-line summary of the artifact
    pub fn summary(&self) -> FormulaSummary {
        FormulaSummary {
            network_name: self.network_name.clone(),
            total_clause_count: self.metadata.total_clause_count,
            literal_count: self.metadata.literal_count,
            encode_time_ms: self.encode_time.as_millis() as u64,
        }
    }
}

impl FormulaMetadata {
    /// Analyze a formula produced for the given network
    pub fn analyze(network: &Network, formula: &Formula) -> Self {
        let mut indicator_clause_count = 0;
        let mut parameter_clause_count = 0;
        let mut free_parameter_count = 0;

        for clause in formula.iter() {
            if clause.mentions_parameter() {
                parameter_clause_count += 1;
                if clause.is_unit() {
                    free_parameter_count += 1;
                }
            } else {
                indicator_clause_count += 1;
            }
        }

        Self {
            variable_count: network.len(),
            indicator_clause_count,
            parameter_clause_count,
            free_parameter_count,
            total_clause_count: formula.len(),
            literal_count: formula.literal_count(),
            max_clause_width: formula.max_clause_width(),
        }
    }
}

impl std::fmt::Display for FormulaMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Formula Metadata:")?;
        writeln!(f, "  Network variables: {}", self.variable_count)?;
        writeln!(f, "  Indicator clauses: {}", self.indicator_clause_count)?;
        writeln!(f, "  Parameter clauses: {}", self.parameter_clause_count)?;
        writeln!(f, "  Free parameter facts: {}", self.free_parameter_count)?;
        writeln!(f, "  Total clauses: {}", self.total_clause_count)?;
        writeln!(f, "  Literals: {}", self.literal_count)?;
        writeln!(f, "  Max clause width: {}", self.max_clause_width)?;
        Ok(())
    }
}

/// Summary of an artifact for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaSummary {
    pub network_name: String,
    pub total_clause_count: usize,
    pub literal_count: usize,
    pub encode_time_ms: u64,
}

impl std::fmt::Display for FormulaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} clauses, {} literals, {}ms",
            self.network_name, self.total_clause_count, self.literal_count, self.encode_time_ms
        )
    }
}

/// Clauses of a formula split back into its two sections
pub fn split_sections(formula: &Formula) -> (Vec<&Clause>, Vec<&Clause>) {
    formula.iter().partition(|c| !c.mentions_parameter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Enc1Encoder;
    use crate::network::NetworkVariable;

    fn chain_network() -> Network {
        Network::from_variables(
            "chain",
            vec![
                NetworkVariable::new("A", vec!["a0".to_string(), "a1".to_string()]),
                NetworkVariable::new("B", vec!["b0".to_string(), "b1".to_string()])
                    .with_parents(vec!["A".to_string()]),
            ],
        )
        .unwrap()
    }

    fn encode(network: &Network) -> EncodedFormula {
        let formula = Enc1Encoder::default().encode(network).unwrap();
        EncodedFormula::new(network, formula, Duration::from_millis(3))
    }

    #[test]
    fn test_metadata_analysis() {
        let network = chain_network();
        let artifact = encode(&network);

        assert_eq!(artifact.metadata.variable_count, 2);
        assert_eq!(artifact.metadata.indicator_clause_count, 4);
        // 2 free priors for A + 2*2*2 biconditional clauses for B
        assert_eq!(artifact.metadata.parameter_clause_count, 10);
        assert_eq!(artifact.metadata.free_parameter_count, 2);
        assert_eq!(artifact.metadata.total_clause_count, artifact.formula.len());
        assert_eq!(artifact.metadata.max_clause_width, 2);
    }

    #[test]
    fn test_section_split() {
        let network = chain_network();
        let artifact = encode(&network);

        let (indicators, parameters) = split_sections(&artifact.formula);
        assert_eq!(indicators.len(), artifact.metadata.indicator_clause_count);
        assert_eq!(parameters.len(), artifact.metadata.parameter_clause_count);
    }

    #[test]
    fn test_json_round_trip() {
        let network = chain_network();
        let artifact = encode(&network);

        let json = artifact.to_json().unwrap();
        let back = EncodedFormula::from_json(&json).unwrap();

        assert_eq!(back.network_name, "chain");
        assert_eq!(back.formula, artifact.formula);
        assert_eq!(back.metadata, artifact.metadata);
    }

    #[test]
    fn test_summary() {
        let network = chain_network();
        let artifact = encode(&network);

        let summary = artifact.summary();
        assert_eq!(summary.network_name, "chain");
        assert_eq!(summary.total_clause_count, 14);
        assert!(summary.to_string().contains("chain"));
    }
}
