//! Encoding problem definition
//!
//! Ties the pieces together: load the network named by the settings, run
//! the encoder, check the result, and hand back the artifact.

use super::{EncodedFormula, FormulaValidator};
use crate::cnf::{Enc1Encoder, EncodingStatistics};
use crate::config::Settings;
use crate::network::{load_network_from_file, Network};
use anyhow::{Context, Result};
use std::time::Instant;

/// An encoding run over one loaded network
pub struct EncodingProblem {
    settings: Settings,
    network: Network,
    encoder: Enc1Encoder,
    validator: FormulaValidator,
}

impl EncodingProblem {
    /// Create a problem from settings, loading the network file
    pub fn new(settings: Settings) -> Result<Self> {
        let network = load_network_from_file(&settings.input.network_file)
            .context("Failed to load network file")?;

        Ok(Self::assemble(settings, network))
    }

    /// Create a problem with an explicit network (useful for testing)
    pub fn with_network(settings: Settings, network: Network) -> Result<Self> {
        network
            .validate()
            .context("Supplied network is not well-formed")?;

        Ok(Self::assemble(settings, network))
    }

    fn assemble(settings: Settings, network: Network) -> Self {
        let encoder = Enc1Encoder::new(settings.encoding.parallel);

        Self {
            settings,
            network,
            encoder,
            validator: FormulaValidator::new(),
        }
    }

    /// Encode the network and return the artifact
    pub fn encode(&self) -> Result<EncodedFormula> {
        let start_time = Instant::now();

        let formula = self
            .encoder
            .encode(&self.network)
            .context("Clause generation failed")?;

        let encode_time = start_time.elapsed();

        if self.settings.encoding.validate_counts {
            let result = self
                .validator
                .validate(&self.network, &formula)
                .context("Formula validation failed")?;

            if !result.is_valid {
                anyhow::bail!(
                    "Encoded formula violates the encoding shape: {}",
                    result
                        .error_message
                        .unwrap_or_else(|| "unknown violation".to_string())
                );
            }
        }

        Ok(EncodedFormula::new(&self.network, formula, encode_time))
    }

    /// Predict the encoding size without building clauses
    pub fn statistics(&self) -> Result<EncodingStatistics> {
        self.encoder.statistics(&self.network)
    }

    /// Get the loaded network
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
