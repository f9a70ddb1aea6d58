//! Bayesian network to CNF encoder
//!
//! This library translates discrete Bayesian networks into propositional
//! CNF formulas (the ENC1 encoding) for downstream weighted model counting.

pub mod cnf;
pub mod config;
pub mod encoding;
pub mod network;
pub mod utils;

pub use config::Settings;
pub use encoding::{EncodedFormula, EncodingProblem};
pub use network::Network;

use anyhow::Result;

/// Main entry point: encode the network named by the settings
pub fn encode_network(settings: Settings) -> Result<EncodedFormula> {
    let problem = EncodingProblem::new(settings)?;
    problem.encode()
}
