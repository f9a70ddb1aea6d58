//! CNF encoding components for Bayesian networks

pub mod clauses;
pub mod configurations;
pub mod encoder;
pub mod formula;

pub use clauses::ClauseGenerator;
pub use configurations::{configuration_count, parent_configurations};
pub use encoder::{Enc1Encoder, EncodingStatistics};
pub use formula::{Clause, Formula, Literal, ParentValue, Proposition};
