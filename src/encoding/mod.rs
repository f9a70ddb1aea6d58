//! Encoding problem definition and artifact handling

pub mod artifact;
pub mod problem;
pub mod validator;

pub use artifact::{EncodedFormula, FormulaMetadata, FormulaSummary};
pub use problem::EncodingProblem;
pub use validator::{CountViolation, FormulaValidator, ValidationResult};
