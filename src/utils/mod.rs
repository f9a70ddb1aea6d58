//! Shared display and output helpers

pub mod display;

pub use display::{Color, ColorOutput, FormulaFormatter};
