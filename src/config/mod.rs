//! Configuration management for the network encoder

pub mod settings;

pub use settings::{
    CliOverrides, EncodingConfig, InputConfig, OutputConfig, OutputFormat, Settings,
};
