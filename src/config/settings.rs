//! Configuration settings for the network encoder

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub network_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Build per-variable clause lists on the rayon thread pool
    pub parallel: bool,
    /// Re-check the emitted formula against the closed-form clause counts
    pub validate_counts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                network_file: PathBuf::from("input/networks/sprinkler.bif"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/formulas"),
            },
            encoding: EncodingConfig {
                parallel: false,
                validate_counts: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.input.network_file.exists() {
            anyhow::bail!(
                "Network file does not exist: {}",
                self.input.network_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref network_file) = cli_overrides.network_file {
            self.input.network_file = network_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(parallel) = cli_overrides.parallel {
            self.encoding.parallel = parallel;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub network_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub parallel: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert!(!settings.encoding.parallel);
        assert!(settings.encoding.validate_counts);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            network_file: Some(PathBuf::from("other.bif")),
            output_dir: None,
            format: Some(OutputFormat::Json),
            parallel: Some(true),
        };

        settings.merge_with_cli(&overrides);
        assert_eq!(settings.input.network_file, PathBuf::from("other.bif"));
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(settings.encoding.parallel);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let network_path = temp_dir.path().join("net.bif");
        std::fs::write(&network_path, "stub").unwrap();

        let mut settings = Settings::default();
        settings.input.network_file = network_path;
        settings.output.format = OutputFormat::Json;

        let config_path = temp_dir.path().join("config/encoder.yaml");
        settings.to_file(&config_path).unwrap();

        let loaded = Settings::from_file(&config_path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.input.network_file, settings.input.network_file);
    }

    #[test]
    fn test_missing_network_file_rejected() {
        let mut settings = Settings::default();
        settings.input.network_file = PathBuf::from("does/not/exist.bif");
        assert!(settings.validate().is_err());
    }
}
