//! Display and output formatting utilities

use crate::cnf::{ClauseGenerator, Formula};
use crate::config::OutputFormat;
use crate::encoding::EncodedFormula;
use crate::network::Network;
use anyhow::Result;
use std::path::Path;

/// Format networks and formulas for console and file output
pub struct FormulaFormatter;

impl FormulaFormatter {
    /// Format the first clauses of a formula for console output
    pub fn format_formula_preview(formula: &Formula, limit: usize) -> String {
        let mut output = String::new();

        for clause in formula.iter().take(limit) {
            output.push_str(&clause.to_string());
            output.push('\n');
        }

        if formula.len() > limit {
            output.push_str(&format!("... and {} more clauses\n", formula.len() - limit));
        }

        output
    }

    /// Format the network topology, one variable per line
    pub fn format_network(network: &Network) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Network '{}' ({} variables):\n",
            network.name,
            network.len()
        ));

        for variable in network.variables() {
            if variable.has_parents() {
                output.push_str(&format!(
                    "  {} ({} values) <- {}\n",
                    variable.name,
                    variable.domain_size(),
                    variable.parents.join(", ")
                ));
            } else {
                output.push_str(&format!(
                    "  {} ({} values)\n",
                    variable.name,
                    variable.domain_size()
                ));
            }
        }

        output
    }

    /// Format the per-variable clause counts as a table
    pub fn format_variable_table(network: &Network) -> Result<String> {
        let mut output = String::new();

        output.push_str("Variable     | Domain | Parents | Configs | Clauses\n");
        output.push_str("-------------|--------|---------|---------|--------\n");

        for variable in network.variables() {
            let domain = variable.domain_size();
            let parent_sizes = network.parent_domain_sizes(variable)?;
            let configs: usize = parent_sizes.iter().product();
            let clauses = ClauseGenerator::expected_indicator_count(domain)
                + ClauseGenerator::expected_parameter_count(domain, &parent_sizes);

            output.push_str(&format!(
                "{:12} | {:6} | {:7} | {:7} | {}\n",
                variable.name,
                domain,
                variable.parents.len(),
                configs,
                clauses
            ));
        }

        Ok(output)
    }

    /// Save an artifact to the output directory in the configured format
    pub fn save_artifact<P: AsRef<Path>>(
        artifact: &EncodedFormula,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                let filename = format!("{}_formula.txt", artifact.network_name);
                std::fs::write(output_dir.join(filename), artifact.formula.to_text())?;
            }
            OutputFormat::Json => {
                let filename = format!("{}_formula.json", artifact.network_name);
                artifact.save_to_file(output_dir.join(filename))?;

                // also save a summary file
                let summary_path = output_dir.join(format!("{}_summary.json", artifact.network_name));
                let summary_json = serde_json::to_string_pretty(&artifact.summary())?;
                std::fs::write(summary_path, summary_json)?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
