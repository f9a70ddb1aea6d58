//! Main CLI application for the network encoder

use anyhow::{Context, Result};
use bayes_cnf::{
    cnf::Enc1Encoder,
    config::{CliOverrides, OutputFormat, Settings},
    encoding::{EncodedFormula, EncodingProblem, FormulaValidator},
    network::{create_example_networks, load_network_from_file},
    utils::{ColorOutput, FormulaFormatter},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bayes_cnf")]
#[command(about = "Bayesian network to CNF encoder for weighted model counting")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a network into a CNF formula
    Encode {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Network file (overrides config)
        #[arg(short, long)]
        network: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the artifact as JSON instead of the textual grammar
        #[arg(long)]
        json: bool,

        /// Build per-variable clauses in parallel
        #[arg(long)]
        parallel: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and network files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a saved formula artifact against its network
    Validate {
        /// Network file
        #[arg(short, long)]
        network: PathBuf,

        /// Formula artifact (JSON) to check
        #[arg(short, long)]
        formula: PathBuf,
    },

    /// Show network structure and the predicted encoding size
    Analyze {
        /// Network file
        #[arg(short, long)]
        network: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            config,
            network,
            output,
            json,
            parallel,
            verbose,
        } => encode_command(config, network, output, json, parallel, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { network, formula } => validate_command(network, formula),
        Commands::Analyze { network } => analyze_command(network),
    }
}

fn encode_command(
    config_path: PathBuf,
    network_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    json: bool,
    parallel: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting network encoder"));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        network_file,
        output_dir,
        format: json.then_some(OutputFormat::Json),
        parallel: parallel.then_some(true),
    };
    settings.merge_with_cli(&cli_overrides);

    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Network file: {}", settings.input.network_file.display());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!("  Parallel: {}", settings.encoding.parallel);
        println!();
    }

    // Create and run the encoding problem
    let start_time = Instant::now();
    let problem =
        EncodingProblem::new(settings.clone()).context("Failed to create encoding problem")?;

    if verbose {
        println!("{}", FormulaFormatter::format_network(problem.network()));
        println!("{}", problem.statistics()?);
    }

    println!("{}", ColorOutput::info("Generating clauses..."));
    let artifact = problem.encode().context("Failed to encode network")?;
    let total_time = start_time.elapsed();

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Encoded '{}' into {} clauses in {:.3}s",
            artifact.network_name,
            artifact.metadata.total_clause_count,
            total_time.as_secs_f64()
        ))
    );

    println!("\n{}", artifact.metadata);

    if verbose {
        println!("Formula preview:");
        println!(
            "{}",
            FormulaFormatter::format_formula_preview(&artifact.formula, 20)
        );
    }

    // Save the artifact
    FormulaFormatter::save_artifact(
        &artifact,
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save formula")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Formula saved to {}",
            settings.output.output_directory.display()
        ))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    // Create directories
    let config_dir = directory.join("config");
    let input_dir = directory.join("input/networks");
    let output_dir = directory.join("output/formulas");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut default_settings = Settings::default();
        default_settings.input.network_file = input_dir.join("sprinkler.bif");
        default_settings.output.output_directory = output_dir.clone();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Create example networks
    create_example_networks(&input_dir).context("Failed to create example networks")?;
    println!("Created example networks in: {}", input_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your networks to {}", input_dir.display());
    println!("3. Run: cargo run -- encode --config config/default.yaml");

    Ok(())
}

fn validate_command(network_path: PathBuf, formula_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("Validating formula artifact..."));

    let network = load_network_from_file(&network_path)
        .with_context(|| format!("Failed to load network from {}", network_path.display()))?;

    let artifact = EncodedFormula::load_from_file(&formula_path)
        .with_context(|| format!("Failed to load formula from {}", formula_path.display()))?;

    let validator = FormulaValidator::new();
    let result = validator
        .validate(&network, &artifact.formula)
        .context("Validation failed")?;

    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Formula matches the encoding shape"));
    } else {
        println!("{}", ColorOutput::error("Formula is invalid"));
        for violation in result.violations.iter().take(10) {
            println!("  - {}", violation.description);
        }
    }

    Ok(())
}

fn analyze_command(network_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing network..."));

    let network = load_network_from_file(&network_path)
        .with_context(|| format!("Failed to load network from {}", network_path.display()))?;

    println!("{}", FormulaFormatter::format_network(&network));
    println!("{}", FormulaFormatter::format_variable_table(&network)?);

    let encoder = Enc1Encoder::default();
    println!("{}", encoder.statistics(&network)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "bayes_cnf",
            "encode",
            "--config",
            "test.yaml",
            "--parallel",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/networks/sprinkler.bif").exists());
    }

    #[test]
    fn test_analyze_command() {
        let temp_dir = tempdir().unwrap();
        create_example_networks(temp_dir.path()).unwrap();

        let result = analyze_command(temp_dir.path().join("survey.bif"));
        assert!(result.is_ok());
    }
}
