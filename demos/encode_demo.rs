//! Demonstration of the ENC1 encoding pipeline
//!
//! Builds a small network in code, encodes it, and checks the result
//! against the closed-form clause counts.

use bayes_cnf::cnf::Enc1Encoder;
use bayes_cnf::encoding::FormulaValidator;
use bayes_cnf::network::{Network, NetworkVariable};
use bayes_cnf::utils::FormulaFormatter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ENC1 Encoding Demonstration ===\n");

    // Rain -> Sprinkler, {Sprinkler, Rain} -> Wet
    let network = Network::from_variables(
        "sprinkler",
        vec![
            NetworkVariable::new("Rain", vec!["no".to_string(), "yes".to_string()])
                .with_table(vec![vec![0.8, 0.2]]),
            NetworkVariable::new("Sprinkler", vec!["off".to_string(), "on".to_string()])
                .with_parents(vec!["Rain".to_string()])
                .with_table(vec![vec![0.6, 0.4], vec![0.99, 0.01]]),
            NetworkVariable::new("Wet", vec!["dry".to_string(), "wet".to_string()])
                .with_parents(vec!["Sprinkler".to_string(), "Rain".to_string()])
                .with_table(vec![
                    vec![1.0, 0.0],
                    vec![0.2, 0.8],
                    vec![0.1, 0.9],
                    vec![0.01, 0.99],
                ]),
        ],
    )?;
    network.validate()?;

    println!("{}", FormulaFormatter::format_network(&network));

    let encoder = Enc1Encoder::default();
    println!("{}", encoder.statistics(&network)?);

    let formula = encoder.encode(&network)?;
    println!("First clauses of the formula:");
    println!("{}", FormulaFormatter::format_formula_preview(&formula, 12));

    let result = FormulaValidator::new().validate(&network, &formula)?;
    if result.is_valid {
        println!("Formula matches the expected encoding shape");
    } else {
        println!("Unexpected encoding shape: {:?}", result.error_message);
    }

    Ok(())
}
