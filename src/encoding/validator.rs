//! Formula validation against the encoding's clause-count laws
//!
//! A correct ENC1 formula has a fixed shape for a given network: the
//! per-variable clause counts follow closed forms, the indicator section
//! precedes the parameter section, and every parameter literal is
//! introduced exactly once. The validator re-derives those laws from the
//! network and checks a formula against them.

use crate::cnf::{ClauseGenerator, Formula};
use crate::network::Network;
use anyhow::Result;
use std::collections::HashMap;

/// Validates encoded formulas against their source network
pub struct FormulaValidator;

/// Result of formula validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub violations: Vec<CountViolation>,
    pub details: ValidationDetails,
}

/// Detailed validation information
#[derive(Debug, Clone, Default)]
pub struct ValidationDetails {
    pub variables_checked: usize,
    pub indicator_clauses_found: usize,
    pub parameter_clauses_found: usize,
    pub parameter_literals_found: usize,
    pub sections_ordered: bool,
}

/// One mismatch between the formula and the expected encoding shape
#[derive(Debug, Clone)]
pub struct CountViolation {
    pub variable: String,
    pub expected: usize,
    pub actual: usize,
    pub description: String,
}

impl FormulaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check a formula against the clause-count laws of its network
    pub fn validate(&self, network: &Network, formula: &Formula) -> Result<ValidationResult> {
        let mut violations = Vec::new();

        // attribute each clause to its variable
        let mut indicator_counts: HashMap<&str, usize> = HashMap::new();
        let mut parameter_counts: HashMap<&str, usize> = HashMap::new();
        let mut positive_parameter_uses: HashMap<String, usize> = HashMap::new();
        let mut last_indicator = None;
        let mut first_parameter = None;
        let mut indicator_clauses_found = 0;
        let mut parameter_clauses_found = 0;

        for (idx, clause) in formula.iter().enumerate() {
            let parameter_literal = clause
                .literals
                .iter()
                .find(|l| l.proposition.is_parameter());

            match parameter_literal {
                Some(literal) => {
                    parameter_clauses_found += 1;
                    first_parameter.get_or_insert(idx);
                    *parameter_counts
                        .entry(literal.proposition.variable())
                        .or_default() += 1;

                    for lit in &clause.literals {
                        if lit.proposition.is_parameter() && lit.is_positive() {
                            *positive_parameter_uses
                                .entry(lit.proposition.to_string())
                                .or_default() += 1;
                        }
                    }
                }
                None => {
                    indicator_clauses_found += 1;
                    last_indicator = Some(idx);
                    if let Some(first) = clause.literals.first() {
                        *indicator_counts
                            .entry(first.proposition.variable())
                            .or_default() += 1;
                    }
                }
            }
        }

        // per-variable counts must match the closed forms
        let mut parameter_literals_expected = 0;
        for variable in network.variables() {
            let domain = variable.domain_size();
            let parent_sizes = network.parent_domain_sizes(variable)?;

            let expected = ClauseGenerator::expected_indicator_count(domain);
            let actual = indicator_counts.get(variable.name.as_str()).copied().unwrap_or(0);
            if actual != expected {
                violations.push(CountViolation {
                    variable: variable.name.clone(),
                    expected,
                    actual,
                    description: format!(
                        "indicator clause count for '{}': expected {}, found {}",
                        variable.name, expected, actual
                    ),
                });
            }

            let expected = ClauseGenerator::expected_parameter_count(domain, &parent_sizes);
            let actual = parameter_counts.get(variable.name.as_str()).copied().unwrap_or(0);
            if actual != expected {
                violations.push(CountViolation {
                    variable: variable.name.clone(),
                    expected,
                    actual,
                    description: format!(
                        "parameter clause count for '{}': expected {}, found {}",
                        variable.name, expected, actual
                    ),
                });
            }

            parameter_literals_expected += domain * parent_sizes.iter().product::<usize>();
        }

        // every parameter literal is introduced positively exactly once
        for (name, uses) in &positive_parameter_uses {
            if *uses != 1 {
                violations.push(CountViolation {
                    variable: name.clone(),
                    expected: 1,
                    actual: *uses,
                    description: format!("parameter literal '{}' introduced {} times", name, uses),
                });
            }
        }
        if positive_parameter_uses.len() != parameter_literals_expected {
            violations.push(CountViolation {
                variable: String::from("<formula>"),
                expected: parameter_literals_expected,
                actual: positive_parameter_uses.len(),
                description: format!(
                    "distinct parameter literals: expected {}, found {}",
                    parameter_literals_expected,
                    positive_parameter_uses.len()
                ),
            });
        }

        // indicator section must precede the parameter section
        let sections_ordered = match (last_indicator, first_parameter) {
            (Some(last), Some(first)) => last < first,
            _ => true,
        };
        if !sections_ordered {
            violations.push(CountViolation {
                variable: String::from("<formula>"),
                expected: 0,
                actual: 0,
                description: String::from(
                    "indicator clauses appear after the parameter section",
                ),
            });
        }

        let is_valid = violations.is_empty();
        let error_message = if is_valid {
            None
        } else {
            Some(Self::summarize_violations(&violations))
        };

        Ok(ValidationResult {
            is_valid,
            error_message,
            violations,
            details: ValidationDetails {
                variables_checked: network.len(),
                indicator_clauses_found,
                parameter_clauses_found,
                parameter_literals_found: positive_parameter_uses.len(),
                sections_ordered,
            },
        })
    }

    fn summarize_violations(violations: &[CountViolation]) -> String {
        let mut message = format!("{} encoding violations. ", violations.len());

        for (i, violation) in violations.iter().take(3).enumerate() {
            if i == 0 {
                message.push_str("Examples: ");
            }
            message.push_str(&violation.description);
            message.push_str("; ");
        }

        if violations.len() > 3 {
            message.push_str(&format!("... and {} more", violations.len() - 3));
        }

        message
    }
}

impl Default for FormulaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Validation Result: {}",
            if self.is_valid { "VALID" } else { "INVALID" }
        )?;

        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }

        writeln!(f, "Variables checked: {}", self.details.variables_checked)?;
        writeln!(f, "Indicator clauses: {}", self.details.indicator_clauses_found)?;
        writeln!(f, "Parameter clauses: {}", self.details.parameter_clauses_found)?;
        writeln!(f, "Parameter literals: {}", self.details.parameter_literals_found)?;
        writeln!(f, "Sections ordered: {}", self.details.sections_ordered)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::{Clause, Enc1Encoder, Literal, Proposition};
    use crate::network::NetworkVariable;

    fn binary(name: &str) -> NetworkVariable {
        NetworkVariable::new(name, vec!["false".to_string(), "true".to_string()])
    }

    fn chain_network() -> Network {
        Network::from_variables(
            "chain",
            vec![binary("A"), binary("B").with_parents(vec!["A".to_string()])],
        )
        .unwrap()
    }

    #[test]
    fn test_valid_encoding_passes() {
        let network = chain_network();
        let formula = Enc1Encoder::default().encode(&network).unwrap();

        let result = FormulaValidator::new().validate(&network, &formula).unwrap();
        assert!(result.is_valid, "{:?}", result.error_message);
        assert!(result.details.sections_ordered);
        assert_eq!(result.details.indicator_clauses_found, 4);
        assert_eq!(result.details.parameter_clauses_found, 10);
        // 2 priors for A, 2 values * 2 configurations for B
        assert_eq!(result.details.parameter_literals_found, 6);
    }

    #[test]
    fn test_missing_clause_detected() {
        let network = chain_network();
        let mut formula = Enc1Encoder::default().encode(&network).unwrap();
        formula.clauses.pop();

        let result = FormulaValidator::new().validate(&network, &formula).unwrap();
        assert!(!result.is_valid);
        assert!(result.error_message.is_some());
        assert!(result.violations.iter().any(|v| v.variable == "B"));
    }

    #[test]
    fn test_misordered_sections_detected() {
        let network = chain_network();
        let mut formula = Enc1Encoder::default().encode(&network).unwrap();

        // move an indicator clause behind the parameter section
        let clause = formula.clauses.remove(0);
        formula.clauses.push(clause);

        let result = FormulaValidator::new().validate(&network, &formula).unwrap();
        assert!(!result.is_valid);
        assert!(!result.details.sections_ordered);
    }

    #[test]
    fn test_duplicate_parameter_detected() {
        let network = chain_network();
        let mut formula = Enc1Encoder::default().encode(&network).unwrap();

        // introduce theta_A_0 a second time
        formula
            .clauses
            .push(Clause::unit(Literal::positive(Proposition::prior("A", 0))));

        let result = FormulaValidator::new().validate(&network, &formula).unwrap();
        assert!(!result.is_valid);
        assert!(result
            .violations
            .iter()
            .any(|v| v.description.contains("theta_A_0")));
    }

    #[test]
    fn test_empty_formula_reports_every_variable() {
        let network = chain_network();
        let formula = Formula::default();

        let result = FormulaValidator::new().validate(&network, &formula).unwrap();
        assert!(!result.is_valid);
        // one indicator and one parameter violation per variable, plus the
        // missing distinct-literal total
        assert_eq!(result.violations.len(), 5);
    }
}
