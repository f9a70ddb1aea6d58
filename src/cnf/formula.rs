//! Structured CNF representation for the ENC1 encoding
//!
//! Clauses are built from typed propositions and only rendered to the
//! textual `!`/`||` grammar as a separate serialization step.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One parent assignment inside a parameter proposition.
///
/// Values are 1-based in the parameter layer of the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentValue {
    pub parent: String,
    pub value: usize,
}

impl ParentValue {
    pub fn new(parent: impl Into<String>, value: usize) -> Self {
        Self {
            parent: parent.into(),
            value,
        }
    }
}

/// A boolean proposition of the encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proposition {
    /// Indicator λ(v, k): "variable v takes domain value k" (0-based k)
    Indicator { variable: String, value: usize },
    /// Parameter θ(v, x, c): carries the conditional-probability weight for
    /// value x of v under parent configuration c. An empty condition is the
    /// prior parameter θ(v, x) of a parent-less variable.
    Parameter {
        variable: String,
        value: usize,
        condition: Vec<ParentValue>,
    },
}

impl Proposition {
    /// Indicator proposition λ(variable, value)
    pub fn indicator(variable: impl Into<String>, value: usize) -> Self {
        Self::Indicator {
            variable: variable.into(),
            value,
        }
    }

    /// Prior parameter θ(variable, value) for a parent-less variable
    pub fn prior(variable: impl Into<String>, value: usize) -> Self {
        Self::Parameter {
            variable: variable.into(),
            value,
            condition: Vec::new(),
        }
    }

    /// Conditional parameter θ(variable, value, condition)
    pub fn parameter(
        variable: impl Into<String>,
        value: usize,
        condition: Vec<ParentValue>,
    ) -> Self {
        Self::Parameter {
            variable: variable.into(),
            value,
            condition,
        }
    }

    /// Name of the network variable this proposition belongs to
    pub fn variable(&self) -> &str {
        match self {
            Self::Indicator { variable, .. } => variable,
            Self::Parameter { variable, .. } => variable,
        }
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter { .. })
    }
}

impl std::fmt::Display for Proposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Indicator { variable, value } => write!(f, "lambda_{}_{}", variable, value),
            Self::Parameter {
                variable,
                value,
                condition,
            } => {
                write!(f, "theta_{}_{}", variable, value)?;
                for pv in condition {
                    write!(f, "_{}_{}", pv.parent, pv.value)?;
                }
                Ok(())
            }
        }
    }
}

/// A proposition together with its polarity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub proposition: Proposition,
    pub negated: bool,
}

impl Literal {
    /// Positive literal
    pub fn positive(proposition: Proposition) -> Self {
        Self {
            proposition,
            negated: false,
        }
    }

    /// Negated literal
    pub fn negative(proposition: Proposition) -> Self {
        Self {
            proposition,
            negated: true,
        }
    }

    /// The same proposition with flipped polarity
    pub fn negate(&self) -> Self {
        Self {
            proposition: self.proposition.clone(),
            negated: !self.negated,
        }
    }

    pub fn is_positive(&self) -> bool {
        !self.negated
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "!{}", self.proposition)
        } else {
            write!(f, "{}", self.proposition)
        }
    }
}

/// A disjunction of literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause from literals
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: Literal) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(first: Literal, second: Literal) -> Self {
        Self {
            literals: vec![first, second],
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Whether any literal of this clause is a parameter proposition
    pub fn mentions_parameter(&self) -> bool {
        self.literals.iter().any(|l| l.proposition.is_parameter())
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literals.iter().join("||"))
    }
}

/// A CNF formula: a sequence of clauses, implicitly conjoined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub clauses: Vec<Clause>,
}

impl Formula {
    /// Create a formula from a clause sequence
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Total number of literal occurrences across all clauses
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Width of the widest clause
    pub fn max_clause_width(&self) -> usize {
        self.clauses.iter().map(Clause::len).max().unwrap_or(0)
    }

    /// Render the formula in the textual grammar, one clause per line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for clause in &self.clauses {
            out.push_str(&clause.to_string());
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_names() {
        let prop = Proposition::indicator("Rain", 0);
        assert_eq!(prop.to_string(), "lambda_Rain_0");
        assert_eq!(prop.variable(), "Rain");
    }

    #[test]
    fn test_parameter_names() {
        let prior = Proposition::prior("A", 1);
        assert_eq!(prior.to_string(), "theta_A_1");

        let conditional = Proposition::parameter(
            "B",
            0,
            vec![ParentValue::new("A", 1), ParentValue::new("C", 2)],
        );
        assert_eq!(conditional.to_string(), "theta_B_0_A_1_C_2");
    }

    #[test]
    fn test_literal_polarity() {
        let lit = Literal::negative(Proposition::indicator("A", 1));
        assert_eq!(lit.to_string(), "!lambda_A_1");
        assert!(!lit.is_positive());

        let flipped = lit.negate();
        assert_eq!(flipped.to_string(), "lambda_A_1");
        assert!(flipped.is_positive());
    }

    #[test]
    fn test_clause_display() {
        let clause = Clause::binary(
            Literal::negative(Proposition::indicator("A", 0)),
            Literal::negative(Proposition::indicator("A", 1)),
        );
        assert_eq!(clause.to_string(), "!lambda_A_0||!lambda_A_1");
        assert_eq!(clause.len(), 2);
        assert!(!clause.is_unit());
    }

    #[test]
    fn test_unit_clause() {
        let clause = Clause::unit(Literal::positive(Proposition::prior("A", 0)));
        assert!(clause.is_unit());
        assert_eq!(clause.to_string(), "theta_A_0");
    }

    #[test]
    fn test_formula_text() {
        let formula = Formula::new(vec![
            Clause::unit(Literal::positive(Proposition::indicator("A", 0))),
            Clause::binary(
                Literal::negative(Proposition::indicator("A", 0)),
                Literal::positive(Proposition::prior("A", 0)),
            ),
        ]);

        assert_eq!(formula.len(), 2);
        assert_eq!(formula.literal_count(), 3);
        assert_eq!(formula.max_clause_width(), 2);
        assert_eq!(formula.to_text(), "lambda_A_0\n!lambda_A_0||theta_A_0\n");
    }

    #[test]
    fn test_formula_json_round_trip() {
        let formula = Formula::new(vec![Clause::unit(Literal::positive(Proposition::parameter(
            "B",
            1,
            vec![ParentValue::new("A", 2)],
        )))]);

        let json = serde_json::to_string(&formula).unwrap();
        let back: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(formula, back);
    }
}
