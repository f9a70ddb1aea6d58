//! In-memory Bayesian network model
//!
//! The encoder only consumes structure: variable names, domain sizes and
//! ordered parent lists. Probability values are carried through from the
//! loader so their shape can be checked, but they are never interpreted.

use std::collections::HashMap;
use thiserror::Error;

/// Well-formedness violations detected in a loaded network
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("duplicate variable name '{0}'")]
    DuplicateVariable(String),

    #[error("variable '{variable}' references unknown parent '{parent}'")]
    UnknownParent { variable: String, parent: String },

    #[error("variable '{0}' has an empty domain")]
    EmptyDomain(String),

    #[error("parent cycle detected through variable '{0}'")]
    CycleDetected(String),

    #[error("variable '{variable}' has {actual} probability rows, expected {expected}")]
    TableRowCount {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("variable '{variable}' probability row {row} has {actual} entries, expected {expected}")]
    TableRowWidth {
        variable: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("variable '{variable}' probability row {row} sums to {sum}")]
    TableRowSum {
        variable: String,
        row: usize,
        sum: f64,
    },
}

/// A discrete random variable: named domain states, ordered parents and
/// one probability row per parent configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkVariable {
    pub name: String,
    pub states: Vec<String>,
    pub parents: Vec<String>,
    pub table: Vec<Vec<f64>>,
}

impl NetworkVariable {
    /// Create a root variable with the given domain states
    pub fn new(name: impl Into<String>, states: Vec<String>) -> Self {
        Self {
            name: name.into(),
            states,
            parents: Vec::new(),
            table: Vec::new(),
        }
    }

    /// Set the ordered parent list
    pub fn with_parents(mut self, parents: Vec<String>) -> Self {
        self.parents = parents;
        self
    }

    /// Set the probability table, one row per parent configuration
    pub fn with_table(mut self, table: Vec<Vec<f64>>) -> Self {
        self.table = table;
        self
    }

    /// Number of domain values
    pub fn domain_size(&self) -> usize {
        self.states.len()
    }

    pub fn has_parents(&self) -> bool {
        !self.parents.is_empty()
    }
}

/// A discrete Bayesian network
#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    variables: Vec<NetworkVariable>,
    index: HashMap<String, usize>,
}

impl Network {
    /// Build a network from an ordered variable list
    pub fn from_variables(
        name: impl Into<String>,
        variables: Vec<NetworkVariable>,
    ) -> Result<Self, NetworkError> {
        let mut index = HashMap::with_capacity(variables.len());
        for (i, variable) in variables.iter().enumerate() {
            if index.insert(variable.name.clone(), i).is_some() {
                return Err(NetworkError::DuplicateVariable(variable.name.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            variables,
            index,
        })
    }

    /// Variables in network order
    pub fn variables(&self) -> &[NetworkVariable] {
        &self.variables
    }

    /// Variable names in network order
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&NetworkVariable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    /// Domain size of a variable, if present
    pub fn domain_size(&self, name: &str) -> Option<usize> {
        self.variable(name).map(NetworkVariable::domain_size)
    }

    /// Ordered parent names of a variable, if present
    pub fn parents(&self, name: &str) -> Option<&[String]> {
        self.variable(name).map(|v| v.parents.as_slice())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Domain sizes of a variable's parents, in parent order.
    ///
    /// An unknown parent name is an input-contract violation from the
    /// loader and is reported as such.
    pub fn parent_domain_sizes(
        &self,
        variable: &NetworkVariable,
    ) -> Result<Vec<usize>, NetworkError> {
        variable
            .parents
            .iter()
            .map(|parent| {
                self.domain_size(parent)
                    .ok_or_else(|| NetworkError::UnknownParent {
                        variable: variable.name.clone(),
                        parent: parent.clone(),
                    })
            })
            .collect()
    }

    /// Check network well-formedness: non-empty domains, resolvable
    /// parents, acyclic structure and consistent probability-table shape.
    ///
    /// A variable without probability entries is accepted; the encoder
    /// never consumes the values, only the structure.
    pub fn validate(&self) -> Result<(), NetworkError> {
        for variable in &self.variables {
            if variable.states.is_empty() {
                return Err(NetworkError::EmptyDomain(variable.name.clone()));
            }

            for parent in &variable.parents {
                if !self.index.contains_key(parent) {
                    return Err(NetworkError::UnknownParent {
                        variable: variable.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }

            if !variable.table.is_empty() {
                self.validate_table(variable)?;
            }
        }

        self.validate_acyclic()
    }

    fn validate_table(&self, variable: &NetworkVariable) -> Result<(), NetworkError> {
        let expected_rows: usize = self.parent_domain_sizes(variable)?.iter().product();

        if variable.table.len() != expected_rows {
            return Err(NetworkError::TableRowCount {
                variable: variable.name.clone(),
                expected: expected_rows,
                actual: variable.table.len(),
            });
        }

        for (row_idx, row) in variable.table.iter().enumerate() {
            if row.len() != variable.domain_size() {
                return Err(NetworkError::TableRowWidth {
                    variable: variable.name.clone(),
                    row: row_idx,
                    expected: variable.domain_size(),
                    actual: row.len(),
                });
            }

            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > 1e-6 {
                return Err(NetworkError::TableRowSum {
                    variable: variable.name.clone(),
                    row: row_idx,
                    sum,
                });
            }
        }

        Ok(())
    }

    /// Depth-first cycle check over the parent edges
    fn validate_acyclic(&self) -> Result<(), NetworkError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(
            network: &Network,
            idx: usize,
            marks: &mut [Mark],
        ) -> Result<(), NetworkError> {
            match marks[idx] {
                Mark::Done => return Ok(()),
                Mark::InProgress => {
                    return Err(NetworkError::CycleDetected(
                        network.variables[idx].name.clone(),
                    ))
                }
                Mark::Unvisited => {}
            }

            marks[idx] = Mark::InProgress;
            for parent in &network.variables[idx].parents {
                if let Some(&parent_idx) = network.index.get(parent) {
                    visit(network, parent_idx, marks)?;
                }
            }
            marks[idx] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.variables.len()];
        for idx in 0..self.variables.len() {
            visit(self, idx, &mut marks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(name: &str) -> NetworkVariable {
        NetworkVariable::new(name, vec!["false".to_string(), "true".to_string()])
    }

    #[test]
    fn test_structure_queries() {
        let network = Network::from_variables(
            "test",
            vec![
                binary("A"),
                binary("B").with_parents(vec!["A".to_string()]),
            ],
        )
        .unwrap();

        assert_eq!(network.len(), 2);
        assert_eq!(network.variable_names(), vec!["A", "B"]);
        assert_eq!(network.domain_size("A"), Some(2));
        assert_eq!(network.parents("B").unwrap(), &["A".to_string()]);
        assert!(network.variable("C").is_none());
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let result = Network::from_variables("test", vec![binary("A"), binary("A")]);
        assert!(matches!(result, Err(NetworkError::DuplicateVariable(_))));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let network = Network::from_variables(
            "test",
            vec![binary("B").with_parents(vec!["Missing".to_string()])],
        )
        .unwrap();

        assert!(matches!(
            network.validate(),
            Err(NetworkError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let network = Network::from_variables(
            "test",
            vec![
                binary("A").with_parents(vec!["B".to_string()]),
                binary("B").with_parents(vec!["A".to_string()]),
            ],
        )
        .unwrap();

        assert!(matches!(
            network.validate(),
            Err(NetworkError::CycleDetected(_))
        ));
    }

    #[test]
    fn test_valid_chain_accepted() {
        let network = Network::from_variables(
            "test",
            vec![
                binary("A").with_table(vec![vec![0.4, 0.6]]),
                binary("B")
                    .with_parents(vec!["A".to_string()])
                    .with_table(vec![vec![0.1, 0.9], vec![0.7, 0.3]]),
            ],
        )
        .unwrap();

        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_table_shape_checked() {
        // one row missing: a binary parent needs two configurations
        let network = Network::from_variables(
            "test",
            vec![
                binary("A").with_table(vec![vec![0.4, 0.6]]),
                binary("B")
                    .with_parents(vec!["A".to_string()])
                    .with_table(vec![vec![0.1, 0.9]]),
            ],
        )
        .unwrap();

        assert!(matches!(
            network.validate(),
            Err(NetworkError::TableRowCount { .. })
        ));
    }

    #[test]
    fn test_table_row_sum_checked() {
        let network = Network::from_variables(
            "test",
            vec![binary("A").with_table(vec![vec![0.4, 0.4]])],
        )
        .unwrap();

        assert!(matches!(
            network.validate(),
            Err(NetworkError::TableRowSum { .. })
        ));
    }

    #[test]
    fn test_parent_domain_sizes() {
        let ternary = NetworkVariable::new(
            "C",
            vec!["low".to_string(), "mid".to_string(), "high".to_string()],
        );
        let child = binary("D").with_parents(vec!["A".to_string(), "C".to_string()]);
        let network =
            Network::from_variables("test", vec![binary("A"), ternary, child]).unwrap();

        let sizes = network
            .parent_domain_sizes(network.variable("D").unwrap())
            .unwrap();
        assert_eq!(sizes, vec![2, 3]);
    }
}
