//! Network file loading
//!
//! Reads a practical subset of the BIF interchange format: `network`,
//! `variable` blocks with discrete domains, and `probability` blocks whose
//! rows are either a flat `table` statement or one `( config ) ...` line
//! per parent configuration. Probability rows are stored in file order;
//! the encoder only consumes the structure.

use super::model::{Network, NetworkVariable};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load a network from a BIF file
pub fn load_network_from_file<P: AsRef<Path>>(path: P) -> Result<Network> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read network file: {}", path.as_ref().display()))?;

    parse_network_from_string(&content)
        .with_context(|| format!("Failed to parse network file: {}", path.as_ref().display()))
}

/// Parse a network from BIF text
pub fn parse_network_from_string(content: &str) -> Result<Network> {
    let stripped = strip_comments(content);
    let blocks = top_level_blocks(&stripped)?;

    let mut network_name = String::from("unnamed");
    let mut variables: Vec<NetworkVariable> = Vec::new();
    let mut tabled: HashSet<String> = HashSet::new();

    for (header, body) in &blocks {
        let mut words = header.split_whitespace();
        match words.next() {
            Some("network") => {
                if let Some(name) = words.next() {
                    network_name = name.to_string();
                }
            }
            Some("variable") => {
                let name = words
                    .next()
                    .with_context(|| format!("variable block '{}' has no name", header))?;
                variables.push(parse_variable_block(name, body)?);
            }
            Some("probability") => {
                let (target, parents) = parse_probability_header(header)?;
                let variable = variables
                    .iter_mut()
                    .find(|v| v.name == target)
                    .with_context(|| {
                        format!("probability block for undeclared variable '{}'", target)
                    })?;

                if !tabled.insert(target.clone()) {
                    anyhow::bail!("duplicate probability block for variable '{}'", target);
                }

                let domain = variable.domain_size();
                variable.parents = parents;
                variable.table = parse_probability_body(&target, body, domain)?;
            }
            Some(other) => anyhow::bail!("unrecognized block '{}'", other),
            None => anyhow::bail!("block with empty header"),
        }
    }

    if variables.is_empty() {
        anyhow::bail!("network file declares no variables");
    }

    let network = Network::from_variables(network_name, variables)?;
    network.validate().context("network is not well-formed")?;
    Ok(network)
}

/// Remove `//` comments, line by line
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| match line.find("//") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split the file into (header, body) pairs at top-level brace depth
fn top_level_blocks(content: &str) -> Result<Vec<(String, String)>> {
    let mut blocks = Vec::new();
    let mut header = String::new();
    let mut body = String::new();
    let mut depth = 0usize;

    for ch in content.chars() {
        match ch {
            '{' => {
                if depth > 0 {
                    body.push(ch);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    anyhow::bail!("unbalanced '}}' in network file");
                }
                depth -= 1;
                if depth == 0 {
                    blocks.push((header.trim().to_string(), body.clone()));
                    header.clear();
                    body.clear();
                } else {
                    body.push(ch);
                }
            }
            _ => {
                if depth == 0 {
                    header.push(ch);
                } else {
                    body.push(ch);
                }
            }
        }
    }

    if depth != 0 {
        anyhow::bail!("unbalanced '{{' in network file");
    }
    if !header.trim().is_empty() {
        anyhow::bail!("trailing content outside block: '{}'", header.trim());
    }

    Ok(blocks)
}

/// Parse `type discrete [ d ] { s1, s2, ... };` inside a variable block
fn parse_variable_block(name: &str, body: &str) -> Result<NetworkVariable> {
    for statement in body.split(';') {
        let statement = statement.trim();
        if !statement.starts_with("type") {
            continue;
        }

        if !statement.contains("discrete") {
            anyhow::bail!("variable '{}' is not discrete", name);
        }

        let declared: usize = between(statement, '[', ']')
            .with_context(|| format!("variable '{}' is missing its domain size", name))?
            .trim()
            .parse()
            .with_context(|| format!("variable '{}' has a malformed domain size", name))?;

        let states: Vec<String> = between(statement, '{', '}')
            .with_context(|| format!("variable '{}' lists no domain states", name))?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if states.is_empty() {
            anyhow::bail!("variable '{}' lists no domain states", name);
        }
        if states.len() != declared {
            anyhow::bail!(
                "variable '{}' declares {} values but lists {} states",
                name,
                declared,
                states.len()
            );
        }

        return Ok(NetworkVariable::new(name, states));
    }

    anyhow::bail!("variable '{}' has no type statement", name)
}

/// Parse `probability ( X | P1, P2 )` into (target, parents)
fn parse_probability_header(header: &str) -> Result<(String, Vec<String>)> {
    let inside = between(header, '(', ')')
        .with_context(|| format!("malformed probability header '{}'", header))?;

    let (target, parents) = match inside.split_once('|') {
        Some((target, parents)) => (
            target.trim().to_string(),
            parents
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        ),
        None => (inside.trim().to_string(), Vec::new()),
    };

    if target.is_empty() {
        anyhow::bail!("probability header '{}' names no variable", header);
    }
    Ok((target, parents))
}

/// Parse probability rows: a flat `table` statement is chunked into rows of
/// the target's domain size, `( config ) ...` lines contribute one row each
fn parse_probability_body(target: &str, body: &str, domain: usize) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();

    for statement in body.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        if let Some(numbers) = statement.strip_prefix("table") {
            let values = parse_numbers(target, numbers)?;
            if values.len() % domain != 0 {
                anyhow::bail!(
                    "table for '{}' has {} entries, not a multiple of its domain size {}",
                    target,
                    values.len(),
                    domain
                );
            }
            rows.extend(values.chunks(domain).map(<[f64]>::to_vec));
        } else if statement.starts_with('(') {
            let after = statement
                .split_once(')')
                .map(|(_, rest)| rest)
                .with_context(|| format!("malformed probability row for '{}'", target))?;
            rows.push(parse_numbers(target, after)?);
        } else {
            anyhow::bail!("unrecognized probability statement for '{}': '{}'", target, statement);
        }
    }

    if rows.is_empty() {
        anyhow::bail!("probability block for '{}' contains no rows", target);
    }
    Ok(rows)
}

fn parse_numbers(target: &str, text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .with_context(|| format!("invalid probability value '{}' for '{}'", t, target))
        })
        .collect()
}

/// Substring strictly between the first `open` and the last `close`
fn between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&text[start..end])
}

/// Write small example networks for the setup command
pub fn create_example_networks<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let sprinkler = "\
network sprinkler {
}
variable Rain {
  type discrete [ 2 ] { no, yes };
}
variable Sprinkler {
  type discrete [ 2 ] { off, on };
}
variable Wet {
  type discrete [ 2 ] { dry, wet };
}
probability ( Rain ) {
  table 0.8, 0.2;
}
probability ( Sprinkler | Rain ) {
  ( no ) 0.6, 0.4;
  ( yes ) 0.99, 0.01;
}
probability ( Wet | Sprinkler, Rain ) {
  ( off, no ) 1.0, 0.0;
  ( off, yes ) 0.2, 0.8;
  ( on, no ) 0.1, 0.9;
  ( on, yes ) 0.01, 0.99;
}
";
    std::fs::write(dir.join("sprinkler.bif"), sprinkler)
        .context("Failed to write sprinkler.bif")?;

    let survey = "\
network survey {
}
variable Age {
  type discrete [ 3 ] { young, adult, old };
}
variable Education {
  type discrete [ 2 ] { high, uni };
}
variable Transport {
  type discrete [ 3 ] { car, train, other };
}
probability ( Age ) {
  table 0.3, 0.5, 0.2;
}
probability ( Education | Age ) {
  ( young ) 0.75, 0.25;
  ( adult ) 0.72, 0.28;
  ( old ) 0.88, 0.12;
}
probability ( Transport | Education ) {
  ( high ) 0.56, 0.36, 0.08;
  ( uni ) 0.58, 0.24, 0.18;
}
";
    std::fs::write(dir.join("survey.bif"), survey).context("Failed to write survey.bif")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CHAIN: &str = "\
network chain {
}
variable A {
  type discrete [ 2 ] { a0, a1 };
}
variable B {
  type discrete [ 2 ] { b0, b1 };
}
probability ( A ) {
  table 0.4, 0.6;
}
probability ( B | A ) {
  ( a0 ) 0.1, 0.9;
  ( a1 ) 0.7, 0.3;
}
";

    #[test]
    fn test_parse_chain() {
        let network = parse_network_from_string(CHAIN).unwrap();

        assert_eq!(network.name, "chain");
        assert_eq!(network.variable_names(), vec!["A", "B"]);
        assert_eq!(network.domain_size("A"), Some(2));
        assert_eq!(network.parents("B").unwrap(), &["A".to_string()]);

        let b = network.variable("B").unwrap();
        assert_eq!(b.table, vec![vec![0.1, 0.9], vec![0.7, 0.3]]);
    }

    #[test]
    fn test_parse_flat_table_with_parents() {
        let content = "\
network t {
}
variable A {
  type discrete [ 2 ] { a0, a1 };
}
variable B {
  type discrete [ 2 ] { b0, b1 };
}
probability ( A ) {
  table 0.5, 0.5;
}
probability ( B | A ) {
  table 0.1, 0.9, 0.7, 0.3;
}
";
        let network = parse_network_from_string(content).unwrap();
        let b = network.variable("B").unwrap();
        assert_eq!(b.table.len(), 2);
        assert_eq!(b.table[1], vec![0.7, 0.3]);
    }

    #[test]
    fn test_comments_ignored() {
        let content = CHAIN.replace(
            "network chain {",
            "// a header comment\nnetwork chain { // trailing",
        );
        let network = parse_network_from_string(&content).unwrap();
        assert_eq!(network.name, "chain");
    }

    #[test]
    fn test_state_count_mismatch_rejected() {
        let content = "\
network bad {
}
variable A {
  type discrete [ 3 ] { a0, a1 };
}
probability ( A ) {
  table 0.5, 0.5;
}
";
        assert!(parse_network_from_string(content).is_err());
    }

    #[test]
    fn test_probability_for_undeclared_variable_rejected() {
        let content = "\
network bad {
}
variable A {
  type discrete [ 2 ] { a0, a1 };
}
probability ( Ghost ) {
  table 0.5, 0.5;
}
";
        let error = parse_network_from_string(content).unwrap_err();
        assert!(format!("{:#}", error).contains("Ghost"));
    }

    #[test]
    fn test_incomplete_table_rejected() {
        // B has a binary parent but only one configuration row
        let content = CHAIN.replace("  ( a1 ) 0.7, 0.3;\n", "");
        assert!(parse_network_from_string(&content).is_err());
    }

    #[test]
    fn test_unbalanced_braces_rejected() {
        assert!(parse_network_from_string("network x {").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("chain.bif");
        std::fs::write(&path, CHAIN).unwrap();

        let network = load_network_from_file(&path).unwrap();
        assert_eq!(network.len(), 2);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let error = load_network_from_file("no/such/file.bif").unwrap_err();
        assert!(format!("{:#}", error).contains("no/such/file.bif"));
    }

    #[test]
    fn test_create_example_networks() {
        let temp_dir = tempdir().unwrap();
        create_example_networks(temp_dir.path()).unwrap();

        let sprinkler = load_network_from_file(temp_dir.path().join("sprinkler.bif")).unwrap();
        assert_eq!(sprinkler.len(), 3);
        assert_eq!(
            sprinkler.parents("Wet").unwrap(),
            &["Sprinkler".to_string(), "Rain".to_string()]
        );

        let survey = load_network_from_file(temp_dir.path().join("survey.bif")).unwrap();
        assert_eq!(survey.domain_size("Age"), Some(3));
    }
}
