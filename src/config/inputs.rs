use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::scoring::ElementInputs;

/// Load raw element inputs from a YAML or JSON map of name to number.
pub fn load_inputs(path: &Path) -> Result<ElementInputs> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inputs file at {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(ElementInputs::new());
    }

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse inputs in {}", path.display()))
}

/// Parse a `name=value` override. The name may contain spaces; the value must be a number.
pub fn parse_assignment(s: &str) -> Result<(String, f64)> {
    let Some((name, value)) = s.rsplit_once('=') else {
        bail!("Invalid input '{}': expected NAME=VALUE", s);
    };

    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid input '{}': name is empty", s);
    }

    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid input '{}': value is not a number", s))?;

    Ok((name.to_string(), value))
}

/// Parse every assignment and apply it over `inputs`; later assignments win.
pub fn apply_overrides(inputs: &mut ElementInputs, assignments: &[String]) -> Result<()> {
    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        inputs.insert(name, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("Ethereum Address Age=400").unwrap(),
            ("Ethereum Address Age".to_string(), 400.0)
        );
        assert_eq!(parse_assignment(" age = -2.5 ").unwrap(), ("age".to_string(), -2.5));
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_assignment("age").is_err());
        assert!(parse_assignment("=5").is_err());
        assert!(parse_assignment("age=old").is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut inputs = ElementInputs::from([("age".to_string(), 1.0)]);
        apply_overrides(&mut inputs, &["age=2".to_string(), "reviews=3".to_string()]).unwrap();
        assert_eq!(inputs["age"], 2.0);
        assert_eq!(inputs["reviews"], 3.0);
    }

    #[test]
    fn test_load_yaml_inputs() {
        let path = env::temp_dir().join("ethos_score_test_inputs.yaml");
        fs::write(&path, "Ethereum Address Age: 400\nReview Impact: -12.5\n").unwrap();

        let inputs = load_inputs(&path).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs["Review Impact"], -12.5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_json_inputs() {
        let path = env::temp_dir().join("ethos_score_test_inputs.json");
        fs::write(&path, r#"{"age": 400, "base": 1}"#).unwrap();

        let inputs = load_inputs(&path).unwrap();
        assert_eq!(inputs["age"], 400.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_non_numeric_inputs_fails() {
        let path = env::temp_dir().join("ethos_score_test_bad_inputs.yaml");
        fs::write(&path, "age: old\n").unwrap();

        assert!(load_inputs(&path).is_err());

        let _ = fs::remove_file(&path);
    }
}
