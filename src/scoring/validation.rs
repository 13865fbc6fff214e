use std::collections::HashSet;

use super::config::ScoreConfig;
use super::element::{Operation, ScoreCalculation, ScoreElement};

/// Deepest tree a config may describe
pub const MAX_DEPTH: usize = 64;

/// Validate a score configuration before it is used.
/// Returns all validation errors at once (not just the first).
pub fn validate_score_config(config: &ScoreConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut tree_names = HashSet::new();
    let mut leaves = Vec::new();

    validate_calculation(
        &config.root_calculation,
        "rootCalculation",
        1,
        &mut tree_names,
        &mut leaves,
        &mut errors,
    );

    let mut definition_names = HashSet::new();
    for (i, element) in config.element_definitions.iter().enumerate() {
        let path = format!("elementDefinitions[{}]", i);
        if !definition_names.insert(element.name()) {
            errors.push(format!("{}.name: duplicate definition '{}'", path, element.name()));
        }
        if let ScoreElement::Calculation(_) = element {
            errors.push(format!(
                "{}: '{}' is a Calculation, definitions must be leaf elements",
                path,
                element.name()
            ));
        } else {
            validate_leaf(element, &path, &mut errors);
        }
    }

    for (path, name) in leaves {
        if !definition_names.contains(name.as_str()) {
            errors.push(format!("{}: '{}' has no entry in elementDefinitions", path, name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_calculation<'a>(
    calc: &'a ScoreCalculation,
    path: &str,
    depth: usize,
    names: &mut HashSet<&'a str>,
    leaves: &mut Vec<(String, String)>,
    errors: &mut Vec<String>,
) {
    check_name(&calc.name, path, names, errors);

    if depth > MAX_DEPTH {
        errors.push(format!("{}: nesting exceeds maximum depth of {}", path, MAX_DEPTH));
        return;
    }

    let arity = calc.elements.len();
    if calc.operation.is_unary() || calc.operation == Operation::Power {
        if arity != 1 {
            errors.push(format!(
                "{}.operation: '{}' takes exactly one element, found {}",
                path, calc.operation, arity
            ));
        }
    } else if arity == 0 {
        errors.push(format!("{}.elements: '{}' needs at least one element", path, calc.operation));
    }

    for (i, element) in calc.elements.iter().enumerate() {
        let child_path = format!("{}.elements[{}]", path, i);
        match element {
            ScoreElement::Calculation(child) => {
                validate_calculation(child, &child_path, depth + 1, names, leaves, errors);
            }
            ScoreElement::Constant(_) => {
                check_name(element.name(), &child_path, names, errors);
            }
            ScoreElement::LookupInterval(_) | ScoreElement::LookupNumber(_) => {
                check_name(element.name(), &child_path, names, errors);
                validate_leaf(element, &child_path, errors);
                leaves.push((child_path, element.name().to_string()));
            }
        }
    }
}

fn check_name<'a>(name: &'a str, path: &str, names: &mut HashSet<&'a str>, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push(format!("{}.name: must not be empty", path));
    } else if !names.insert(name) {
        errors.push(format!("{}.name: duplicate element name '{}'", path, name));
    }
}

fn validate_leaf(element: &ScoreElement, path: &str, errors: &mut Vec<String>) {
    match element {
        ScoreElement::LookupInterval(lookup) => {
            for (i, range) in lookup.ranges.iter().enumerate() {
                if let (Some(start), Some(end)) = (range.start, range.end) {
                    if start > end {
                        errors.push(format!(
                            "{}.ranges[{}]: start {} is greater than end {}",
                            path, i, start, end
                        ));
                    }
                }
            }
        }
        ScoreElement::LookupNumber(lookup) => {
            if lookup.range.min > lookup.range.max {
                errors.push(format!(
                    "{}.range: min {} is greater than max {}",
                    path, lookup.range.min, lookup.range.max
                ));
            }
        }
        ScoreElement::Constant(_) | ScoreElement::Calculation(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::element::{
        ConstantValueElement, ElementRange, IntervalRange, LookupInterval, LookupNumber,
    };

    fn number(name: &str, min: f64, max: f64) -> ScoreElement {
        ScoreElement::LookupNumber(LookupNumber {
            name: name.to_string(),
            range: ElementRange { min, max },
            omit: false,
        })
    }

    fn constant(name: &str) -> ScoreElement {
        ScoreElement::Constant(ConstantValueElement {
            name: name.to_string(),
            value: 1.0,
            omit: false,
        })
    }

    fn config(root: ScoreCalculation, definitions: Vec<ScoreElement>) -> ScoreConfig {
        ScoreConfig {
            version: None,
            root_calculation: root,
            element_definitions: definitions,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_score_config(&ScoreConfig::default()).is_ok());
    }

    #[test]
    fn test_unary_operator_needs_one_element() {
        let root = ScoreCalculation::new("root", "sqrt", vec![constant("a"), constant("b")]).unwrap();
        let errors = validate_score_config(&config(root, vec![])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("rootCalculation.operation"));
    }

    #[test]
    fn test_power_with_many_elements_rejected() {
        let root = ScoreCalculation::new("root", "^", vec![constant("a"), constant("b")]).unwrap();
        assert!(validate_score_config(&config(root, vec![])).is_err());
    }

    #[test]
    fn test_empty_calculation_rejected() {
        let root = ScoreCalculation::new("root", "+", vec![]).unwrap();
        let errors = validate_score_config(&config(root, vec![])).unwrap_err();
        assert!(errors[0].contains("rootCalculation.elements"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let root = ScoreCalculation::new("root", "+", vec![constant("a"), constant("a")]).unwrap();
        let errors = validate_score_config(&config(root, vec![])).unwrap_err();
        assert!(errors[0].contains("rootCalculation.elements[1].name"));
    }

    #[test]
    fn test_leaf_must_be_defined() {
        let root = ScoreCalculation::new("root", "+", vec![number("reviews", 0.0, 1.0)]).unwrap();
        let errors = validate_score_config(&config(root, vec![])).unwrap_err();
        assert!(errors[0].contains("'reviews' has no entry"));
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let interval = ScoreElement::LookupInterval(LookupInterval {
            name: "age".to_string(),
            ranges: vec![IntervalRange {
                start: Some(10.0),
                end: Some(0.0),
                score: 1.0,
            }],
            out_of_range_score: 0.0,
            omit: false,
        });
        let inverted = number("reviews", 5.0, -5.0);
        let root = ScoreCalculation::new("root", "+", vec![interval.clone(), inverted.clone()]).unwrap();
        let errors = validate_score_config(&config(root, vec![interval, inverted])).unwrap_err();
        // Each problem is reported for the tree and for the definition
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("rootCalculation.elements[0].ranges[0]")));
        assert!(errors.iter().any(|e| e.contains("elementDefinitions[1].range")));
    }

    #[test]
    fn test_depth_limit() {
        let mut calc = ScoreCalculation::new("leaf", "+", vec![constant("c")]).unwrap();
        for i in 0..MAX_DEPTH {
            calc = ScoreCalculation::new(format!("level{}", i), "+", vec![ScoreElement::Calculation(calc)]).unwrap();
        }
        let errors = validate_score_config(&config(calc, vec![])).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("maximum depth")));
    }

    #[test]
    fn test_calculation_definition_rejected() {
        let root = ScoreCalculation::new("root", "+", vec![constant("c")]).unwrap();
        let nested = ScoreElement::Calculation(ScoreCalculation::new("nested", "+", vec![constant("d")]).unwrap());
        let errors = validate_score_config(&config(root, vec![nested])).unwrap_err();
        assert!(errors[0].contains("elementDefinitions[0]"));
    }

    #[test]
    fn test_collects_all_errors() {
        let root = ScoreCalculation::new(
            "",
            "abs",
            vec![number("a", 0.0, 1.0), number("a", 0.0, 1.0)],
        )
        .unwrap();
        let errors = validate_score_config(&config(root, vec![number("a", 0.0, 1.0)])).unwrap_err();
        // empty root name, arity, duplicate leaf
        assert_eq!(errors.len(), 3);
    }
}
