use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoreError;

/// A node of a score configuration tree.
///
/// Tagged by `type` on the wire:
/// ```yaml
/// type: LookupInterval
/// name: Ethereum Address Age
/// ranges:
///   - { end: 89, score: 0 }
///   - { start: 90, score: 50 }
/// outOfRangeScore: 0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum ScoreElement {
    Constant(ConstantValueElement),
    LookupNumber(LookupNumber),
    LookupInterval(LookupInterval),
    Calculation(ScoreCalculation),
}

impl ScoreElement {
    /// Unique key into the input map
    pub fn name(&self) -> &str {
        match self {
            ScoreElement::Constant(e) => &e.name,
            ScoreElement::LookupNumber(e) => &e.name,
            ScoreElement::LookupInterval(e) => &e.name,
            ScoreElement::Calculation(e) => &e.name,
        }
    }

    /// Hide from explanations when the weighted value is zero
    pub fn omit(&self) -> bool {
        match self {
            ScoreElement::Constant(e) => e.omit,
            ScoreElement::LookupNumber(e) => e.omit,
            ScoreElement::LookupInterval(e) => e.omit,
            ScoreElement::Calculation(e) => e.omit,
        }
    }

    /// Discriminant as it appears in config files
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreElement::Constant(_) => "Constant",
            ScoreElement::LookupNumber(_) => "LookupNumber",
            ScoreElement::LookupInterval(_) => "LookupInterval",
            ScoreElement::Calculation(_) => "Calculation",
        }
    }
}

pub fn is_constant_value_element(element: &ScoreElement) -> bool {
    matches!(element, ScoreElement::Constant(_))
}

pub fn is_lookup_number(element: &ScoreElement) -> bool {
    matches!(element, ScoreElement::LookupNumber(_))
}

pub fn is_lookup_interval(element: &ScoreElement) -> bool {
    matches!(element, ScoreElement::LookupInterval(_))
}

pub fn is_score_calculation(element: &ScoreElement) -> bool {
    matches!(element, ScoreElement::Calculation(_))
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConstantValueElement {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub omit: bool,
}

/// Raw input passed through unchanged. `range` is display metadata only.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LookupNumber {
    pub name: String,
    pub range: ElementRange,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub omit: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LookupInterval {
    pub name: String,
    pub ranges: Vec<IntervalRange>,
    pub out_of_range_score: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub omit: bool,
}

/// Inclusive interval. A missing bound is open (-inf / +inf).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct IntervalRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    pub score: f64,
}

impl IntervalRange {
    pub fn contains(&self, value: f64) -> bool {
        self.start.map_or(true, |start| value >= start) && self.end.map_or(true, |end| value <= end)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct ElementRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCalculation {
    pub name: String,
    pub operation: Operation,
    pub elements: Vec<ScoreElement>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub omit: bool,
}

impl ScoreCalculation {
    /// Build a calculation node, rejecting operator strings outside the fixed set.
    pub fn new(
        name: impl Into<String>,
        operation: &str,
        elements: Vec<ScoreElement>,
    ) -> Result<Self, ScoreError> {
        Ok(Self {
            name: name.into(),
            operation: operation.parse()?,
            elements,
            omit: false,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Log,
    Sqrt,
    Abs,
    Ceil,
    Floor,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Log,
        Operation::Sqrt,
        Operation::Abs,
        Operation::Ceil,
        Operation::Floor,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Power => "^",
            Operation::Log => "log",
            Operation::Sqrt => "sqrt",
            Operation::Abs => "abs",
            Operation::Ceil => "ceil",
            Operation::Floor => "floor",
        }
    }

    /// Unary operators only look at the first element
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            Operation::Log | Operation::Sqrt | Operation::Abs | Operation::Ceil | Operation::Floor
        )
    }
}

pub fn is_valid_operation(operation: &str) -> bool {
    Operation::ALL.iter().any(|op| op.symbol() == operation)
}

impl FromStr for Operation {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .find(|op| op.symbol() == s)
            .copied()
            .ok_or_else(|| ScoreError::InvalidOperation(s.to_string()))
    }
}

impl TryFrom<String> for Operation {
    type Error = ScoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_operations() {
        for op in ["+", "-", "*", "/", "^", "log", "sqrt", "abs", "ceil", "floor"] {
            assert!(is_valid_operation(op), "{} should be valid", op);
        }
        assert!(!is_valid_operation("%"));
        assert!(!is_valid_operation("LOG"));
        assert!(!is_valid_operation(""));
    }

    #[test]
    fn test_new_calculation_rejects_unknown_operator() {
        let err = ScoreCalculation::new("bad", "mod", vec![]).unwrap_err();
        assert_eq!(err, ScoreError::InvalidOperation("mod".to_string()));

        let calc = ScoreCalculation::new("sum", "+", vec![]).unwrap();
        assert_eq!(calc.operation, Operation::Add);
    }

    #[test]
    fn test_interval_bounds_are_inclusive() {
        let range = IntervalRange {
            start: Some(0.0),
            end: Some(10.0),
            score: 5.0,
        };
        assert!(range.contains(0.0));
        assert!(range.contains(10.0));
        assert!(!range.contains(10.5));
        assert!(!range.contains(-0.1));
    }

    #[test]
    fn test_open_ended_interval() {
        let range = IntervalRange {
            start: None,
            end: Some(0.0),
            score: 3.0,
        };
        assert!(range.contains(0.0));
        assert!(range.contains(-1e12));
        assert!(!range.contains(0.1));
    }

    #[test]
    fn test_interval_never_contains_nan() {
        let range = IntervalRange {
            start: Some(0.0),
            end: None,
            score: 1.0,
        };
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_predicates() {
        let constant = ScoreElement::Constant(ConstantValueElement {
            name: "base".to_string(),
            value: 1200.0,
            omit: false,
        });
        assert!(is_constant_value_element(&constant));
        assert!(!is_lookup_number(&constant));
        assert!(!is_lookup_interval(&constant));
        assert!(!is_score_calculation(&constant));
        assert_eq!(constant.kind(), "Constant");
        assert_eq!(constant.name(), "base");
    }

    #[test]
    fn test_element_parse_tagged_yaml() {
        let yaml = r#"
type: Calculation
name: root
operation: "+"
elements:
  - type: LookupInterval
    name: age
    ranges:
      - { start: 0, end: 365, score: 100 }
      - { start: 365, score: 500 }
    outOfRangeScore: 0
  - type: Constant
    name: base
    value: 1200
  - type: LookupNumber
    name: reviews
    range: { min: -400, max: 400 }
    omit: true
"#;
        let element: ScoreElement = serde_saphyr::from_str(yaml).unwrap();
        let ScoreElement::Calculation(calc) = element else {
            panic!("expected calculation");
        };
        assert_eq!(calc.operation, Operation::Add);
        assert_eq!(calc.elements.len(), 3);
        assert!(is_lookup_interval(&calc.elements[0]));
        assert!(calc.elements[2].omit());

        let ScoreElement::LookupInterval(age) = &calc.elements[0] else {
            panic!("expected interval");
        };
        assert_eq!(age.ranges[1].end, None);
        assert_eq!(age.out_of_range_score, 0.0);
    }

    #[test]
    fn test_unknown_operator_fails_to_parse() {
        let yaml = r#"
type: Calculation
name: root
operation: "%"
elements: []
"#;
        let result: Result<ScoreElement, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_operation_serializes_as_symbol() {
        let json = serde_json::to_string(&Operation::Sqrt).unwrap();
        assert_eq!(json, "\"sqrt\"");
        let op: Operation = serde_json::from_str("\"^\"").unwrap();
        assert_eq!(op, Operation::Power);
    }
}
