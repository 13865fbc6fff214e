use std::collections::BTreeMap;

use super::element::{LookupInterval, Operation, ScoreCalculation, ScoreElement};
use crate::error::ScoreError;

/// Raw numeric inputs keyed by element name
pub type ElementInputs = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
}

/// Evaluate one element against the inputs.
///
/// A missing input reads as `NaN`. Lookup numbers and arithmetic carry the
/// `NaN` through; interval lookups fall back to `outOfRangeScore` unless an
/// interval is open on both ends. Use [`try_calculate_element`] to get an
/// error instead.
pub fn calculate_element(element: &ScoreElement, inputs: &ElementInputs) -> ScoreResult {
    let score = match element {
        ScoreElement::Constant(constant) => constant.value,
        ScoreElement::LookupNumber(lookup) => raw_input(inputs, &lookup.name),
        ScoreElement::LookupInterval(lookup) => {
            lookup_interval(lookup, raw_input(inputs, &lookup.name))
        }
        ScoreElement::Calculation(calc) => apply_calculation(calc, inputs).score,
    };
    ScoreResult { score }
}

/// Evaluate every child of `calc` and fold the results with its operator.
pub fn apply_calculation(calc: &ScoreCalculation, inputs: &ElementInputs) -> ScoreResult {
    let scores: Vec<f64> = calc
        .elements
        .iter()
        .map(|element| calculate_element(element, inputs).score)
        .collect();

    // A unary operator without an operand has nothing to act on
    let score = fold(calc.operation, &scores).unwrap_or(f64::NAN);
    ScoreResult { score }
}

/// Evaluate the root calculation, floor negatives at zero and round to an integer.
///
/// `NaN` is passed through untouched so callers can detect it.
pub fn calculate_score(root: &ScoreCalculation, inputs: &ElementInputs) -> ScoreResult {
    let raw = apply_calculation(root, inputs).score;
    ScoreResult {
        score: clamp_score(raw),
    }
}

/// Strict variant of [`calculate_element`]: missing inputs and non-finite
/// intermediate values are errors.
pub fn try_calculate_element(element: &ScoreElement, inputs: &ElementInputs) -> Result<f64, ScoreError> {
    let score = match element {
        ScoreElement::Constant(constant) => constant.value,
        ScoreElement::LookupNumber(lookup) => required_input(inputs, &lookup.name)?,
        ScoreElement::LookupInterval(lookup) => {
            lookup_interval(lookup, required_input(inputs, &lookup.name)?)
        }
        ScoreElement::Calculation(calc) => try_apply_calculation(calc, inputs)?,
    };
    ensure_finite(element.name(), score)
}

/// Strict variant of [`calculate_score`]. Returns the clamped integer score.
pub fn try_calculate_score(root: &ScoreCalculation, inputs: &ElementInputs) -> Result<i64, ScoreError> {
    let raw = try_apply_calculation(root, inputs)?;
    Ok(clamp_score(raw) as i64)
}

fn try_apply_calculation(calc: &ScoreCalculation, inputs: &ElementInputs) -> Result<f64, ScoreError> {
    let scores = calc
        .elements
        .iter()
        .map(|element| try_calculate_element(element, inputs))
        .collect::<Result<Vec<_>, _>>()?;

    let score = fold(calc.operation, &scores).ok_or_else(|| ScoreError::UnsupportedOperation {
        name: calc.name.clone(),
        operation: calc.operation.to_string(),
        operands: scores.len(),
    })?;
    ensure_finite(&calc.name, score)
}

/// First matching interval wins; nothing matched yields `outOfRangeScore`.
fn lookup_interval(lookup: &LookupInterval, value: f64) -> f64 {
    lookup
        .ranges
        .iter()
        .find(|range| range.contains(value))
        .map_or(lookup.out_of_range_score, |range| range.score)
}

/// Returns `None` only for a unary operator with no operand.
fn fold(operation: Operation, scores: &[f64]) -> Option<f64> {
    let score = match operation {
        Operation::Add => scores.iter().fold(0.0, |acc, s| acc + s),
        Operation::Subtract => scores.iter().fold(0.0, |acc, s| acc - s),
        Operation::Multiply => scores.iter().fold(1.0, |acc, s| acc * s),
        Operation::Divide => scores.iter().fold(1.0, |acc, s| acc / s),
        Operation::Power => scores.iter().fold(1.0, |acc, s| pow(acc, *s)),
        Operation::Log => scores.first()?.ln(),
        Operation::Sqrt => scores.first()?.sqrt(),
        Operation::Abs => scores.first()?.abs(),
        Operation::Ceil => scores.first()?.ceil(),
        Operation::Floor => scores.first()?.floor(),
    };
    Some(score)
}

// IEEE pow says 1^NaN == 1 and 1^inf == 1; the score engine treats both as NaN
// so a missing input can't be hidden behind an exponent.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

fn clamp_score(raw: f64) -> f64 {
    if raw < 0.0 {
        0.0
    } else {
        raw.round()
    }
}

fn raw_input(inputs: &ElementInputs, name: &str) -> f64 {
    inputs.get(name).copied().unwrap_or(f64::NAN)
}

fn required_input(inputs: &ElementInputs, name: &str) -> Result<f64, ScoreError> {
    inputs
        .get(name)
        .copied()
        .ok_or_else(|| ScoreError::MissingInput {
            name: name.to_string(),
        })
}

fn ensure_finite(name: &str, value: f64) -> Result<f64, ScoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoreError::NonFiniteScore {
            name: name.to_string(),
            value,
        })
    }
}
