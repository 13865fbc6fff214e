use serde::{Deserialize, Serialize};

use super::element::{ElementRange, ScoreElement};
use super::engine::{calculate_element, ElementInputs};
use crate::error::ScoreError;

/// Display summary of one lookup element's contribution.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CredibilityFactor {
    pub name: String,
    pub range: ElementRange,
    pub value: f64,
    pub weighted: f64,
}

/// Static impact range of an element, independent of any input.
///
/// Interval lookups fold their range scores starting from min 1000 / max -1000,
/// so an interval with no ranges reports the inverted `{1000, -1000}`.
/// Constants and calculations report `{0, 0}`.
pub fn element_range(element: &ScoreElement) -> ElementRange {
    match element {
        ScoreElement::LookupInterval(lookup) => {
            lookup.ranges.iter().fold(
                ElementRange {
                    min: 1000.0,
                    max: -1000.0,
                },
                |acc, range| ElementRange {
                    min: acc.min.min(range.score),
                    max: acc.max.max(range.score),
                },
            )
        }
        ScoreElement::LookupNumber(lookup) => lookup.range,
        ScoreElement::Calculation(_) | ScoreElement::Constant(_) => ElementRange { min: 0.0, max: 0.0 },
    }
}

/// Explain a single lookup element for a raw value.
pub fn convert_score_element_to_credibility_factor(
    element: &ScoreElement,
    value: f64,
) -> Result<CredibilityFactor, ScoreError> {
    match element {
        ScoreElement::LookupInterval(_) | ScoreElement::LookupNumber(_) => {
            let inputs = ElementInputs::from([(element.name().to_string(), value)]);
            Ok(CredibilityFactor {
                name: element.name().to_string(),
                range: element_range(element),
                value,
                weighted: calculate_element(element, &inputs).score,
            })
        }
        ScoreElement::Calculation(_) | ScoreElement::Constant(_) => Err(ScoreError::UnsupportedElementType {
            name: element.name().to_string(),
            kind: element.kind().to_string(),
        }),
    }
}
