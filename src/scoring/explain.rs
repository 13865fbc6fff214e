use serde::Serialize;

use super::config::ScoreConfig;
use super::element::ScoreElement;
use super::engine::{calculate_element, calculate_score, ElementInputs};
use super::factors::{convert_score_element_to_credibility_factor, CredibilityFactor};

/// Outcome of evaluating one element definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementResult {
    pub element: ScoreElement,
    pub raw: f64,
    pub weighted: f64,
    pub error: bool,
}

/// Score plus per-element detail, the bundle callers persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    pub score: f64,
    pub elements: Vec<ElementResult>,
    /// Names of elements whose input was missing or whose value was not finite
    pub errors: Vec<String>,
}

impl ScoreExplanation {
    /// True when the score itself is usable
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.score.is_finite()
    }

    /// Credibility factors for lookup elements, dropping `omit` elements that
    /// contributed nothing.
    pub fn credibility_factors(&self) -> Vec<CredibilityFactor> {
        self.elements
            .iter()
            .filter(|result| !(result.element.omit() && result.weighted == 0.0))
            .filter_map(|result| {
                convert_score_element_to_credibility_factor(&result.element, result.raw).ok()
            })
            .collect()
    }
}

/// Evaluate the whole config and every element definition against `inputs`.
pub fn explain_score(config: &ScoreConfig, inputs: &ElementInputs) -> ScoreExplanation {
    let score = calculate_score(&config.root_calculation, inputs).score;
    let mut elements = Vec::with_capacity(config.element_definitions.len());
    let mut errors = Vec::new();

    for element in &config.element_definitions {
        let raw = match element {
            ScoreElement::Constant(constant) => Some(constant.value),
            _ => inputs.get(element.name()).copied(),
        };
        let weighted = calculate_element(element, inputs).score;
        let error = raw.is_none() || !weighted.is_finite();
        if error {
            errors.push(element.name().to_string());
        }

        elements.push(ElementResult {
            element: element.clone(),
            raw: raw.unwrap_or(f64::NAN),
            weighted,
            error,
        });
    }

    ScoreExplanation {
        score,
        elements,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::{
        ETHEREUM_ADDRESS_AGE, REVIEW_IMPACT, TWITTER_ACCOUNT_AGE, VOUCHED_ETHER_DAYS,
    };

    fn full_inputs() -> ElementInputs {
        ElementInputs::from([
            (ETHEREUM_ADDRESS_AGE.to_string(), 400.0),
            (TWITTER_ACCOUNT_AGE.to_string(), 100.0),
            (VOUCHED_ETHER_DAYS.to_string(), 10.0),
            (REVIEW_IMPACT.to_string(), 5.0),
        ])
    }

    #[test]
    fn test_explain_complete() {
        let config = ScoreConfig::default();
        let explanation = explain_score(&config, &full_inputs());

        // 1200 + 100 + 0 + 20 + 5
        assert_eq!(explanation.score, 1325.0);
        assert!(explanation.is_complete());
        assert_eq!(explanation.elements.len(), 4);

        let age = &explanation.elements[0];
        assert_eq!(age.raw, 400.0);
        assert_eq!(age.weighted, 100.0);
        assert!(!age.error);
    }

    #[test]
    fn test_explain_records_missing_inputs() {
        let config = ScoreConfig::default();
        let mut inputs = full_inputs();
        inputs.remove(REVIEW_IMPACT);

        let explanation = explain_score(&config, &inputs);
        assert!(explanation.score.is_nan());
        assert!(!explanation.is_complete());
        assert_eq!(explanation.errors, vec![REVIEW_IMPACT.to_string()]);
    }

    #[test]
    fn test_missing_interval_input_is_flagged_even_with_fallback() {
        let config = ScoreConfig::default();
        let mut inputs = full_inputs();
        inputs.remove(ETHEREUM_ADDRESS_AGE);

        let explanation = explain_score(&config, &inputs);
        // Interval lookup falls back to outOfRangeScore, so the score stays numeric
        assert_eq!(explanation.score, 1225.0);
        assert_eq!(explanation.errors, vec![ETHEREUM_ADDRESS_AGE.to_string()]);
    }

    #[test]
    fn test_credibility_factors_skip_omitted_zero() {
        let config = ScoreConfig::default();
        let explanation = explain_score(&config, &full_inputs());
        let factors = explanation.credibility_factors();

        // Twitter age is omit=true and weighted 0 for 100 days
        let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![ETHEREUM_ADDRESS_AGE, VOUCHED_ETHER_DAYS, REVIEW_IMPACT]);
    }

    #[test]
    fn test_credibility_factors_keep_omitted_nonzero() {
        let config = ScoreConfig::default();
        let mut inputs = full_inputs();
        inputs.insert(TWITTER_ACCOUNT_AGE.to_string(), 2000.0);

        let factors = explain_score(&config, &inputs).credibility_factors();
        let twitter = factors.iter().find(|f| f.name == TWITTER_ACCOUNT_AGE).unwrap();
        assert_eq!(twitter.weighted, 100.0);
        assert_eq!(twitter.range.max, 100.0);
    }
}
