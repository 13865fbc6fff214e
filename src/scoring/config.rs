use serde::{Deserialize, Serialize};

use super::element::{
    ConstantValueElement, ElementRange, IntervalRange, LookupInterval, LookupNumber, Operation,
    ScoreCalculation, ScoreElement,
};
use super::levels::{DEFAULT_STARTING_SCORE, MAX_VOUCHED_ETH_DAYS};

/// A versioned score configuration.
///
/// `root_calculation` is the tree that is evaluated. `element_definitions` is
/// the flat list of leaf elements used for explanations; it does not affect
/// the computed score.
///
/// Example YAML:
/// ```yaml
/// version: "1"
/// rootCalculation:
///   name: Ethos Score
///   operation: "+"
///   elements:
///     - { type: Constant, name: Base Score, value: 1200 }
///     - { type: LookupNumber, name: Review Impact, range: { min: -400, max: 400 } }
/// elementDefinitions:
///   - { type: LookupNumber, name: Review Impact, range: { min: -400, max: 400 } }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoreConfig {
    #[serde(default)]
    pub version: Option<String>,

    pub root_calculation: ScoreCalculation,

    #[serde(default)]
    pub element_definitions: Vec<ScoreElement>,
}

impl ScoreConfig {
    /// Find an element definition by name
    pub fn definition(&self, name: &str) -> Option<&ScoreElement> {
        self.element_definitions.iter().find(|e| e.name() == name)
    }

    /// Names of the inputs the definitions expect (lookup elements only)
    pub fn input_names(&self) -> Vec<&str> {
        self.element_definitions
            .iter()
            .filter(|e| matches!(e, ScoreElement::LookupInterval(_) | ScoreElement::LookupNumber(_)))
            .map(|e| e.name())
            .collect()
    }
}

pub const ETHEREUM_ADDRESS_AGE: &str = "Ethereum Address Age";
pub const TWITTER_ACCOUNT_AGE: &str = "Twitter Account Age";
pub const VOUCHED_ETHER_DAYS: &str = "Vouched Ether Days";
pub const REVIEW_IMPACT: &str = "Review Impact";

impl Default for ScoreConfig {
    fn default() -> Self {
        let address_age = ScoreElement::LookupInterval(LookupInterval {
            name: ETHEREUM_ADDRESS_AGE.to_string(),
            ranges: vec![
                range(None, Some(89.0), 0.0),
                range(Some(90.0), Some(364.0), 50.0),
                range(Some(365.0), Some(729.0), 100.0),
                range(Some(730.0), None, 200.0),
            ],
            out_of_range_score: 0.0,
            omit: false,
        });
        let twitter_age = ScoreElement::LookupInterval(LookupInterval {
            name: TWITTER_ACCOUNT_AGE.to_string(),
            ranges: vec![
                range(None, Some(364.0), 0.0),
                range(Some(365.0), Some(1824.0), 50.0),
                range(Some(1825.0), None, 100.0),
            ],
            out_of_range_score: 0.0,
            omit: true,
        });
        let vouched_days = ScoreElement::LookupNumber(LookupNumber {
            name: VOUCHED_ETHER_DAYS.to_string(),
            range: ElementRange {
                min: 0.0,
                max: MAX_VOUCHED_ETH_DAYS as f64,
            },
            omit: false,
        });
        let review_impact = ScoreElement::LookupNumber(LookupNumber {
            name: REVIEW_IMPACT.to_string(),
            range: ElementRange {
                min: -400.0,
                max: 400.0,
            },
            omit: false,
        });

        let vouch_impact = ScoreElement::Calculation(ScoreCalculation {
            name: "Vouch Impact".to_string(),
            operation: Operation::Floor,
            elements: vec![ScoreElement::Calculation(ScoreCalculation {
                name: "Weighted Vouched Ether Days".to_string(),
                operation: Operation::Multiply,
                elements: vec![
                    vouched_days.clone(),
                    ScoreElement::Constant(ConstantValueElement {
                        name: "Vouch Weight".to_string(),
                        value: 2.0,
                        omit: false,
                    }),
                ],
                omit: false,
            })],
            omit: false,
        });

        Self {
            version: Some("1".to_string()),
            root_calculation: ScoreCalculation {
                name: "Ethos Score".to_string(),
                operation: Operation::Add,
                elements: vec![
                    ScoreElement::Constant(ConstantValueElement {
                        name: "Base Score".to_string(),
                        value: DEFAULT_STARTING_SCORE,
                        omit: false,
                    }),
                    address_age.clone(),
                    twitter_age.clone(),
                    vouch_impact,
                    review_impact.clone(),
                ],
                omit: false,
            },
            element_definitions: vec![address_age, twitter_age, vouched_days, review_impact],
        }
    }
}

fn range(start: Option<f64>, end: Option<f64>, score: f64) -> IntervalRange {
    IntervalRange { start, end, score }
}
