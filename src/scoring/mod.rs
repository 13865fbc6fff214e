pub mod config;
pub mod element;
pub mod engine;
pub mod explain;
pub mod factors;
pub mod levels;
pub mod validation;

pub use config::ScoreConfig;
pub use element::*;
pub use engine::{
    apply_calculation, calculate_element, calculate_score, try_calculate_element, try_calculate_score,
    ElementInputs, ScoreResult,
};
pub use explain::{explain_score, ElementResult, ScoreExplanation};
pub use factors::{convert_score_element_to_credibility_factor, element_range, CredibilityFactor};
pub use levels::*;
pub use validation::validate_score_config;
