//! Declarative credibility score engine.
//!
//! A score configuration is a tree of lookups and arithmetic operators.
//! [`scoring::calculate_score`] evaluates it against raw inputs,
//! [`scoring::convert_score_to_level`] classifies the result, and
//! [`scoring::explain_score`] breaks it down into credibility factors.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod scoring;

pub use error::ScoreError;
