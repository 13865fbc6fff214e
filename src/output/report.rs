use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::scoring::{
    convert_score_to_level, CredibilityFactor, ScoreConfig, ScoreExplanation, ScoreLevel,
};

/// Everything the `score` command reports, in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// `None` when the score is not a number (missing inputs)
    pub score: Option<f64>,
    pub level: Option<ScoreLevel>,
    pub xp_multiplier: Option<f64>,
    pub factors: Vec<CredibilityFactor>,
    pub errors: Vec<String>,
    pub config_version: Option<String>,
    pub computed_at: DateTime<Utc>,
}

impl ScoreReport {
    pub fn new(config: &ScoreConfig, explanation: &ScoreExplanation) -> Self {
        let score = Some(explanation.score).filter(|s| s.is_finite());
        let level = score.and_then(|s| convert_score_to_level(s).ok());

        Self {
            score,
            level,
            xp_multiplier: level.map(|l| l.xp_multiplier()),
            factors: explanation.credibility_factors(),
            errors: explanation.errors.clone(),
            config_version: config.version.clone(),
            computed_at: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.score.is_some() && self.level.is_some() && self.errors.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize score report")
    }

    /// Write the report as JSON, atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        crate::config::write_atomic(path, json.as_bytes())
    }
}
