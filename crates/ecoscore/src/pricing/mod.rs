//! Price prediction from a sustainability score and catalog attributes.
//!
//! The trained regression model lives outside this crate; what crosses the
//! boundary is its exported coefficients ([`LinearPriceModel`]) or, when no
//! model is configured, the score-only [`FallbackPricePredictor`].

mod fallback;
mod linear;

pub use fallback::FallbackPricePredictor;
pub use linear::LinearPriceModel;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Request contract of a price predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuery {
    pub score: f64,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
}

impl PriceQuery {
    pub fn new(
        score: f64,
        brand: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Self {
        Self {
            score,
            brand: brand.into(),
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    /// Scores must be finite and within 0..=100.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.score.is_finite() || !(0.0..=100.0).contains(&self.score) {
            return Err(PricingError::ScoreOutOfRange(self.score));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Response contract of a price predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    /// Euros, rounded to cents.
    pub predicted_price: f64,
    pub confidence: Confidence,
    pub model_type: String,
}

/// Anything able to turn a [`PriceQuery`] into a [`PricePrediction`].
pub trait PricePredictor: Send + Sync + std::fmt::Debug {
    fn predict(&self, query: &PriceQuery) -> Result<PricePrediction, PricingError>;

    fn model_type(&self) -> &str;

    /// `false` for heuristics standing in for a trained model.
    fn is_trained(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("score must be between 0 and 100, got {0}")]
    ScoreOutOfRange(f64),
    #[error("failed to read price model {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed price model: {0}")]
    Format(#[from] serde_json::Error),
    #[error("price model coefficient '{0}' is not a finite number")]
    InvalidCoefficient(String),
}

pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Loads the model at `path`, falling back to the score-only heuristic when
/// no path is configured or the file cannot be used.
pub fn load_predictor(path: Option<&Path>) -> Arc<dyn PricePredictor> {
    let Some(path) = path else {
        info!("no price model configured; using fallback predictor");
        return Arc::new(FallbackPricePredictor);
    };

    match LinearPriceModel::from_path(path) {
        Ok(model) => {
            info!(
                path = %path.display(),
                model_type = model.model_type(),
                features = model.feature_count(),
                "price model loaded"
            );
            Arc::new(model)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "price model unavailable; using fallback predictor");
            Arc::new(FallbackPricePredictor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_outside_the_scale_are_rejected() {
        for score in [-0.5, 100.5, f64::NAN] {
            let query = PriceQuery::new(score, "Patagonia", "Outerwear", "Jacket");
            assert!(matches!(
                query.validate(),
                Err(PricingError::ScoreOutOfRange(_))
            ));
        }
        PriceQuery::new(100.0, "Patagonia", "Outerwear", "Jacket")
            .validate()
            .expect("upper bound is inclusive");
    }

    #[test]
    fn rounds_to_the_nearest_cent() {
        assert_eq!(round_to_cents(52.345_1), 52.35);
        assert_eq!(round_to_cents(20.0), 20.0);
    }

    #[test]
    fn missing_model_file_falls_back() {
        let predictor = load_predictor(Some(Path::new("/nonexistent/price_model.json")));
        assert!(!predictor.is_trained());
        assert_eq!(predictor.model_type(), "fallback");
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::Medium).expect("serializes");
        assert_eq!(json, "\"medium\"");
    }
}
