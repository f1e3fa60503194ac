use super::{round_to_cents, Confidence, PricePrediction, PricePredictor, PriceQuery, PricingError};

const BASE_PRICE: f64 = 20.0;
const PER_POINT: f64 = 0.5;

/// Score-only heuristic used when no trained model is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPricePredictor;

impl PricePredictor for FallbackPricePredictor {
    fn predict(&self, query: &PriceQuery) -> Result<PricePrediction, PricingError> {
        query.validate()?;
        Ok(PricePrediction {
            predicted_price: round_to_cents(query.score * PER_POINT + BASE_PRICE),
            confidence: Confidence::Low,
            model_type: self.model_type().to_string(),
        })
    }

    fn model_type(&self) -> &str {
        "fallback"
    }

    fn is_trained(&self) -> bool {
        false
    }
}
