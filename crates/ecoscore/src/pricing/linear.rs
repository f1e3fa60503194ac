use super::{round_to_cents, Confidence, PricePrediction, PricePredictor, PriceQuery, PricingError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

fn default_model_type() -> String {
    "linear_regression".to_string()
}

/// Exported coefficients of a regression over the score plus one-hot
/// `Brand_<name>`, `Category_<name>` and `Subcategory_<name>` features.
///
/// ```json
/// {"model_type": "ridge", "intercept": 18.5, "score_coefficient": 0.42,
///  "coefficients": {"Brand_Patagonia": 31.0, "Category_Outerwear": 12.0}}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearPriceModel {
    #[serde(default = "default_model_type")]
    model_type: String,
    intercept: f64,
    score_coefficient: f64,
    #[serde(default)]
    coefficients: HashMap<String, f64>,
}

impl LinearPriceModel {
    pub fn new(
        model_type: impl Into<String>,
        intercept: f64,
        score_coefficient: f64,
        coefficients: HashMap<String, f64>,
    ) -> Result<Self, PricingError> {
        let model = Self {
            model_type: model_type.into(),
            intercept,
            score_coefficient,
            coefficients,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_str(json: &str) -> Result<Self, PricingError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_path(path: &Path) -> Result<Self, PricingError> {
        let json = fs::read_to_string(path).map_err(|source| PricingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn feature_count(&self) -> usize {
        self.coefficients.len() + 1
    }

    fn validate(&self) -> Result<(), PricingError> {
        let scalars = [
            ("intercept", self.intercept),
            ("score_coefficient", self.score_coefficient),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(PricingError::InvalidCoefficient(name.to_string()));
            }
        }
        match self.coefficients.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(PricingError::InvalidCoefficient(name.clone())),
            None => Ok(()),
        }
    }

    fn one_hot(&self, prefix: &str, value: &str) -> Option<f64> {
        self.coefficients
            .get(&format!("{prefix}_{}", value.trim()))
            .copied()
    }
}

impl PricePredictor for LinearPriceModel {
    fn predict(&self, query: &PriceQuery) -> Result<PricePrediction, PricingError> {
        query.validate()?;

        let brand = self.one_hot("Brand", &query.brand);
        let price = self.intercept
            + self.score_coefficient * query.score
            + brand.unwrap_or(0.0)
            + self.one_hot("Category", &query.category).unwrap_or(0.0)
            + self.one_hot("Subcategory", &query.subcategory).unwrap_or(0.0);

        Ok(PricePrediction {
            predicted_price: round_to_cents(price),
            confidence: if brand.is_some() {
                Confidence::High
            } else {
                Confidence::Medium
            },
            model_type: self.model_type.clone(),
        })
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn is_trained(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "model_type": "ridge",
        "intercept": 18.5,
        "score_coefficient": 0.4,
        "coefficients": {
            "Brand_Patagonia": 31.0,
            "Category_Outerwear": 12.0,
            "Subcategory_Jacket": 4.25
        }
    }"#;

    #[test]
    fn known_brand_yields_high_confidence() {
        let model = LinearPriceModel::from_json_str(MODEL).expect("model parses");
        let prediction = model
            .predict(&PriceQuery::new(50.0, "Patagonia", "Outerwear", "Jacket"))
            .expect("predicts");

        assert_eq!(prediction.predicted_price, 85.75);
        assert_eq!(prediction.confidence, Confidence::High);
        assert_eq!(prediction.model_type, "ridge");
    }

    #[test]
    fn unknown_columns_contribute_nothing() {
        let model = LinearPriceModel::from_json_str(MODEL).expect("model parses");
        let prediction = model
            .predict(&PriceQuery::new(50.0, "Unbranded", "Outerwear", "Parka"))
            .expect("predicts");

        assert_eq!(prediction.predicted_price, 50.5);
        assert_eq!(prediction.confidence, Confidence::Medium);
    }

    #[test]
    fn model_type_defaults_when_absent() {
        let model =
            LinearPriceModel::from_json_str(r#"{"intercept": 1.0, "score_coefficient": 0.0}"#)
                .expect("model parses");
        assert_eq!(model.model_type(), "linear_regression");
        assert_eq!(model.feature_count(), 1);
    }

    #[test]
    fn rejects_malformed_exports() {
        assert!(matches!(
            LinearPriceModel::from_json_str(r#"{"intercept": "high"}"#),
            Err(PricingError::Format(_))
        ));

        let coefficients = HashMap::from([("Brand_X".to_string(), f64::INFINITY)]);
        assert!(matches!(
            LinearPriceModel::new("ridge", 1.0, 1.0, coefficients),
            Err(PricingError::InvalidCoefficient(name)) if name == "Brand_X"
        ));
    }
}
