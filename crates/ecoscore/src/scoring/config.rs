use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative influence of each impact category on the aggregate badness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub material: f64,
    pub care: f64,
    pub origin: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            material: 0.5,
            care: 0.25,
            origin: 0.25,
        }
    }
}

/// Tunable constants of the score composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: CategoryWeights,
    /// Upper bound, in percentage points, on the certification bonus.
    pub certification_cap: f64,
    /// Allowed distance of the composition total from 100.
    pub composition_tolerance: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            certification_cap: 15.0,
            composition_tolerance: 0.01,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let CategoryWeights {
            material,
            care,
            origin,
        } = self.weights;

        for (category, value) in [("material", material), ("care", care), ("origin", origin)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringConfigError::InvalidWeight { category, value });
            }
        }

        let total = material + care + origin;
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightSum(total));
        }

        if !self.certification_cap.is_finite() || self.certification_cap < 0.0 {
            return Err(ScoringConfigError::InvalidCap(self.certification_cap));
        }

        if !self.composition_tolerance.is_finite() || self.composition_tolerance < 0.0 {
            return Err(ScoringConfigError::InvalidTolerance(
                self.composition_tolerance,
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("{category} weight must be a finite non-negative number, got {value}")]
    InvalidWeight { category: &'static str, value: f64 },
    #[error("category weights must sum to 1, got {0}")]
    WeightSum(f64),
    #[error("certification cap must be a finite non-negative number, got {0}")]
    InvalidCap(f64),
    #[error("composition tolerance must be a finite non-negative number, got {0}")]
    InvalidTolerance(f64),
}
