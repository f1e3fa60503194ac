//! Score composition for fashion products.
//!
//! `ProductInput` flows through the material aggregator and the care/origin
//! resolvers into raw impact vectors, which the composer normalizes against
//! the snapshot's global indicator bounds and folds into a [`ScoreResult`].

mod composer;
mod composition;
mod config;
mod domain;
mod normalizer;
mod resolvers;

#[cfg(test)]
mod tests;

pub use composer::compose;
pub use composition::{aggregate_materials, validate_composition, CompositionError};
pub use config::{CategoryWeights, ScoringConfig, ScoringConfigError};
pub use domain::{
    CareImpact, CategoryBadness, ImpactBreakdown, MaterialImpact, MaterialImpactBreakdown,
    MaterialShare, OriginImpact, OriginImpactBreakdown, ProductInput, RawImpacts, ScoreBreakdown,
    ScoreResult,
};
pub use normalizer::{badness, normalize};
pub use resolvers::{certification_points, resolve_care, resolve_certification, resolve_origin};

use crate::reference::{ReferenceSnapshot, UnknownReferenceKey};
use std::sync::Arc;
use tracing::debug;

/// Caller-input failures raised while scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid material composition: {0}")]
    InvalidComposition(#[from] CompositionError),
    #[error(transparent)]
    UnknownReferenceKey(#[from] UnknownReferenceKey),
}

/// Scores `input` against `snapshot`. Pure: identical inputs over the same
/// snapshot always produce identical results.
pub fn score(
    snapshot: &ReferenceSnapshot,
    config: &ScoringConfig,
    input: &ProductInput,
) -> Result<ScoreResult, ScoringError> {
    let material = aggregate_materials(snapshot, &input.materials, config.composition_tolerance)?;
    let care = resolve_care(snapshot, &input.care_instruction)?;
    let origin = resolve_origin(snapshot, &input.origin)?;
    let points = certification_points(snapshot, input.certification_slots())?;

    let impacts = RawImpacts {
        material,
        care,
        origin,
    };
    Ok(compose(snapshot, config, &impacts, points))
}

/// Snapshot plus composer settings. Cheap to clone and safe to share across
/// request handlers.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    snapshot: Arc<ReferenceSnapshot>,
    config: ScoringConfig,
}

impl ScoringEngine {
    /// `config` is expected to have passed [`ScoringConfig::validate`].
    pub fn new(snapshot: Arc<ReferenceSnapshot>, config: ScoringConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn score(&self, input: &ProductInput) -> Result<ScoreResult, ScoringError> {
        let result = score(&self.snapshot, &self.config, input)?;
        debug!(
            product = %input.product_name,
            final_score = result.final_score,
            environmental_score = result.environmental_score,
            "product scored"
        );
        Ok(result)
    }

    pub fn snapshot(&self) -> &Arc<ReferenceSnapshot> {
        &self.snapshot
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}
