use super::config::ScoringConfig;
use super::domain::{
    CategoryBadness, ImpactBreakdown, MaterialImpactBreakdown, OriginImpactBreakdown, RawImpacts,
    ScoreBreakdown, ScoreResult,
};
use super::normalizer::badness;
use crate::reference::{Indicator, ReferenceSnapshot};

/// Normalizes the raw impacts and folds them, with the certification
/// points, into the final score.
pub fn compose(
    snapshot: &ReferenceSnapshot,
    config: &ScoringConfig,
    impacts: &RawImpacts,
    certification_points: f64,
) -> ScoreResult {
    let breakdown = normalize_impacts(snapshot, impacts);

    let category_badness = CategoryBadness {
        material: breakdown.material_impact.mean(),
        care: breakdown.care_impact.mean(),
        origin: breakdown.origin_impact.mean(),
    };

    let weights = &config.weights;
    let aggregate = weights.material * category_badness.material
        + weights.care * category_badness.care
        + weights.origin * category_badness.origin;
    let environmental_score = (100.0 - aggregate).clamp(0.0, 100.0);

    let applied_certification_bonus = certification_points.min(config.certification_cap);
    let final_score = (environmental_score + applied_certification_bonus).clamp(0.0, 100.0);

    ScoreResult {
        final_score,
        environmental_score,
        certification_bonus: certification_points,
        applied_certification_bonus,
        category_badness,
        breakdown,
    }
}

fn normalize_impacts(snapshot: &ReferenceSnapshot, impacts: &RawImpacts) -> ScoreBreakdown {
    let scale = |raw: f64, indicator: Indicator| badness(raw, snapshot.indicator_range(indicator));
    let RawImpacts {
        material,
        care,
        origin,
    } = impacts;

    ScoreBreakdown {
        material_impact: MaterialImpactBreakdown {
            co2: scale(material.carbon, Indicator::MaterialCarbon),
            water: scale(material.water, Indicator::MaterialWater),
            energy: scale(material.energy, Indicator::MaterialEnergy),
            chemical: scale(material.chemical, Indicator::MaterialChemical),
        },
        care_impact: ImpactBreakdown {
            co2: scale(care.co2, Indicator::CareCo2),
            water: scale(care.water, Indicator::CareWater),
            energy: scale(care.energy, Indicator::CareEnergy),
        },
        origin_impact: OriginImpactBreakdown {
            grid: scale(origin.grid, Indicator::OriginGrid),
            transport: scale(origin.transport, Indicator::OriginTransport),
            manufacturing: scale(origin.manufacturing, Indicator::OriginManufacturing),
        },
    }
}
