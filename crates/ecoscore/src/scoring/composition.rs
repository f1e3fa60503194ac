use super::domain::{MaterialImpact, MaterialShare};
use super::ScoringError;
use crate::reference::ReferenceSnapshot;

/// Reasons a material composition is refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompositionError {
    #[error("at least one material is required")]
    Empty,
    #[error("percentage for '{material}' must be a finite non-negative number, got {percentage}")]
    InvalidPercentage { material: String, percentage: f64 },
    #[error("material percentages must sum to 100, got {total}")]
    BadTotal { total: f64 },
}

/// Checks that the shares are usable and total 100 within `tolerance`.
/// Returns the observed total.
pub fn validate_composition(
    shares: &[MaterialShare],
    tolerance: f64,
) -> Result<f64, CompositionError> {
    if shares.is_empty() {
        return Err(CompositionError::Empty);
    }

    if let Some(share) = shares
        .iter()
        .find(|share| !share.percentage.is_finite() || share.percentage < 0.0)
    {
        return Err(CompositionError::InvalidPercentage {
            material: share.name.clone(),
            percentage: share.percentage,
        });
    }

    let total: f64 = shares.iter().map(|share| share.percentage).sum();
    if (total - 100.0).abs() > tolerance {
        return Err(CompositionError::BadTotal { total });
    }

    Ok(total)
}

/// Weights each material's raw indicators by its share and sums them in
/// input order.
pub fn aggregate_materials(
    snapshot: &ReferenceSnapshot,
    shares: &[MaterialShare],
    tolerance: f64,
) -> Result<MaterialImpact, ScoringError> {
    validate_composition(shares, tolerance)?;

    shares
        .iter()
        .try_fold(MaterialImpact::default(), |impact, share| {
            let reference = snapshot.material(&share.name)?;
            let weight = share.percentage / 100.0;
            Ok(impact
                + MaterialImpact {
                    carbon: weight * reference.carbon_kg_co2e,
                    water: weight * reference.water_l,
                    energy: weight * reference.fossil_energy_mj,
                    chemical: weight * reference.chemical_impact,
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(parts: &[(&str, f64)]) -> Vec<MaterialShare> {
        parts
            .iter()
            .map(|(name, percentage)| MaterialShare::new(*name, *percentage))
            .collect()
    }

    #[test]
    fn accepts_totals_within_tolerance() {
        let total = validate_composition(&shares(&[("Cotton", 60.005), ("Polyester", 40.0)]), 0.01)
            .expect("within tolerance");
        assert!((total - 100.005).abs() < 1e-9);
    }

    #[test]
    fn rejects_totals_outside_tolerance() {
        match validate_composition(&shares(&[("Cotton", 60.0), ("Polyester", 39.98)]), 0.01) {
            Err(CompositionError::BadTotal { total }) => assert!((total - 99.98).abs() < 1e-9),
            other => panic!("expected bad total, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_and_negative_shares() {
        assert_eq!(validate_composition(&[], 0.01), Err(CompositionError::Empty));
        assert!(matches!(
            validate_composition(&shares(&[("Cotton", 120.0), ("Polyester", -20.0)]), 0.01),
            Err(CompositionError::InvalidPercentage { ref material, .. }) if material == "Polyester"
        ));
        assert!(matches!(
            validate_composition(&shares(&[("Cotton", f64::NAN)]), 0.01),
            Err(CompositionError::InvalidPercentage { .. })
        ));
    }

    #[test]
    fn weights_bundled_materials_by_share() {
        let snapshot = ReferenceSnapshot::bundled().expect("bundled");
        let impact = aggregate_materials(
            &snapshot,
            &shares(&[("Cotton", 60.0), ("Polyester", 40.0)]),
            0.01,
        )
        .expect("aggregates");

        // 0.6 * 6.0 + 0.4 * 9.5
        assert!((impact.carbon - 7.4).abs() < 1e-9);
        // 0.6 * 2700 + 0.4 * 50
        assert!((impact.water - 1640.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_material_is_reported() {
        let snapshot = ReferenceSnapshot::bundled().expect("bundled");
        let err = aggregate_materials(&snapshot, &shares(&[("Unobtainium", 100.0)]), 0.01)
            .expect_err("unknown material");
        assert!(matches!(err, ScoringError::UnknownReferenceKey(ref key) if key.key == "Unobtainium"));
    }
}
