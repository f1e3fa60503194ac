use super::domain::{CareImpact, OriginImpact};
use crate::reference::normalizer::normalize_key;
use crate::reference::{CertificationReference, ReferenceSnapshot, UnknownReferenceKey};

/// Labels exporters use for an empty certification slot. They only apply
/// when the table has no row of that name.
const NO_CERTIFICATION: [&str; 4] = ["none", "no certification", "n/a", "-"];

pub fn resolve_care(
    snapshot: &ReferenceSnapshot,
    care_instruction: &str,
) -> Result<CareImpact, UnknownReferenceKey> {
    let reference = snapshot.care_instruction(care_instruction)?;
    Ok(CareImpact {
        energy: reference.energy_use_mj,
        water: reference.water_use_l,
        co2: reference.co2_kg,
    })
}

pub fn resolve_origin(
    snapshot: &ReferenceSnapshot,
    origin: &str,
) -> Result<OriginImpact, UnknownReferenceKey> {
    let reference = snapshot.origin(origin)?;
    Ok(OriginImpact {
        grid: reference.energy_grid_intensity,
        transport: reference.transport_impact,
        manufacturing: reference.manufacturing_impact,
    })
}

/// Resolves one certification slot. Blank slots and "no certification"
/// placeholders resolve to `None`, which scores the same as a zero-bonus row.
pub fn resolve_certification<'a>(
    snapshot: &'a ReferenceSnapshot,
    slot: Option<&str>,
) -> Result<Option<&'a CertificationReference>, UnknownReferenceKey> {
    let Some(name) = slot.map(str::trim).filter(|name| !name.is_empty()) else {
        return Ok(None);
    };

    match snapshot.certification(name) {
        Ok(reference) => Ok(Some(reference)),
        Err(_) if is_no_certification(name) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Sum of the slots' bonuses in percentage points, before any cap.
pub fn certification_points<'s>(
    snapshot: &ReferenceSnapshot,
    slots: impl IntoIterator<Item = Option<&'s str>>,
) -> Result<f64, UnknownReferenceKey> {
    slots.into_iter().try_fold(0.0, |points, slot| {
        let bonus = resolve_certification(snapshot, slot)?
            .map(|reference| reference.score_bonus * 100.0)
            .unwrap_or(0.0);
        Ok(points + bonus)
    })
}

fn is_no_certification(name: &str) -> bool {
    let key = normalize_key(name);
    NO_CERTIFICATION.contains(&key.as_str())
}
