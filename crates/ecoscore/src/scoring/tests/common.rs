use std::sync::Arc;

use crate::reference::{
    CareReference, CertificationReference, MaterialReference, OriginReference, ReferenceSnapshot,
};
use crate::scoring::{ProductInput, ScoringConfig, ScoringEngine};

pub(super) fn material(
    name: &str,
    carbon: f64,
    water: f64,
    energy: f64,
    chemical: f64,
) -> MaterialReference {
    MaterialReference {
        name: name.to_string(),
        category: "Fixture".to_string(),
        carbon_kg_co2e: carbon,
        water_l: water,
        fossil_energy_mj: energy,
        chemical_impact: chemical,
        notes: String::new(),
    }
}

pub(super) fn origin(name: &str, grid: f64, transport: f64, manufacturing: f64) -> OriginReference {
    OriginReference {
        name: name.to_string(),
        energy_grid_intensity: grid,
        transport_impact: transport,
        manufacturing_impact: manufacturing,
        notes: String::new(),
    }
}

pub(super) fn care(name: &str, energy: f64, water: f64, co2: f64) -> CareReference {
    CareReference {
        name: name.to_string(),
        energy_use_mj: energy,
        water_use_l: water,
        co2_kg: co2,
        notes: String::new(),
    }
}

pub(super) fn certification(name: &str, bonus: f64) -> CertificationReference {
    CertificationReference {
        name: name.to_string(),
        category: "Fixture".to_string(),
        score_bonus: bonus,
        description: String::new(),
    }
}

pub(super) fn cotton_x() -> MaterialReference {
    material("CottonX", 2.0, 100.0, 10.0, 1.0)
}

/// Single-row material, origin and care tables: every range is degenerate.
pub(super) fn single_entry_snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot::new(
        vec![cotton_x()],
        vec![origin("RegionA", 0.5, 0.3, 0.4)],
        vec![care("Wash1", 0.5, 15.0, 0.04)],
        vec![certification("CertA", 0.10), certification("None", 0.0)],
    )
    .expect("single entry snapshot")
}

/// Adds WoolY, which sets the carbon maximum at 10.0 and nothing else.
pub(super) fn two_material_snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot::new(
        vec![cotton_x(), material("WoolY", 10.0, 100.0, 10.0, 1.0)],
        vec![origin("RegionA", 0.5, 0.3, 0.4)],
        vec![care("Wash1", 0.5, 15.0, 0.04)],
        vec![certification("CertA", 0.10)],
    )
    .expect("two material snapshot")
}

/// A table with real spread on every indicator.
pub(super) fn spread_snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot::new(
        vec![
            material("Linen", 2.0, 300.0, 20.0, 10.0),
            material("Cotton", 6.0, 2700.0, 55.0, 40.0),
            material("Polyester", 9.5, 50.0, 120.0, 35.0),
            material("Cashmere", 38.0, 3000.0, 150.0, 50.0),
        ],
        vec![
            origin("Portugal", 0.3, 0.1, 0.3),
            origin("China", 0.65, 0.4, 0.6),
            origin("Bangladesh", 0.7, 0.45, 0.7),
        ],
        vec![
            care("Hand Wash", 0.05, 10.0, 0.005),
            care("Machine Wash 30C", 0.5, 15.0, 0.04),
            care("Dry Clean", 2.5, 20.0, 0.35),
        ],
        vec![
            certification("No Certification", 0.0),
            certification("GOTS", 0.10),
            certification("Fair Trade", 0.05),
            certification("Cradle to Cradle", 0.10),
        ],
    )
    .expect("spread snapshot")
}

pub(super) fn engine(snapshot: ReferenceSnapshot) -> ScoringEngine {
    ScoringEngine::new(Arc::new(snapshot), ScoringConfig::default())
}

pub(super) fn cotton_tee() -> ProductInput {
    ProductInput::new("Everyday Tee", "China", "Machine Wash 30C")
        .with_material("Cotton", 60.0)
        .with_material("Polyester", 40.0)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
