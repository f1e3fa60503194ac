use super::common::*;
use crate::reference::TableKind;
use crate::scoring::{
    CategoryWeights, CompositionError, ProductInput, ScoringConfig, ScoringEngine, ScoringError,
};
use std::sync::Arc;

#[test]
fn single_entry_tables_score_a_perfect_environmental_result() {
    let engine = engine(single_entry_snapshot());
    let product = ProductInput::new("Plain Tee", "RegionA", "Wash1")
        .with_material("CottonX", 100.0)
        .with_certification("CertA");

    let result = engine.score(&product).expect("scores");

    let breakdown = result.breakdown;
    for value in [
        breakdown.material_impact.co2,
        breakdown.material_impact.water,
        breakdown.material_impact.energy,
        breakdown.material_impact.chemical,
        breakdown.care_impact.co2,
        breakdown.care_impact.water,
        breakdown.care_impact.energy,
        breakdown.origin_impact.grid,
        breakdown.origin_impact.transport,
        breakdown.origin_impact.manufacturing,
    ] {
        assert_eq!(value, 0.0);
    }
    assert_eq!(result.environmental_score, 100.0);
    assert_close(result.certification_bonus, 10.0);
    assert_eq!(result.final_score, 100.0);
}

#[test]
fn half_and_half_blend_lands_midway_on_carbon() {
    let engine = engine(two_material_snapshot());
    let product = ProductInput::new("Blend Knit", "RegionA", "Wash1")
        .with_material("CottonX", 50.0)
        .with_material("WoolY", 50.0);

    let result = engine.score(&product).expect("scores");

    assert_eq!(result.breakdown.material_impact.co2, 50.0);
    assert_eq!(result.breakdown.material_impact.water, 0.0);
    assert_close(result.category_badness.material, 12.5);
    assert_close(result.environmental_score, 93.75);
    assert_close(result.final_score, 93.75);
    assert_eq!(result.certification_bonus, 0.0);
}

#[test]
fn breakdown_uses_global_table_bounds() {
    let engine = engine(spread_snapshot());
    let result = engine.score(&cotton_tee()).expect("scores");

    // carbon 0.6 * 6.0 + 0.4 * 9.5 = 7.4 within [2, 38]
    assert_close(result.breakdown.material_impact.co2, 15.0);
    // care water 15 within [10, 20]
    assert_close(result.breakdown.care_impact.water, 50.0);
    // origin grid 0.65 within [0.3, 0.7]
    assert_close(result.breakdown.origin_impact.grid, 87.5);

    let weighted = 0.5 * result.category_badness.material
        + 0.25 * result.category_badness.care
        + 0.25 * result.category_badness.origin;
    assert_close(result.environmental_score, 100.0 - weighted);
    assert_close(result.final_score, result.environmental_score);
}

#[test]
fn category_weights_are_configurable() {
    let config = ScoringConfig {
        weights: CategoryWeights {
            material: 1.0,
            care: 0.0,
            origin: 0.0,
        },
        ..ScoringConfig::default()
    };
    let engine = ScoringEngine::new(Arc::new(spread_snapshot()), config);
    let result = engine.score(&cotton_tee()).expect("scores");

    assert_close(
        result.environmental_score,
        100.0 - result.category_badness.material,
    );
}

#[test]
fn certification_bonus_is_capped_but_reported_in_full() {
    let engine = engine(spread_snapshot());
    let product = ProductInput::new("Certified Tee", "Bangladesh", "Dry Clean")
        .with_material("Cashmere", 100.0)
        .with_certification("GOTS")
        .with_certification("Cradle to Cradle");

    let result = engine.score(&product).expect("scores");

    assert_close(result.certification_bonus, 20.0);
    assert_close(result.applied_certification_bonus, 15.0);
    assert_close(result.final_score, result.environmental_score + 15.0);
}

#[test]
fn none_placeholder_scores_like_an_empty_slot() {
    let engine = engine(spread_snapshot());
    let empty = engine.score(&cotton_tee()).expect("scores");
    let placeholder = engine
        .score(&cotton_tee().with_certification("none"))
        .expect("placeholder accepted");
    let named = engine
        .score(&cotton_tee().with_certification("No Certification"))
        .expect("named zero row accepted");

    assert_eq!(empty, placeholder);
    assert_eq!(empty, named);
}

#[test]
fn composition_off_by_more_than_tolerance_is_rejected() {
    let engine = engine(spread_snapshot());
    let product = ProductInput::new("Short Tee", "China", "Hand Wash")
        .with_material("Cotton", 60.0)
        .with_material("Polyester", 39.0);

    match engine.score(&product) {
        Err(ScoringError::InvalidComposition(CompositionError::BadTotal { total })) => {
            assert_close(total, 99.0)
        }
        other => panic!("expected invalid composition, got {other:?}"),
    }

    let empty = ProductInput::new("Nothing", "China", "Hand Wash");
    assert_eq!(
        engine.score(&empty),
        Err(ScoringError::InvalidComposition(CompositionError::Empty))
    );
}

#[test]
fn unknown_names_report_their_table() {
    let engine = engine(spread_snapshot());
    let cases = [
        (
            ProductInput::new("x", "China", "Hand Wash").with_material("Kevlar", 100.0),
            TableKind::Materials,
        ),
        (
            ProductInput::new("x", "Atlantis", "Hand Wash").with_material("Cotton", 100.0),
            TableKind::Origins,
        ),
        (
            ProductInput::new("x", "China", "Steam Only").with_material("Cotton", 100.0),
            TableKind::CareInstructions,
        ),
        (
            ProductInput::new("x", "China", "Hand Wash")
                .with_material("Cotton", 100.0)
                .with_certification("Made Up Label"),
            TableKind::Certifications,
        ),
    ];

    for (product, expected_table) in cases {
        match engine.score(&product) {
            Err(ScoringError::UnknownReferenceKey(err)) => assert_eq!(err.table, expected_table),
            other => panic!("expected unknown {expected_table}, got {other:?}"),
        }
    }
}

#[test]
fn composition_is_checked_before_names() {
    let engine = engine(spread_snapshot());
    let product = ProductInput::new("x", "Atlantis", "Hand Wash").with_material("Kevlar", 10.0);
    assert!(matches!(
        engine.score(&product),
        Err(ScoringError::InvalidComposition(_))
    ));
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let engine = engine(spread_snapshot());
    let product = cotton_tee().with_certification("Fair Trade");

    let first = engine.score(&product).expect("scores");
    let second = engine.score(&product).expect("scores");

    assert_eq!(first, second);
    assert_eq!(first.final_score.to_bits(), second.final_score.to_bits());
}

#[test]
fn shared_engine_scores_consistently_across_threads() {
    let engine = engine(spread_snapshot());
    let expected = engine.score(&cotton_tee()).expect("scores");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.score(&cotton_tee()).expect("scores")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread completes"), expected);
        }
    });
}

#[test]
fn bundled_snapshot_scores_sample_products() {
    let engine = ScoringEngine::new(
        Arc::new(crate::reference::ReferenceSnapshot::bundled().expect("bundled")),
        ScoringConfig::default(),
    );

    let conventional = engine
        .score(
            &ProductInput::new("Jumper", "China", "Machine Wash 30C")
                .with_material("Cotton", 60.0)
                .with_material("Polyester", 40.0),
        )
        .expect("scores");
    let certified = engine
        .score(
            &ProductInput::new("Fleece", "Portugal", "Machine Wash Cold")
                .with_material("Recycled Polyester", 100.0)
                .with_certification("GRS"),
        )
        .expect("scores");

    assert!(certified.final_score > conventional.final_score);
}
