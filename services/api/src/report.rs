use ecoscore::reference::SnapshotSummary;
use ecoscore::scoring::{ProductInput, ScoreBreakdown, ScoreResult};
use serde::Serialize;
use std::fmt::Write as _;

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Response body for a scored product. Scores are rounded to one decimal
/// for display; the engine itself never rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) product_name: String,
    pub(crate) brand: String,
    pub(crate) final_score: f64,
    pub(crate) environmental_score: f64,
    pub(crate) certification_bonus: f64,
    pub(crate) applied_certification_bonus: f64,
    pub(crate) breakdown: ScoreBreakdown,
}

impl ScoreReport {
    pub(crate) fn new(input: &ProductInput, result: &ScoreResult) -> Self {
        let mut breakdown = result.breakdown;
        let material = &mut breakdown.material_impact;
        for value in [
            &mut material.co2,
            &mut material.water,
            &mut material.energy,
            &mut material.chemical,
        ] {
            *value = one_decimal(*value);
        }
        let care = &mut breakdown.care_impact;
        for value in [&mut care.co2, &mut care.water, &mut care.energy] {
            *value = one_decimal(*value);
        }
        let origin = &mut breakdown.origin_impact;
        for value in [
            &mut origin.grid,
            &mut origin.transport,
            &mut origin.manufacturing,
        ] {
            *value = one_decimal(*value);
        }

        Self {
            product_name: input.product_name.clone(),
            brand: input
                .brand
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            final_score: one_decimal(result.final_score),
            environmental_score: one_decimal(result.environmental_score),
            certification_bonus: one_decimal(result.certification_bonus),
            applied_certification_bonus: one_decimal(result.applied_certification_bonus),
            breakdown,
        }
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        let b = &self.breakdown;
        let _ = writeln!(out, "{} ({})", self.product_name, self.brand);
        let _ = writeln!(out, "  Final score:          {:>5.1} / 100", self.final_score);
        let _ = writeln!(out, "  Environmental score:  {:>5.1}", self.environmental_score);
        let _ = writeln!(
            out,
            "  Certification bonus:  {:>5.1} (applied {:.1})",
            self.certification_bonus, self.applied_certification_bonus
        );
        let _ = writeln!(out, "  Impact badness (0 best, 100 worst)");
        let _ = writeln!(
            out,
            "    Material  co2 {:>5.1}  water {:>5.1}  energy {:>5.1}  chemical {:>5.1}",
            b.material_impact.co2,
            b.material_impact.water,
            b.material_impact.energy,
            b.material_impact.chemical
        );
        let _ = writeln!(
            out,
            "    Care      co2 {:>5.1}  water {:>5.1}  energy {:>5.1}",
            b.care_impact.co2, b.care_impact.water, b.care_impact.energy
        );
        let _ = writeln!(
            out,
            "    Origin    grid {:>5.1}  transport {:>5.1}  manufacturing {:>5.1}",
            b.origin_impact.grid, b.origin_impact.transport, b.origin_impact.manufacturing
        );
        out
    }
}

pub(crate) fn render_reference_summary(summary: &SnapshotSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Reference data loaded {}", summary.loaded_at.to_rfc3339());
    let _ = writeln!(
        out,
        "  materials: {}  origins: {}  care instructions: {}  certifications: {}",
        summary.materials, summary.origins, summary.care_instructions, summary.certifications
    );
    let _ = writeln!(out, "Indicator bounds");
    for view in &summary.bounds {
        let marker = if view.degenerate { "  (degenerate)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<28} {:>10.3} .. {:<10.3}{}",
            view.indicator.to_string(),
            view.min,
            view.max,
            marker
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoscore::reference::ReferenceSnapshot;
    use ecoscore::scoring::{ScoringConfig, ScoringEngine};
    use std::sync::Arc;

    #[test]
    fn report_rounds_for_display() {
        let engine = ScoringEngine::new(
            Arc::new(ReferenceSnapshot::bundled().expect("bundled")),
            ScoringConfig::default(),
        );
        let input = ProductInput::new("Jumper", "China", "Machine Wash 30C")
            .with_material("Cotton", 60.0)
            .with_material("Polyester", 40.0);
        let result = engine.score(&input).expect("scores");

        let report = ScoreReport::new(&input, &result);

        assert_eq!(report.brand, "Unknown");
        assert_eq!(report.final_score, one_decimal(result.final_score));
        assert!((report.final_score - result.final_score).abs() <= 0.05);
        assert!(report.render().contains("Final score"));
    }

    #[test]
    fn summary_lists_every_indicator() {
        let summary = ReferenceSnapshot::bundled().expect("bundled").summary();
        let rendered = render_reference_summary(&summary);
        assert_eq!(
            rendered.lines().count(),
            3 + summary.bounds.len(),
            "{rendered}"
        );
    }
}
