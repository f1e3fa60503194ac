use crate::reference::IndicatorRange;

/// Maps a raw indicator onto 0-100 badness against table-wide bounds.
/// A degenerate range carries no signal and yields 0.
pub fn normalize(raw: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    // Ratio first: `x / x` is exactly 1, so the table max lands on 100.
    ((raw - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

pub fn badness(raw: f64, range: IndicatorRange) -> f64 {
    normalize(raw, range.min, range.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_map_to_zero_and_hundred() {
        assert_eq!(normalize(2.0, 2.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 2.0, 10.0), 100.0);
        assert_eq!(normalize(6.0, 2.0, 10.0), 50.0);
    }

    #[test]
    fn decimal_table_max_lands_exactly_on_hundred() {
        assert_eq!(normalize(0.68, 0.0, 0.68), 100.0);
        assert_eq!(normalize(0.3, 0.1, 0.3), 100.0);
        assert_eq!(normalize(0.17, 0.0, 0.17), 100.0);

        for min in [0.0, 0.05, 0.10, 1.60] {
            for cents in 1..=5000 {
                let max = f64::from(cents) / 100.0;
                if max <= min {
                    continue;
                }
                assert_eq!(normalize(max, min, max), 100.0, "bounds [{min}, {max}]");
                assert_eq!(normalize(min, min, max), 0.0, "bounds [{min}, {max}]");
            }
        }
    }

    #[test]
    fn degenerate_range_yields_zero() {
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
        assert_eq!(badness(7.0, IndicatorRange::new(3.0, 3.0)), 0.0);
    }

    #[test]
    fn values_outside_bounds_are_clamped() {
        assert_eq!(normalize(-4.0, 0.0, 8.0), 0.0);
        assert_eq!(normalize(12.0, 0.0, 8.0), 100.0);
    }

    #[test]
    fn preserves_relative_order() {
        let values = [10.0, 30.0, 20.0, 40.0].map(|raw| normalize(raw, 10.0, 40.0));
        assert!(values[0] < values[2] && values[2] < values[1] && values[1] < values[3]);
    }
}
