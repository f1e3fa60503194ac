use super::records::{
    CareReference, MaterialReference, OriginReference, ReferenceRecord, TableKind,
};
use super::table::ReferenceTable;
use serde::Serialize;
use std::fmt;

/// Every indicator that feeds the environmental score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    MaterialCarbon,
    MaterialWater,
    MaterialEnergy,
    MaterialChemical,
    CareEnergy,
    CareWater,
    CareCo2,
    OriginGrid,
    OriginTransport,
    OriginManufacturing,
}

impl Indicator {
    pub const COUNT: usize = 10;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::MaterialCarbon,
            Self::MaterialWater,
            Self::MaterialEnergy,
            Self::MaterialChemical,
            Self::CareEnergy,
            Self::CareWater,
            Self::CareCo2,
            Self::OriginGrid,
            Self::OriginTransport,
            Self::OriginManufacturing,
        ]
    }

    pub const fn table(self) -> TableKind {
        match self {
            Self::MaterialCarbon
            | Self::MaterialWater
            | Self::MaterialEnergy
            | Self::MaterialChemical => TableKind::Materials,
            Self::CareEnergy | Self::CareWater | Self::CareCo2 => TableKind::CareInstructions,
            Self::OriginGrid | Self::OriginTransport | Self::OriginManufacturing => {
                TableKind::Origins
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MaterialCarbon => "material carbon (kg CO2e)",
            Self::MaterialWater => "material water (L)",
            Self::MaterialEnergy => "material fossil energy (MJ)",
            Self::MaterialChemical => "material chemical impact",
            Self::CareEnergy => "care energy (MJ)",
            Self::CareWater => "care water (L)",
            Self::CareCo2 => "care CO2 (kg)",
            Self::OriginGrid => "origin grid intensity",
            Self::OriginTransport => "origin transport impact",
            Self::OriginManufacturing => "origin manufacturing impact",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Table-wide minimum and maximum of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorRange {
    pub min: f64,
    pub max: f64,
}

impl IndicatorRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A table whose rows all share one value carries no discriminating signal.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    fn spanning<T>(rows: &[T], value: impl Fn(&T) -> f64) -> Self {
        let mut values = rows.iter().map(value);
        let Some(first) = values.next() else {
            return Self::new(0.0, 0.0);
        };

        values.fold(Self::new(first, first), |range, value| {
            Self::new(range.min.min(value), range.max.max(value))
        })
    }
}

/// Bounds for all ten indicators, computed once from complete tables.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBounds {
    ranges: [IndicatorRange; Indicator::COUNT],
}

impl IndicatorBounds {
    pub(crate) fn compute(
        materials: &ReferenceTable<MaterialReference>,
        origins: &ReferenceTable<OriginReference>,
        care: &ReferenceTable<CareReference>,
    ) -> Self {
        let ranges = Indicator::ordered().map(|indicator| match indicator {
            Indicator::MaterialCarbon => range_of(materials, |row| row.carbon_kg_co2e),
            Indicator::MaterialWater => range_of(materials, |row| row.water_l),
            Indicator::MaterialEnergy => range_of(materials, |row| row.fossil_energy_mj),
            Indicator::MaterialChemical => range_of(materials, |row| row.chemical_impact),
            Indicator::CareEnergy => range_of(care, |row| row.energy_use_mj),
            Indicator::CareWater => range_of(care, |row| row.water_use_l),
            Indicator::CareCo2 => range_of(care, |row| row.co2_kg),
            Indicator::OriginGrid => range_of(origins, |row| row.energy_grid_intensity),
            Indicator::OriginTransport => range_of(origins, |row| row.transport_impact),
            Indicator::OriginManufacturing => range_of(origins, |row| row.manufacturing_impact),
        });

        Self { ranges }
    }

    pub fn get(&self, indicator: Indicator) -> IndicatorRange {
        self.ranges[indicator.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, IndicatorRange)> + '_ {
        Indicator::ordered()
            .into_iter()
            .map(move |indicator| (indicator, self.get(indicator)))
    }
}

fn range_of<T: ReferenceRecord>(
    table: &ReferenceTable<T>,
    value: impl Fn(&T) -> f64,
) -> IndicatorRange {
    IndicatorRange::spanning(table.rows(), value)
}
