use serde::{Deserialize, Serialize};
use std::fmt;

/// The four reference tables a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Materials,
    Origins,
    CareInstructions,
    Certifications,
}

impl TableKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Materials,
            Self::Origins,
            Self::CareInstructions,
            Self::Certifications,
        ]
    }

    /// Singular noun used in error messages ("unknown material 'Foo'").
    pub const fn label(self) -> &'static str {
        match self {
            Self::Materials => "material",
            Self::Origins => "origin",
            Self::CareInstructions => "care instruction",
            Self::Certifications => "certification",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Materials => "materials.csv",
            Self::Origins => "origins.csv",
            Self::CareInstructions => "care.csv",
            Self::Certifications => "certifications.csv",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rows that can live in a [`super::ReferenceTable`].
pub trait ReferenceRecord {
    const TABLE: TableKind;

    fn name(&self) -> &str;

    /// Field-level checks run once at load time.
    fn validate(&self) -> Result<(), String>;
}

/// LCA proxy indicators for one fibre, expressed per kilogram of material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialReference {
    pub name: String,
    pub category: String,
    pub carbon_kg_co2e: f64,
    pub water_l: f64,
    pub fossil_energy_mj: f64,
    pub chemical_impact: f64,
    #[serde(default)]
    pub notes: String,
}

impl ReferenceRecord for MaterialReference {
    const TABLE: TableKind = TableKind::Materials;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        non_negative("carbon_kg_co2e", self.carbon_kg_co2e)?;
        non_negative("water_l", self.water_l)?;
        non_negative("fossil_energy_mj", self.fossil_energy_mj)?;
        non_negative("chemical_impact", self.chemical_impact)
    }
}

/// Manufacturing-country impact indices, each on a 0-1 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginReference {
    pub name: String,
    pub energy_grid_intensity: f64,
    pub transport_impact: f64,
    pub manufacturing_impact: f64,
    #[serde(default)]
    pub notes: String,
}

impl ReferenceRecord for OriginReference {
    const TABLE: TableKind = TableKind::Origins;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        unit_interval("energy_grid_intensity", self.energy_grid_intensity)?;
        unit_interval("transport_impact", self.transport_impact)?;
        unit_interval("manufacturing_impact", self.manufacturing_impact)
    }
}

/// Use-phase impacts of a care regimen, per wash cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareReference {
    pub name: String,
    pub energy_use_mj: f64,
    pub water_use_l: f64,
    pub co2_kg: f64,
    #[serde(default)]
    pub notes: String,
}

impl ReferenceRecord for CareReference {
    const TABLE: TableKind = TableKind::CareInstructions;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        non_negative("energy_use_mj", self.energy_use_mj)?;
        non_negative("water_use_l", self.water_use_l)?;
        non_negative("co2_kg", self.co2_kg)
    }
}

/// Certification label and the fractional bonus it grants (0.05 = 5 points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationReference {
    pub name: String,
    pub category: String,
    pub score_bonus: f64,
    #[serde(default)]
    pub description: String,
}

impl ReferenceRecord for CertificationReference {
    const TABLE: TableKind = TableKind::Certifications;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        unit_interval("score_bonus", self.score_bonus)
    }
}

/// Borrowed view of a row from any table, returned by
/// [`super::ReferenceSnapshot::lookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceEntry<'a> {
    Material(&'a MaterialReference),
    Origin(&'a OriginReference),
    Care(&'a CareReference),
    Certification(&'a CertificationReference),
}

impl ReferenceEntry<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Material(row) => &row.name,
            Self::Origin(row) => &row.name,
            Self::Care(row) => &row.name,
            Self::Certification(row) => &row.name,
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{field} must be a finite number, got {value}"));
    }
    if value < 0.0 {
        return Err(format!("{field} must not be negative, got {value}"));
    }
    Ok(())
}

fn unit_interval(field: &str, value: f64) -> Result<(), String> {
    non_negative(field, value)?;
    if value > 1.0 {
        return Err(format!("{field} must be within 0..=1, got {value}"));
    }
    Ok(())
}
