use super::records::{
    CareReference, CertificationReference, MaterialReference, OriginReference, TableKind,
};
use super::ReferenceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_materials<R: Read>(reader: R) -> Result<Vec<MaterialReference>, ReferenceError> {
    parse_rows::<_, MaterialRow>(reader, TableKind::Materials)
        .map(|rows| rows.into_iter().map(MaterialReference::from).collect())
}

pub(crate) fn parse_origins<R: Read>(reader: R) -> Result<Vec<OriginReference>, ReferenceError> {
    parse_rows::<_, OriginRow>(reader, TableKind::Origins)
        .map(|rows| rows.into_iter().map(OriginReference::from).collect())
}

pub(crate) fn parse_care<R: Read>(reader: R) -> Result<Vec<CareReference>, ReferenceError> {
    parse_rows::<_, CareRow>(reader, TableKind::CareInstructions)
        .map(|rows| rows.into_iter().map(CareReference::from).collect())
}

pub(crate) fn parse_certifications<R: Read>(
    reader: R,
) -> Result<Vec<CertificationReference>, ReferenceError> {
    parse_rows::<_, CertificationRow>(reader, TableKind::Certifications)
        .map(|rows| rows.into_iter().map(CertificationReference::from).collect())
}

fn parse_rows<R: Read, T: DeserializeOwned>(
    reader: R,
    table: TableKind,
) -> Result<Vec<T>, ReferenceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .map(|row| row.map_err(|source| ReferenceError::Csv { table, source }))
        .collect()
}

#[derive(Debug, Deserialize)]
struct MaterialRow {
    #[serde(rename = "Material")]
    name: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Carbon_kgCO2e")]
    carbon: f64,
    #[serde(rename = "Water_L")]
    water: f64,
    #[serde(rename = "FossilEnergy_MJ")]
    energy: f64,
    #[serde(rename = "ChemicalImpact_Score")]
    chemical: f64,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_default")]
    notes: String,
}

impl From<MaterialRow> for MaterialReference {
    fn from(row: MaterialRow) -> Self {
        Self {
            name: row.name,
            category: row.category,
            carbon_kg_co2e: row.carbon,
            water_l: row.water,
            fossil_energy_mj: row.energy,
            chemical_impact: row.chemical,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OriginRow {
    #[serde(rename = "Origin")]
    name: String,
    #[serde(rename = "Energy_Grid_Intensity")]
    grid: f64,
    #[serde(rename = "Transport_Impact_Score")]
    transport: f64,
    #[serde(rename = "Manufacturing_Impact_Score")]
    manufacturing: f64,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_default")]
    notes: String,
}

impl From<OriginRow> for OriginReference {
    fn from(row: OriginRow) -> Self {
        Self {
            name: row.name,
            energy_grid_intensity: row.grid,
            transport_impact: row.transport,
            manufacturing_impact: row.manufacturing,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CareRow {
    #[serde(rename = "Care_Instruction")]
    name: String,
    #[serde(rename = "Energy_Use_MJ")]
    energy: f64,
    #[serde(rename = "Water_Use_L")]
    water: f64,
    #[serde(rename = "CO2_kg")]
    co2: f64,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_default")]
    notes: String,
}

impl From<CareRow> for CareReference {
    fn from(row: CareRow) -> Self {
        Self {
            name: row.name,
            energy_use_mj: row.energy,
            water_use_l: row.water,
            co2_kg: row.co2,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CertificationRow {
    #[serde(rename = "Certification")]
    name: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Score_Bonus")]
    bonus: f64,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "empty_string_as_default"
    )]
    description: String,
}

impl From<CertificationRow> for CertificationReference {
    fn from(row: CertificationRow) -> Self {
        Self {
            name: row.name,
            category: row.category,
            score_bonus: row.bonus,
            description: row.description,
        }
    }
}

fn empty_string_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
