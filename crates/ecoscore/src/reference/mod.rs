//! Immutable LCA reference data.
//!
//! A [`ReferenceSnapshot`] owns the four reference tables and the indicator
//! bounds derived from them. Snapshots are validated when built and never
//! mutated afterwards; a reload builds a fresh snapshot and publishes it
//! through [`SnapshotStore`].

mod bounds;
mod loader;
pub(crate) mod normalizer;
mod records;
mod store;
mod table;

pub use bounds::{Indicator, IndicatorBounds, IndicatorRange};
pub use records::{
    CareReference, CertificationReference, MaterialReference, OriginReference, ReferenceEntry,
    ReferenceRecord, TableKind,
};
pub use store::SnapshotStore;
pub use table::ReferenceTable;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

const BUNDLED_MATERIALS: &str = include_str!("../../data/materials.csv");
const BUNDLED_ORIGINS: &str = include_str!("../../data/origins.csv");
const BUNDLED_CARE: &str = include_str!("../../data/care.csv");
const BUNDLED_CERTIFICATIONS: &str = include_str!("../../data/certifications.csv");

/// A name that is not present in its reference table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {table} '{key}'")]
pub struct UnknownReferenceKey {
    pub table: TableKind,
    pub key: String,
}

/// Failure while building a snapshot. Raised at load time only.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read {table} table from {}: {source}", .path.display())]
    Io {
        table: TableKind,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid {table} table data: {source}")]
    Csv {
        table: TableKind,
        source: csv::Error,
    },
    #[error("{table} '{key}' is listed more than once")]
    DuplicateKey { table: TableKind, key: String },
    #[error("{table} '{key}' is invalid: {reason}")]
    InvalidRecord {
        table: TableKind,
        key: String,
        reason: String,
    },
    #[error("{0} table has no rows")]
    EmptyTable(TableKind),
}

/// Where a snapshot's tables came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ReferenceSource {
    /// Tables compiled into the crate.
    Bundled,
    /// A directory holding `materials.csv`, `origins.csv`, `care.csv` and
    /// `certifications.csv`.
    Directory(PathBuf),
}

impl ReferenceSource {
    pub fn load(&self) -> Result<ReferenceSnapshot, ReferenceError> {
        let snapshot = match self {
            Self::Bundled => ReferenceSnapshot::bundled()?,
            Self::Directory(dir) => ReferenceSnapshot::from_dir(dir)?,
        };

        info!(
            source = ?self,
            materials = snapshot.materials().len(),
            origins = snapshot.origins().len(),
            care = snapshot.care_instructions().len(),
            certifications = snapshot.certifications().len(),
            "reference snapshot loaded"
        );

        Ok(snapshot)
    }
}

/// Read-only view over the four reference tables plus their indicator bounds.
#[derive(Debug, Clone)]
pub struct ReferenceSnapshot {
    materials: ReferenceTable<MaterialReference>,
    origins: ReferenceTable<OriginReference>,
    care: ReferenceTable<CareReference>,
    certifications: ReferenceTable<CertificationReference>,
    bounds: IndicatorBounds,
    source: ReferenceSource,
    loaded_at: DateTime<Utc>,
}

impl ReferenceSnapshot {
    /// Builds a snapshot from in-memory rows. Materials, origins and care
    /// instructions must each hold at least one row; the certification table
    /// may be empty.
    pub fn new(
        materials: Vec<MaterialReference>,
        origins: Vec<OriginReference>,
        care: Vec<CareReference>,
        certifications: Vec<CertificationReference>,
    ) -> Result<Self, ReferenceError> {
        let materials = ReferenceTable::from_rows(materials)?;
        let origins = ReferenceTable::from_rows(origins)?;
        let care = ReferenceTable::from_rows(care)?;
        let certifications = ReferenceTable::from_rows(certifications)?;

        for (kind, empty) in [
            (TableKind::Materials, materials.is_empty()),
            (TableKind::Origins, origins.is_empty()),
            (TableKind::CareInstructions, care.is_empty()),
        ] {
            if empty {
                return Err(ReferenceError::EmptyTable(kind));
            }
        }

        let bounds = IndicatorBounds::compute(&materials, &origins, &care);

        Ok(Self {
            materials,
            origins,
            care,
            certifications,
            bounds,
            source: ReferenceSource::Bundled,
            loaded_at: Utc::now(),
        })
    }

    /// Parses the four tables from CSV readers using the export headers.
    pub fn from_readers<M, O, C, Z>(
        materials: M,
        origins: O,
        care: C,
        certifications: Z,
    ) -> Result<Self, ReferenceError>
    where
        M: Read,
        O: Read,
        C: Read,
        Z: Read,
    {
        Self::new(
            loader::parse_materials(materials)?,
            loader::parse_origins(origins)?,
            loader::parse_care(care)?,
            loader::parse_certifications(certifications)?,
        )
    }

    /// Tables shipped with the crate.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_readers(
            BUNDLED_MATERIALS.as_bytes(),
            BUNDLED_ORIGINS.as_bytes(),
            BUNDLED_CARE.as_bytes(),
            BUNDLED_CERTIFICATIONS.as_bytes(),
        )
    }

    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ReferenceError> {
        let dir = dir.as_ref();
        let open = |table: TableKind| {
            let path = dir.join(table.file_name());
            File::open(&path).map_err(|source| ReferenceError::Io {
                table,
                path,
                source,
            })
        };

        let mut snapshot = Self::from_readers(
            open(TableKind::Materials)?,
            open(TableKind::Origins)?,
            open(TableKind::CareInstructions)?,
            open(TableKind::Certifications)?,
        )?;
        snapshot.source = ReferenceSource::Directory(dir.to_path_buf());
        Ok(snapshot)
    }

    pub fn material(&self, name: &str) -> Result<&MaterialReference, UnknownReferenceKey> {
        self.materials.get(name)
    }

    pub fn origin(&self, name: &str) -> Result<&OriginReference, UnknownReferenceKey> {
        self.origins.get(name)
    }

    pub fn care_instruction(&self, name: &str) -> Result<&CareReference, UnknownReferenceKey> {
        self.care.get(name)
    }

    pub fn certification(
        &self,
        name: &str,
    ) -> Result<&CertificationReference, UnknownReferenceKey> {
        self.certifications.get(name)
    }

    /// Untyped lookup across any table.
    pub fn lookup(
        &self,
        table: TableKind,
        name: &str,
    ) -> Result<ReferenceEntry<'_>, UnknownReferenceKey> {
        match table {
            TableKind::Materials => self.material(name).map(ReferenceEntry::Material),
            TableKind::Origins => self.origin(name).map(ReferenceEntry::Origin),
            TableKind::CareInstructions => self.care_instruction(name).map(ReferenceEntry::Care),
            TableKind::Certifications => {
                self.certification(name).map(ReferenceEntry::Certification)
            }
        }
    }

    /// Minimum and maximum of `indicator` across every row of its table.
    pub fn indicator_range(&self, indicator: Indicator) -> IndicatorRange {
        self.bounds.get(indicator)
    }

    pub fn bounds(&self) -> &IndicatorBounds {
        &self.bounds
    }

    pub fn materials(&self) -> &ReferenceTable<MaterialReference> {
        &self.materials
    }

    pub fn origins(&self) -> &ReferenceTable<OriginReference> {
        &self.origins
    }

    pub fn care_instructions(&self) -> &ReferenceTable<CareReference> {
        &self.care
    }

    pub fn certifications(&self) -> &ReferenceTable<CertificationReference> {
        &self.certifications
    }

    pub fn source(&self) -> &ReferenceSource {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            source: self.source.clone(),
            loaded_at: self.loaded_at,
            materials: self.materials.len(),
            origins: self.origins.len(),
            care_instructions: self.care.len(),
            certifications: self.certifications.len(),
            bounds: self
                .bounds
                .iter()
                .map(|(indicator, range)| IndicatorBoundsView {
                    indicator,
                    table: indicator.table(),
                    min: range.min,
                    max: range.max,
                    degenerate: range.is_degenerate(),
                })
                .collect(),
        }
    }
}

/// Serializable overview of a snapshot for health checks and listings.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub source: ReferenceSource,
    pub loaded_at: DateTime<Utc>,
    pub materials: usize,
    pub origins: usize,
    pub care_instructions: usize,
    pub certifications: usize,
    pub bounds: Vec<IndicatorBoundsView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorBoundsView {
    pub indicator: Indicator,
    pub table: TableKind,
    pub min: f64,
    pub max: f64,
    pub degenerate: bool,
}
