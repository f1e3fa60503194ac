use super::normalizer::normalize_key;
use super::records::{ReferenceRecord, TableKind};
use super::{ReferenceError, UnknownReferenceKey};
use std::collections::HashMap;

/// Rows of one reference table in file order, indexed by normalized name.
#[derive(Debug, Clone)]
pub struct ReferenceTable<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: ReferenceRecord> ReferenceTable<T> {
    /// Validates every row and rejects blank or case-insensitively duplicated
    /// names.
    pub fn from_rows(rows: Vec<T>) -> Result<Self, ReferenceError> {
        let mut index = HashMap::with_capacity(rows.len());

        for (position, row) in rows.iter().enumerate() {
            let key = normalize_key(row.name());
            if key.is_empty() {
                return Err(ReferenceError::InvalidRecord {
                    table: T::TABLE,
                    key: format!("row {}", position + 1),
                    reason: "name must not be blank".to_string(),
                });
            }

            row.validate()
                .map_err(|reason| ReferenceError::InvalidRecord {
                    table: T::TABLE,
                    key: row.name().to_string(),
                    reason,
                })?;

            if index.insert(key, position).is_some() {
                return Err(ReferenceError::DuplicateKey {
                    table: T::TABLE,
                    key: row.name().to_string(),
                });
            }
        }

        Ok(Self { rows, index })
    }

    pub fn get(&self, name: &str) -> Result<&T, UnknownReferenceKey> {
        self.find(name).ok_or_else(|| UnknownReferenceKey {
            table: T::TABLE,
            key: name.trim().to_string(),
        })
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        self.index
            .get(&normalize_key(name))
            .map(|&position| &self.rows[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&normalize_key(name))
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn kind(&self) -> TableKind {
        T::TABLE
    }
}
