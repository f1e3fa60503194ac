//! Sample product catalog scored once against the active snapshot.

mod loader;

use crate::scoring::{ProductInput, ScoreResult, ScoringEngine};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const BUNDLED_PRODUCTS: &str = include_str!("../../data/products.csv");

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read products from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid products data: {0}")]
    Csv(#[from] csv::Error),
    #[error("limit must be between 1 and {MAX_PAGE_LIMIT}, got {0}")]
    InvalidLimit(usize),
}

/// A product as listed in the export, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogListing {
    pub id: u64,
    pub price: Option<String>,
    pub input: ProductInput,
}

/// A listing together with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub listing: CatalogListing,
    pub score: ScoreResult,
}

impl CatalogProduct {
    pub fn id(&self) -> u64 {
        self.listing.id
    }

    pub fn input(&self) -> &ProductInput {
        &self.listing.input
    }

    pub fn summary(&self) -> ProductSummary {
        let input = &self.listing.input;
        ProductSummary {
            id: self.listing.id,
            product_name: input.product_name.clone(),
            brand: input.brand.clone().unwrap_or_else(|| "Unknown".to_string()),
            category: input.category.clone().unwrap_or_else(|| "Other".to_string()),
            subcategory: input
                .subcategory
                .clone()
                .unwrap_or_else(|| "Other".to_string()),
            price: self.listing.price.clone(),
            score: self.score.final_score,
        }
    }
}

/// Listing view of a scored product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: u64,
    pub product_name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub score: f64,
}

/// Offset pagination with an optional case-insensitive category filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            category: None,
        }
    }
}

impl PageRequest {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(1..=MAX_PAGE_LIMIT).contains(&self.limit) {
            return Err(CatalogError::InvalidLimit(self.limit));
        }
        Ok(())
    }
}

/// Scored products in export order. Listings that fail to score are kept
/// out of the product list and counted in [`Catalog::skipped`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<CatalogListing>,
    products: Vec<CatalogProduct>,
}

impl Catalog {
    pub fn score(listings: Vec<CatalogListing>, engine: &ScoringEngine) -> Self {
        let mut products = Vec::with_capacity(listings.len());
        for listing in &listings {
            match engine.score(&listing.input) {
                Ok(score) => products.push(CatalogProduct {
                    listing: listing.clone(),
                    score,
                }),
                Err(err) => warn!(
                    id = listing.id,
                    product = %listing.input.product_name,
                    error = %err,
                    "skipping catalog product"
                ),
            }
        }

        let catalog = Self { listings, products };
        info!(
            products = catalog.len(),
            skipped = catalog.skipped(),
            "catalog scored"
        );
        catalog
    }

    pub fn from_reader<R: Read>(reader: R, engine: &ScoringEngine) -> Result<Self, CatalogError> {
        Ok(Self::score(loader::parse_listings(reader)?, engine))
    }

    pub fn bundled(engine: &ScoringEngine) -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_PRODUCTS.as_bytes(), engine)
    }

    pub fn from_path(path: &Path, engine: &ScoringEngine) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, engine)
    }

    /// Reads `path` when given, the bundled sample otherwise.
    pub fn load(path: Option<&Path>, engine: &ScoringEngine) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path, engine),
            None => Self::bundled(engine),
        }
    }

    /// Scores every listing again, including previously skipped ones,
    /// against `engine`'s snapshot.
    pub fn rescore(&self, engine: &ScoringEngine) -> Self {
        Self::score(self.listings.clone(), engine)
    }

    pub fn page(&self, request: &PageRequest) -> Result<Vec<ProductSummary>, CatalogError> {
        request.validate()?;
        let category = request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());

        Ok(self
            .products
            .iter()
            .filter(|product| match category {
                Some(wanted) => product
                    .input()
                    .category
                    .as_deref()
                    .is_some_and(|actual| actual.eq_ignore_ascii_case(wanted)),
                None => true,
            })
            .skip(request.offset)
            .take(request.limit)
            .map(CatalogProduct::summary)
            .collect())
    }

    pub fn get(&self, id: u64) -> Option<&CatalogProduct> {
        self.products.iter().find(|product| product.id() == id)
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CatalogProduct> {
        self.products.choose(rng)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter_map(|product| product.input().category.as_deref())
            .filter(|category| seen.insert(category.to_ascii_lowercase()))
            .map(str::to_string)
            .collect()
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.listings.len() - self.products.len()
    }
}
