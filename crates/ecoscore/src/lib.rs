//! Sustainability scoring for fashion products.
//!
//! Product attributes (material composition, origin, care regimen and
//! certifications) are resolved against an immutable [`reference::ReferenceSnapshot`]
//! and composed into a 0-100 score by [`scoring::ScoringEngine`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod reference;
pub mod scoring;
pub mod telemetry;
