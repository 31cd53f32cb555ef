//! Data mapping for feed values
//!
//! Translates TVClub-specific labels into standard vocabularies.

pub mod categories;

pub use categories::{CategoryMapping, ETSI_PROGRAM_CATEGORIES, etsi_category, map_category};
