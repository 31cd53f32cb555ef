//! TVClub XMLTV grabber
//!
//! Downloads the TVClub guide, keeps the programmes of the requested days,
//! removes duplicates, repairs Windows-1252 leftovers in text fields, maps
//! TVClub genres to ETSI categories and writes the result as XMLTV.

pub mod config;
pub mod data_mapping;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod sources;
pub mod utils;
