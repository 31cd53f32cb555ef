//! Centralized error handling for the TVClub grabber
//!
//! This module provides the error types shared by every layer of the
//! grabber, from fetching the remote feed to writing the XMLTV output.
//!
//! # Error Categories
//!
//! - **Source Errors**: network failures and malformed feed content
//! - **I/O Errors**: output sink and configuration file failures
//! - **Configuration Errors**: invalid settings or channel selection files
//!
//! # Usage
//!
//! ```rust
//! use tv_grab_fr_tvclub::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("no channel selected"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
