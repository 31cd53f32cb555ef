//! Configuration default values
//!
//! This module contains all the default values for configuration options,
//! making them easily changeable in one central location.

// Source defaults
pub const DEFAULT_SOURCE_URL: &str = crate::sources::TVCLUB_XMLTV_URL;
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub const DEFAULT_CONNECT_TIMEOUT: &str = "10s";

// Output defaults
pub const DEFAULT_GENERATOR_NAME: &str = "tv_grab_fr_tvclub";
pub const DEFAULT_GENERATOR_URL: &str = "https://github.com/melmorabity/tv_grab_fr_tvclub";
pub const DEFAULT_FILTER_PROGRAMMES_BY_CHANNEL: bool = false;

// Grab defaults
pub const DEFAULT_DAYS: u32 = 1;
pub const DEFAULT_OFFSET: u32 = 0;

// Channel selection file, relative to the home directory
pub const DEFAULT_CONFIG_DIR: &str = ".xmltv";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "tv_grab_fr_tvclub.conf";

// Environment variables overriding settings, e.g. TVCLUB_SOURCE_URL
pub const SETTINGS_ENV_PREFIX: &str = "TVCLUB_";
