//! Utility modules for the TVClub grabber
//!
//! XML reading and writing, XMLTV timestamps, text repair and HTTP access.

pub mod datetime;
pub mod decompression;
pub mod encoding;
pub mod http_client;
pub mod url;
pub mod xmltv_parser;
pub mod xmltv_writer;

pub use decompression::{CompressionFormat, DecompressionService};
pub use http_client::StandardHttpClient;
