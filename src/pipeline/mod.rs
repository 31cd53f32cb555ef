//! Transform pipeline from the fetched feed to the output document
//!
//! date window → deduplication → per-entry cleanup → channel selection.
//! Serialization lives in [`crate::utils::xmltv_writer`].

pub mod date_window;
pub mod normalize;
pub mod reporter;
pub mod transformer;

pub use date_window::{DateWindow, MAX_DAYS};
pub use reporter::{RecordingReporter, TracingReporter, TransformReporter, TransformWarning};
pub use transformer::{ListingRequest, ListingTransformer, TransformStatistics};
