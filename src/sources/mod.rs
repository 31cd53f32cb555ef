//! Listings sources
//!
//! [`ListingSource`] is the seam between the grabber and the network:
//! [`TvClubSource`] fetches the real feed, tests plug in their own.

pub mod traits;
pub mod tvclub;

pub use traits::ListingSource;
pub use tvclub::{TVCLUB_XMLTV_URL, TvClubSource};
