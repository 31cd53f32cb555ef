//! Source handler trait definitions

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::RawListing;

/// A remote listings feed
///
/// One call to [`ListingSource::fetch`] performs one retrieval; there is
/// no retry layer.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// URL the feed is retrieved from, echoed in the output metadata
    fn data_url(&self) -> &str;

    /// Retrieve and parse the feed
    async fn fetch(&self) -> AppResult<RawListing>;
}
