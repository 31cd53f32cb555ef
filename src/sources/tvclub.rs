//! TVClub XMLTV feed
//!
//! The whole guide is published as a single XMLTV file covering about five
//! days of programmes for every channel.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::GrabberSettings;
use crate::errors::AppResult;
use crate::models::RawListing;
use crate::utils::StandardHttpClient;
use crate::utils::url::UrlUtils;

use super::traits::ListingSource;

/// Default location of the TVClub guide
pub const TVCLUB_XMLTV_URL: &str = "http://guide.tvclub.fr/tvguide.xml";

/// Fetches the TVClub guide over HTTP
pub struct TvClubSource {
    url: String,
    http_client: StandardHttpClient,
}

impl TvClubSource {
    pub fn new(url: impl Into<String>, http_client: StandardHttpClient) -> Self {
        Self {
            url: url.into(),
            http_client,
        }
    }

    /// Source configured from the grabber settings
    pub fn from_settings(settings: &GrabberSettings) -> AppResult<Self> {
        let http_client =
            StandardHttpClient::with_timeouts(settings.connect_timeout, settings.request_timeout)?;
        Ok(Self::new(settings.source_url.clone(), http_client))
    }
}

#[async_trait]
impl ListingSource for TvClubSource {
    fn data_url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> AppResult<RawListing> {
        info!("Getting TVClub programs");
        debug!("Retrieving URL {}", UrlUtils::obfuscate_credentials(&self.url));

        let body = self.http_client.fetch_bytes(&self.url).await?;
        let listing = RawListing::parse(&body)?;

        debug!(
            "Parsed TVClub feed: {} channels, {} programmes",
            listing.channel_nodes().len(),
            listing.programme_nodes().len()
        );
        Ok(listing)
    }
}
