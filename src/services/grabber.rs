//! XMLTV grabber service
//!
//! Fetches the feed once and serves both caller-facing operations from the
//! same in-memory copy: listing the available channels and writing the
//! listings for a channel selection.

use std::io::Write;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::GrabberSettings;
use crate::errors::AppResult;
use crate::models::{ChannelCatalogue, OutputDocument, RawListing, SourceInfo};
use crate::pipeline::{ListingRequest, ListingTransformer, TransformReporter, TransformStatistics};
use crate::sources::ListingSource;
use crate::utils::xmltv_writer::write_document;

/// Output options not tied to a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrabberOptions {
    pub generator_name: Option<String>,
    pub generator_url: Option<String>,
    pub filter_programmes_by_channel: bool,
}

impl From<&GrabberSettings> for GrabberOptions {
    fn from(settings: &GrabberSettings) -> Self {
        Self {
            generator_name: settings.generator_name.clone(),
            generator_url: settings.generator_url.clone(),
            filter_programmes_by_channel: settings.filter_programmes_by_channel,
        }
    }
}

/// A fetched feed ready to be turned into XMLTV documents
pub struct Grabber {
    listing: RawListing,
    catalogue: ChannelCatalogue,
    source_info: SourceInfo,
    options: GrabberOptions,
    today: Option<NaiveDate>,
}

impl Grabber {
    /// Fetch the feed from `source`
    pub async fn connect<S: ListingSource + ?Sized>(
        source: &S,
        options: GrabberOptions,
    ) -> AppResult<Self> {
        let listing = source.fetch().await?;
        let source_info = SourceInfo::tvclub(source.data_url())
            .with_generator(options.generator_name.clone(), options.generator_url.clone());
        Ok(Self::from_listing(listing, source_info, options))
    }

    /// Wrap an already fetched feed
    pub fn from_listing(listing: RawListing, source_info: SourceInfo, options: GrabberOptions) -> Self {
        let catalogue = listing.channels();
        debug!("Feed advertises {} channels", catalogue.len());
        Self {
            listing,
            catalogue,
            source_info,
            options,
            today: None,
        }
    }

    /// Pin the date the window is computed from instead of the local date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Channels advertised by the feed, keyed by XMLTV id
    pub fn list_available_channels(&self) -> &ChannelCatalogue {
        &self.catalogue
    }

    /// Build the output document for a request
    pub fn build_listing(
        &self,
        request: &ListingRequest,
        reporter: &dyn TransformReporter,
    ) -> AppResult<(OutputDocument, TransformStatistics)> {
        for channel_id in &request.selected_channels {
            if !self.catalogue.contains(channel_id) {
                warn!("Channel {channel_id} is not available in the TVClub feed");
            }
        }

        let mut transformer = ListingTransformer::new(self.source_info.clone(), reporter)
            .filter_programmes_by_channel(self.options.filter_programmes_by_channel);
        if let Some(today) = self.today {
            transformer = transformer.with_today(today);
        }
        transformer.transform_with_statistics(&self.listing, request)
    }

    /// Build the output document for a request and serialize it to `sink`
    pub fn write_listing<W: Write>(
        &self,
        request: &ListingRequest,
        sink: W,
        reporter: &dyn TransformReporter,
    ) -> AppResult<TransformStatistics> {
        let (document, stats) = self.build_listing(request, reporter)?;
        write_document(&document, sink)?;
        info!(
            "Wrote {} channels and {} programmes",
            stats.channels_kept, stats.programmes_kept
        );
        Ok(stats)
    }
}
