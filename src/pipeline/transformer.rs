//! Listing transformer
//!
//! Turns the fetched feed into the output document: selected channels
//! first, then every programme overlapping the requested days, deduplicated
//! and cleaned up.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::errors::AppResult;
use crate::models::{EntryIdentity, OutputDocument, ProgramEntry, RawListing, SourceInfo};

use super::date_window::DateWindow;
use super::normalize::normalize_programme;
use super::reporter::TransformReporter;

/// What the caller wants out of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Channel identifiers to include in the channel list
    pub selected_channels: Vec<String>,
    /// Number of days to grab
    pub days: u32,
    /// Days after today to start at
    pub offset: u32,
    /// Only emit the channel list
    pub channels_only: bool,
}

impl ListingRequest {
    pub fn new(selected_channels: Vec<String>) -> Self {
        Self {
            selected_channels,
            days: 1,
            offset: 0,
            channels_only: false,
        }
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn channels_only(mut self, channels_only: bool) -> Self {
        self.channels_only = channels_only;
        self
    }
}

/// Counters collected while transforming a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformStatistics {
    pub channels_in_feed: usize,
    pub channels_kept: usize,
    pub programmes_in_feed: usize,
    pub programmes_kept: usize,
    pub outside_window: usize,
    pub duplicates: usize,
    pub unselected_channel: usize,
}

/// Builds output documents from a fetched feed
pub struct ListingTransformer<'r> {
    source: SourceInfo,
    today: NaiveDate,
    filter_programmes_by_channel: bool,
    reporter: &'r dyn TransformReporter,
}

impl<'r> ListingTransformer<'r> {
    /// Transformer using the local calendar date as "today"
    pub fn new(source: SourceInfo, reporter: &'r dyn TransformReporter) -> Self {
        Self {
            source,
            today: Local::now().date_naive(),
            filter_programmes_by_channel: false,
            reporter,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Also drop programmes whose channel is not selected. Off by default:
    /// the grabber historically kept every programme in the window.
    pub fn filter_programmes_by_channel(mut self, enabled: bool) -> Self {
        self.filter_programmes_by_channel = enabled;
        self
    }

    pub fn transform(&self, raw: &RawListing, request: &ListingRequest) -> AppResult<OutputDocument> {
        self.transform_with_statistics(raw, request)
            .map(|(document, _)| document)
    }

    /// Build the output document and report what was kept and dropped
    pub fn transform_with_statistics(
        &self,
        raw: &RawListing,
        request: &ListingRequest,
    ) -> AppResult<(OutputDocument, TransformStatistics)> {
        let window = DateWindow::new(self.today, request.days, request.offset, self.reporter);
        let selected: HashSet<&str> = request
            .selected_channels
            .iter()
            .map(String::as_str)
            .collect();

        let mut document = OutputDocument::new(self.source.clone());
        let mut stats = TransformStatistics::default();

        for channel in raw.channel_nodes() {
            stats.channels_in_feed += 1;
            if channel.attr("id").is_some_and(|id| selected.contains(id)) {
                document.channels.push(channel.clone());
            }
        }
        stats.channels_kept = document.channels.len();

        if request.channels_only {
            info!(
                "Built channel list: {} of {} channels selected",
                stats.channels_kept, stats.channels_in_feed
            );
            return Ok((document, stats));
        }

        debug!(
            "Keeping programmes between {:?} and {:?}",
            window.first_day(),
            window.last_day()
        );

        let mut seen: HashSet<EntryIdentity> = HashSet::new();
        for node in raw.programme_nodes() {
            stats.programmes_in_feed += 1;
            let entry = ProgramEntry::from_element(node)?;

            if !window.contains(&entry.start, &entry.stop) {
                stats.outside_window += 1;
                continue;
            }

            if self.filter_programmes_by_channel && !selected.contains(entry.channel_id.as_str()) {
                stats.unselected_channel += 1;
                continue;
            }

            let identity = entry.identity();
            if seen.contains(&identity) {
                stats.duplicates += 1;
                debug!("Skipping duplicate programme {}", identity);
                continue;
            }
            seen.insert(identity);

            document.programmes.push(normalize_programme(node, self.reporter));
        }
        stats.programmes_kept = document.programmes.len();

        if stats.duplicates > 0 {
            info!(
                "Removed {} duplicate programme entries from TVClub feed",
                stats.duplicates
            );
        }
        info!(
            "Built listing: channels={}/{} programmes={}/{} outside_window={}",
            stats.channels_kept,
            stats.channels_in_feed,
            stats.programmes_kept,
            stats.programmes_in_feed,
            stats.outside_window
        );

        Ok((document, stats))
    }
}
