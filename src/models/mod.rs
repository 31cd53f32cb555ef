//! Domain models for TVClub listings
//!
//! The raw feed is kept as an [`XmlElement`] tree; the types here are typed
//! views over it ([`Channel`], [`ProgramEntry`]) plus the assembled
//! [`OutputDocument`] handed to the serializer.

use chrono::{DateTime, FixedOffset};
use std::fmt;

use crate::errors::{AppError, AppResult};
use crate::utils::datetime::parse_xmltv_datetime;
use crate::utils::xmltv_parser::{XmlElement, parse_document};

/// A channel advertised by the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub display_name: String,
}

impl Channel {
    /// Build a channel from a `<channel>` node.
    ///
    /// Returns `None` unless the node carries both an `id` attribute and a
    /// `display-name` child.
    pub fn from_element(element: &XmlElement) -> Option<Self> {
        let id = element.attr("id")?;
        let display_name = element.child_text("display-name")?;
        Some(Self {
            id: id.to_string(),
            display_name,
        })
    }
}

/// Channels available from the feed, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelCatalogue {
    channels: Vec<Channel>,
}

impl ChannelCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel; a later channel with the same id replaces the
    /// display name but keeps the original position.
    pub fn insert(&mut self, channel: Channel) {
        match self.channels.iter_mut().find(|c| c.id == channel.id) {
            Some(existing) => existing.display_name = channel.display_name,
            None => self.channels.push(channel),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.channels.iter().any(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl FromIterator<Channel> for ChannelCatalogue {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut catalogue = Self::new();
        for channel in iter {
            catalogue.insert(channel);
        }
        catalogue
    }
}

/// The fetched feed, parsed but otherwise untouched
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    root: XmlElement,
}

impl RawListing {
    /// Parse a feed body
    pub fn parse(content: &[u8]) -> AppResult<Self> {
        parse_document(content).map(Self::from_root)
    }

    pub fn from_root(root: XmlElement) -> Self {
        Self { root }
    }

    /// All `<channel>` nodes in document order
    pub fn channel_nodes(&self) -> Vec<&XmlElement> {
        self.root.descendants("channel")
    }

    /// All `<programme>` nodes in document order
    pub fn programme_nodes(&self) -> Vec<&XmlElement> {
        self.root.descendants("programme")
    }

    /// Channel catalogue: every channel with both an id and a display name
    pub fn channels(&self) -> ChannelCatalogue {
        self.channel_nodes()
            .into_iter()
            .filter_map(Channel::from_element)
            .collect()
    }
}

/// Typed view of a `<programme>` node
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramEntry {
    pub channel_id: String,
    pub start: DateTime<FixedOffset>,
    pub stop: DateTime<FixedOffset>,
    /// `start` attribute exactly as written in the feed
    pub start_text: String,
    /// `stop` attribute exactly as written in the feed
    pub stop_text: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ProgramEntry {
    /// Parse a `<programme>` node.
    ///
    /// Fails when the `start` or `stop` attribute is missing or not an XMLTV
    /// timestamp. Text fields are taken verbatim from the first matching child.
    pub fn from_element(element: &XmlElement) -> AppResult<Self> {
        let (start_text, start) = required_timestamp(element, "start")?;
        let (stop_text, stop) = required_timestamp(element, "stop")?;

        Ok(Self {
            channel_id: element.attr("channel").unwrap_or_default().to_string(),
            start,
            stop,
            start_text: start_text.to_string(),
            stop_text: stop_text.to_string(),
            title: element.child_text("title"),
            subtitle: element.child_text("sub-title"),
            description: element.child_text("desc"),
            category: element.child_text("category"),
        })
    }

    /// Deduplication key of this entry
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity::of(self)
    }
}

fn required_timestamp<'e>(
    element: &'e XmlElement,
    attribute: &str,
) -> AppResult<(&'e str, DateTime<FixedOffset>)> {
    let value = element.attr(attribute).ok_or_else(|| {
        AppError::parse(format!(
            "programme on channel '{}' has no {attribute} attribute",
            element.attr("channel").unwrap_or_default()
        ))
    })?;
    let parsed = parse_xmltv_datetime(value)
        .map_err(|e| AppError::parse(format!("invalid programme {attribute} time: {e}")))?;
    Ok((value, parsed))
}

/// Structured deduplication key: channel, start, stop and title
///
/// Fields are kept apart so that a `|` inside a title can never make two
/// different entries collide. Times are compared as written in the feed, so
/// `+0100` and `+01:00` are different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryIdentity {
    pub channel: String,
    pub start: String,
    pub stop: String,
    pub title: String,
}

impl EntryIdentity {
    pub fn of(entry: &ProgramEntry) -> Self {
        Self {
            channel: entry.channel_id.clone(),
            start: entry.start_text.clone(),
            stop: entry.stop_text.clone(),
            title: entry.title.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}", self.channel, self.start, self.stop, self.title)
    }
}

/// Metadata carried by the `<tv>` root of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub source_name: String,
    pub source_url: String,
    pub source_data_url: String,
    pub generator_name: Option<String>,
    pub generator_url: Option<String>,
}

impl SourceInfo {
    /// TVClub metadata for a feed fetched from `data_url`
    pub fn tvclub(data_url: impl Into<String>) -> Self {
        Self {
            source_name: "TVClub".to_string(),
            source_url: "http://forum.tvclub.fr/programmes-epg/index.php".to_string(),
            source_data_url: data_url.into(),
            generator_name: None,
            generator_url: None,
        }
    }

    pub fn with_generator(mut self, name: Option<String>, url: Option<String>) -> Self {
        self.generator_name = name;
        self.generator_url = url;
        self
    }

    /// Attributes of the `<tv>` element, in output order
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attributes = vec![
            ("source-info-name", self.source_name.as_str()),
            ("source-info-url", self.source_url.as_str()),
            ("source-data-url", self.source_data_url.as_str()),
        ];
        if let Some(name) = &self.generator_name {
            attributes.push(("generator-info-name", name.as_str()));
        }
        if let Some(url) = &self.generator_url {
            attributes.push(("generator-info-url", url.as_str()));
        }
        attributes
    }
}

/// The listings document produced by one run
///
/// Channels always precede programmes when serialized. Each programme node
/// is a fresh copy built by the transformer; the fetched tree is never
/// modified.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDocument {
    pub source: SourceInfo,
    pub channels: Vec<XmlElement>,
    pub programmes: Vec<XmlElement>,
}

impl OutputDocument {
    pub fn new(source: SourceInfo) -> Self {
        Self {
            source,
            channels: Vec::new(),
            programmes: Vec::new(),
        }
    }

    /// Identifiers of the channels in the document, in order
    pub fn channel_ids(&self) -> Vec<&str> {
        self.channels.iter().filter_map(|c| c.attr("id")).collect()
    }

    /// Build the `<tv>` root element
    pub fn to_element(&self) -> XmlElement {
        let mut root = XmlElement::new("tv");
        for (name, value) in self.source.attributes() {
            root.set_attr(name, value);
        }
        for channel in &self.channels {
            root.push_element(channel.clone());
        }
        for programme in &self.programmes {
            root.push_element(programme.clone());
        }
        root
    }
}
