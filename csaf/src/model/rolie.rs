//! ROLIE feed and service documents

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RolieFeed {
    pub feed: Feed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub link: Vec<Link>,

    #[serde(default)]
    pub category: Vec<Category>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<OffsetDateTime>,

    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub scheme: String,

    pub term: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub link: Vec<Link>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<OffsetDateTime>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<OffsetDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Content {
    pub src: String,

    #[serde(rename = "type", default)]
    pub content_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,

    pub href: String,
}

/// An advisory, as referenced by a feed entry.
///
/// The URL is kept as found in the feed and still needs to be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvisoryFile {
    pub url: String,
}

impl AdvisoryFile {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Entry {
    /// Extract the advisory file of the entry.
    ///
    /// The advisory is the `self` link, falling back to the content source. Returns [`None`] if
    /// neither is present.
    pub fn advisory_file(&self) -> Option<AdvisoryFile> {
        self.link
            .iter()
            .find(|link| link.rel == "self")
            .map(|link| link.href.as_str())
            .or_else(|| self.content.as_ref().map(|content| content.src.as_str()))
            .map(AdvisoryFile::new)
    }
}

impl RolieFeed {
    /// All advisory files listed by the feed.
    ///
    /// Entries without a reference to an advisory are skipped.
    pub fn advisory_files(&self) -> Vec<AdvisoryFile> {
        self.feed
            .entry
            .iter()
            .filter_map(|entry| {
                let file = entry.advisory_file();
                if file.is_none() {
                    log::warn!("Feed entry '{}' has no advisory link", entry.id);
                }
                file
            })
            .collect()
    }
}

/// A ROLIE service document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceDocument {
    pub service: Service,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub workspace: Vec<Workspace>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub collection: Vec<Collection>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub title: String,
    pub href: String,
}

impl ServiceDocument {
    /// All feed references of all workspaces.
    pub fn feed_urls(&self) -> impl Iterator<Item = &str> {
        self.service
            .workspace
            .iter()
            .flat_map(|workspace| &workspace.collection)
            .map(|collection| collection.href.as_str())
    }
}
