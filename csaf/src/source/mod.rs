//! Sources

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::*;

use crate::model::{
    advisory::AdvisoryDocument, metadata::ProviderMetadata, rolie::AdvisoryFile,
    rolie::ServiceDocument,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;
use walker_common::fetcher;

/// Error when loading from a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Fetch error: {0}")]
    Fetch(fetcher::Error),
    #[error("Unexpected status code: {0}")]
    Status(StatusCode),
    /// Something the source can't recover from, aborting the whole run.
    #[error(transparent)]
    Fatal(anyhow::Error),
}

impl SourceError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// The status code, in case the request was answered with a non-successful status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Fetch(err) => err.status(),
            _ => None,
        }
    }
}

impl From<fetcher::Error> for SourceError {
    fn from(err: fetcher::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status),
            None => Self::Fetch(err),
        }
    }
}

/// A source of CSAF ROLIE information
#[async_trait(?Send)]
pub trait Source {
    async fn load_metadata(&self, url: &Url) -> Result<ProviderMetadata, SourceError>;

    /// Load the advisories listed by a ROLIE feed.
    async fn load_feed(&self, url: &Url) -> Result<Vec<AdvisoryFile>, SourceError>;

    async fn load_advisory(&self, url: &Url) -> Result<AdvisoryDocument, SourceError>;

    async fn load_service_document(&self, url: &Url) -> Result<ServiceDocument, SourceError>;

    /// Check if the URL would be retrieved using a TLS protected connection.
    fn check_tls(&self, url: &Url) -> bool {
        url.scheme() == "https"
    }
}
