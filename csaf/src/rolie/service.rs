//! Checking the ROLIE service document against the feeds of the provider metadata

use crate::error::Error;
use crate::model::metadata::Feed;
use crate::source::Source;
use url::Url;
use walker_common::{
    report::IssueSink,
    utils::{
        set::symmetric_difference,
        url::{base_url, resolve},
    },
};

/// The name of the service document, next to the provider metadata.
pub const SERVICE_DOCUMENT: &str = "service.json";

/// The differences between service document and provider metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceReconciliation {
    /// Feeds listed by the service document, but not by the provider metadata.
    pub nonexistent: Vec<Url>,
    /// Feeds listed by the provider metadata, but not by the service document.
    pub missing: Vec<Url>,
}

impl ServiceReconciliation {
    pub fn is_consistent(&self) -> bool {
        self.nonexistent.is_empty() && self.missing.is_empty()
    }
}

pub struct ServiceChecker<'a, S: Source> {
    source: &'a S,
    metadata_url: &'a Url,
    report: &'a dyn IssueSink,
}

impl<'a, S: Source> ServiceChecker<'a, S> {
    pub fn new(source: &'a S, metadata_url: &'a Url, report: &'a dyn IssueSink) -> Self {
        Self {
            source,
            metadata_url,
            report,
        }
    }

    /// Check that the service document lists exactly the feeds of the provider metadata.
    ///
    /// If the service document can't be loaded, this is reported and [`Error::Continue`] is
    /// returned.
    pub async fn check(&self, feeds: &[Vec<Feed>]) -> Result<ServiceReconciliation, Error> {
        let url = base_url(self.metadata_url)?.join(SERVICE_DOCUMENT)?;

        let document = match self.source.load_service_document(&url).await {
            Ok(document) => document,
            Err(err) if err.is_fatal() => return Err(Error::Source(err)),
            Err(err) => {
                match err.status() {
                    Some(status) => self
                        .report
                        .warn(format!("Fetching {url} failed. Status code {status}.")),
                    None => self
                        .report
                        .error(format!("Cannot load ROLIE service document {url}: {err}.")),
                }
                return Err(Error::Continue);
            }
        };

        let service_feeds = self.resolve_all(&url, document.feed_urls());
        let metadata_feeds = self.resolve_all(
            self.metadata_url,
            feeds.iter().flatten().filter_map(Feed::url),
        );

        let (nonexistent, missing) = symmetric_difference(service_feeds, metadata_feeds);

        if !nonexistent.is_empty() {
            self.report.error(format!(
                "The ROLIE service document contains nonexistent feed entries: {}.",
                join(&nonexistent)
            ));
        }
        if !missing.is_empty() {
            self.report.error(format!(
                "The ROLIE service document is missing feed entries: {}.",
                join(&missing)
            ));
        }

        Ok(ServiceReconciliation {
            nonexistent,
            missing,
        })
    }

    fn resolve_all<'i>(&self, base: &Url, urls: impl IntoIterator<Item = &'i str>) -> Vec<Url> {
        urls.into_iter()
            .filter_map(|url| match resolve(base, url) {
                Ok(url) => Some(url),
                Err(err) => {
                    self.report.error(format!("Invalid feed URL {url}: {err}."));
                    None
                }
            })
            .collect()
    }
}

fn join(urls: &[Url]) -> String {
    urls.iter()
        .map(Url::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
