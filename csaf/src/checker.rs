//! Running all checks for a provider

use crate::error::Error;
use crate::report::Report;
use crate::rolie::{FeedChecker, service::ServiceChecker};
use crate::source::Source;
use url::Url;

/// Options for the [`Checker`]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CheckerOptions {
    /// The number of feeds, or advisories, to fetch in parallel.
    pub concurrency: usize,
}

impl CheckerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

pub struct Checker<S: Source> {
    source: S,
    options: CheckerOptions,
}

impl<S: Source> Checker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: Default::default(),
        }
    }

    pub fn with_options(mut self, options: CheckerOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the ROLIE feeds of a provider.
    ///
    /// Only an invalid metadata URL, or a fatal source error, fails the check. Everything else
    /// ends up in the report.
    pub async fn check(&self, metadata_url: &str) -> Result<Report, Error> {
        let metadata_url = Url::parse(metadata_url)?;
        let report = Report::new();

        self.check_into(&metadata_url, &report).await?;

        Ok(report)
    }

    async fn check_into(&self, metadata_url: &Url, report: &Report) -> Result<(), Error> {
        let sinks = report.sinks();

        let metadata = match self.source.load_metadata(metadata_url).await {
            Ok(metadata) => metadata,
            Err(err) if err.is_fatal() => return Err(Error::Source(err)),
            Err(err) => {
                sinks
                    .provider_metadata
                    .error(format!("Unable to load provider metadata {metadata_url}: {err}."));
                return Ok(());
            }
        };

        let feeds = metadata.rolie_feeds();
        if feeds.iter().all(Vec::is_empty) {
            sinks
                .feed
                .info("No ROLIE feeds found in the provider metadata.".into());
            return Ok(());
        }

        log::info!(
            "Checking {} ROLIE feeds",
            feeds.iter().map(Vec::len).sum::<usize>()
        );

        let outcome = FeedChecker::new(&self.source, metadata_url, sinks)
            .with_concurrency(self.options.concurrency)
            .check(&feeds)
            .await;
        skip_continue(outcome)?;

        let outcome = ServiceChecker::new(&self.source, metadata_url, sinks.service)
            .check(&feeds)
            .await;
        skip_continue(outcome)?;

        Ok(())
    }
}

/// Only keep fatal errors. The outcome itself is already part of the report.
fn skip_continue<T>(result: Result<T, Error>) -> Result<(), Error> {
    match result {
        Ok(_) | Err(Error::Continue) => Ok(()),
        Err(err) => Err(err),
    }
}
