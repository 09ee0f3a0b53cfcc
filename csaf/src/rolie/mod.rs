//! Checking ROLIE feeds
//!
//! The check runs in three phases:
//!
//! 1. Fetch the listings of all feeds
//! 2. Walk all advisories of each feed, checking their label against the label of the feed
//! 3. Ensure every label with advisories has at least one feed listing all of them
//!
//! Advisories are recorded by their actual label in an [`Inventory`], which is shared by all
//! feeds. Phase 3 compares each feed with the advisories of its label, found across all feeds.

pub mod service;

use crate::error::Error;
use crate::integrity::IntegrityWalker;
use crate::label::{Inventory, LabelChecker};
use crate::model::{metadata::Feed, rolie::AdvisoryFile, tlp::TlpLabel};
use crate::report::Sinks;
use crate::source::Source;
use futures::{StreamExt, stream};
use std::collections::{BTreeSet, HashSet};
use std::pin::pin;
use url::Url;
use walker_common::utils::{
    set::contains_all,
    url::{base_url, resolve},
};

/// The outcome of checking the feeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedCheckOutcome {
    /// All advisories, by their actual label.
    pub inventory: Inventory,
    /// Labels with at least one feed listing all advisories of that label.
    pub summarized: BTreeSet<TlpLabel>,
    /// If there was a feed with a label allowing public access.
    pub has_public_feed: bool,
}

/// A feed for which the listing could be fetched.
struct FetchedFeed<'f> {
    feed: &'f Feed,
    url: Url,
    files: Vec<AdvisoryFile>,
}

pub struct FeedChecker<'a, S: Source> {
    source: &'a S,
    metadata_url: &'a Url,
    sinks: Sinks<'a>,
    concurrency: usize,
}

impl<'a, S: Source> FeedChecker<'a, S> {
    /// Create a new checker, resolving feeds relative to the URL of the provider metadata.
    pub fn new(source: &'a S, metadata_url: &'a Url, sinks: Sinks<'a>) -> Self {
        Self {
            source,
            metadata_url,
            sinks,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Check all feeds of all feed collections.
    pub async fn check(&self, feeds: &[Vec<Feed>]) -> Result<FeedCheckOutcome, Error> {
        let fetched = self.fetch(feeds).await?;
        log::info!("Fetched {} ROLIE feeds", fetched.len());

        let inventory = self.check_labels(&fetched).await?;

        Ok(self.check_completeness(&fetched, inventory))
    }

    async fn fetch<'f>(&self, feeds: &'f [Vec<Feed>]) -> Result<Vec<FetchedFeed<'f>>, Error> {
        let mut candidates = vec![];

        for feed in feeds.iter().flatten() {
            let Some(url) = feed.url() else {
                continue;
            };

            let url = match resolve(self.metadata_url, url) {
                Ok(url) => url,
                Err(err) => {
                    self.sinks
                        .provider_metadata
                        .error(format!("Invalid URL {url} in feed: {err}."));
                    continue;
                }
            };

            if !self.source.check_tls(&url) {
                self.sinks
                    .feed
                    .warn(format!("Feed {url} is not retrieved using TLS."));
            }

            candidates.push((feed, url));
        }

        let results = stream::iter(candidates)
            .map(|(feed, url)| async move {
                let result = self.source.load_feed(&url).await;
                (feed, url, result)
            })
            .buffered(self.concurrency);

        let mut results = pin!(results);
        let mut fetched = vec![];

        while let Some((feed, url, result)) = results.next().await {
            match result {
                Ok(files) => fetched.push(FetchedFeed { feed, url, files }),
                Err(err) if err.is_fatal() => return Err(Error::Source(err)),
                Err(err) => {
                    self.sinks
                        .feed
                        .error(format!("Failed to load feed {url}: {err}."));
                }
            }
        }

        Ok(fetched)
    }

    async fn check_labels(&self, fetched: &[FetchedFeed<'_>]) -> Result<Inventory, Error> {
        let mut inventory = Inventory::new();

        for feed in fetched {
            let base = match base_url(&feed.url) {
                Ok(base) => base,
                Err(err) => {
                    self.sinks
                        .provider_metadata
                        .error(format!("Bad base path of feed {}: {err}.", feed.url));
                    continue;
                }
            };

            log::debug!("Checking labels of feed {}", feed.url);

            let mut checker = LabelChecker::new(feed.url.clone(), feed.feed.label(), self.sinks.feed);

            let result = IntegrityWalker::new(self.source, self.sinks.provider_metadata)
                .with_concurrency(self.concurrency)
                .walk(&feed.files, &base, |label, url| checker.check(label, url))
                .await;

            match result {
                Ok(()) => {}
                Err(err) if err.is_continue() => {}
                Err(err) => {
                    self.sinks
                        .provider_metadata
                        .error(format!("Checking feed {} failed: {err}.", feed.url));
                    return Err(err);
                }
            }

            inventory.merge(checker.into_inventory());
        }

        Ok(inventory)
    }

    fn check_completeness(
        &self,
        fetched: &[FetchedFeed<'_>],
        inventory: Inventory,
    ) -> FeedCheckOutcome {
        let mut summarized = BTreeSet::new();
        let mut has_public_feed = false;

        for feed in fetched {
            let label = feed.feed.label();
            has_public_feed |= label.is_public();

            let listed = feed
                .files
                .iter()
                .filter_map(|file| match resolve(&feed.url, &file.url) {
                    Ok(url) => Some(url),
                    Err(err) => {
                        // already reported when walking the feed
                        log::debug!("Skipping invalid URL {}: {err}", file.url);
                        None
                    }
                })
                .collect::<HashSet<_>>();

            if contains_all(inventory.get(label), &listed) {
                summarized.insert(label);
            }
        }

        if !has_public_feed {
            self.sinks.feed.error(
                "One ROLIE feed with a TLP:WHITE, TLP:GREEN or unlabeled tlp must exist, but none were found."
                    .into(),
            );
        }

        for label in TlpLabel::ALL {
            if !summarized.contains(&label) && inventory.len(label) > 0 {
                self.sinks.feed.warn(format!(
                    "ROLIE feed for TLP:{label} has no accessible listed feed covering all advisories."
                ));
            }
        }

        FeedCheckOutcome {
            inventory,
            summarized,
            has_public_feed,
        }
    }
}
