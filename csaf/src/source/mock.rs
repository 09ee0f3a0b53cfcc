use crate::model::{
    advisory::{AdvisoryDocument, Distribution, Document, Tlp, Tracking},
    metadata::ProviderMetadata,
    rolie::{AdvisoryFile, Collection, Service, ServiceDocument, Workspace},
    tlp::TlpLabel,
};
use crate::source::{Source, SourceError};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use url::Url;

/// A canned answer of the [`MockSource`].
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Status(StatusCode),
    Fatal,
}

impl<T: Clone> Reply<T> {
    fn get(reply: Option<&Self>) -> Result<T, SourceError> {
        match reply {
            Some(Self::Ok(value)) => Ok(value.clone()),
            Some(Self::Status(status)) => Err(SourceError::Status(*status)),
            Some(Self::Fatal) => Err(SourceError::Fatal(anyhow::anyhow!("source failed"))),
            None => Err(SourceError::Status(StatusCode::NOT_FOUND)),
        }
    }
}

/// An in-memory source, answering `404` for everything unknown.
#[derive(Default)]
pub struct MockSource {
    metadata: HashMap<Url, Reply<ProviderMetadata>>,
    feeds: HashMap<Url, Reply<Vec<AdvisoryFile>>>,
    advisories: HashMap<Url, Reply<AdvisoryDocument>>,
    services: HashMap<Url, Reply<ServiceDocument>>,
}

pub fn url(s: &str) -> Url {
    Url::parse(s).expect("test URL must parse")
}

/// Create a document, having a tracking ID matching the file name.
pub fn advisory(advisory_url: &Url, label: Option<TlpLabel>) -> AdvisoryDocument {
    let id = advisory_url
        .path_segments()
        .and_then(|mut s| s.next_back())
        .and_then(|name| name.strip_suffix(".json"))
        .unwrap_or_default()
        .to_string();

    AdvisoryDocument {
        document: Document {
            distribution: Some(Distribution {
                tlp: label.map(|label| Tlp { label }),
            }),
            tracking: Tracking { id },
        },
    }
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(mut self, at: &str, metadata: ProviderMetadata) -> Self {
        self.metadata.insert(url(at), Reply::Ok(metadata));
        self
    }

    pub fn feed<'a>(mut self, at: &str, files: impl IntoIterator<Item = &'a str>) -> Self {
        self.feeds.insert(
            url(at),
            Reply::Ok(files.into_iter().map(AdvisoryFile::new).collect()),
        );
        self
    }

    pub fn feed_reply(mut self, at: &str, reply: Reply<Vec<AdvisoryFile>>) -> Self {
        self.feeds.insert(url(at), reply);
        self
    }

    pub fn advisory(mut self, at: &str, label: Option<TlpLabel>) -> Self {
        let at = url(at);
        let document = advisory(&at, label);
        self.advisories.insert(at, Reply::Ok(document));
        self
    }

    pub fn advisory_reply(mut self, at: &str, reply: Reply<AdvisoryDocument>) -> Self {
        self.advisories.insert(url(at), reply);
        self
    }

    pub fn service<'a>(mut self, at: &str, hrefs: impl IntoIterator<Item = &'a str>) -> Self {
        let collection = hrefs
            .into_iter()
            .map(|href| Collection {
                title: String::new(),
                href: href.to_string(),
            })
            .collect();

        self.services.insert(
            url(at),
            Reply::Ok(ServiceDocument {
                service: Service {
                    workspace: vec![Workspace {
                        title: String::new(),
                        collection,
                    }],
                },
            }),
        );
        self
    }

    pub fn service_reply(mut self, at: &str, reply: Reply<ServiceDocument>) -> Self {
        self.services.insert(url(at), reply);
        self
    }
}

#[async_trait(?Send)]
impl Source for MockSource {
    async fn load_metadata(&self, url: &Url) -> Result<ProviderMetadata, SourceError> {
        Reply::get(self.metadata.get(url))
    }

    async fn load_feed(&self, url: &Url) -> Result<Vec<AdvisoryFile>, SourceError> {
        Reply::get(self.feeds.get(url))
    }

    async fn load_advisory(&self, url: &Url) -> Result<AdvisoryDocument, SourceError> {
        Reply::get(self.advisories.get(url))
    }

    async fn load_service_document(&self, url: &Url) -> Result<ServiceDocument, SourceError> {
        Reply::get(self.services.get(url))
    }
}
