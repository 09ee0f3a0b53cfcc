use crate::model::advisory::AdvisoryDocument;
use crate::model::metadata::ProviderMetadata;
use crate::model::rolie::{AdvisoryFile, RolieFeed, ServiceDocument};
use crate::source::{Source, SourceError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;
use walker_common::fetcher::{Fetcher, FetcherOptions, Json};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpOptions {
    /// Accept plain HTTP URLs, without considering them a TLS problem.
    pub insecure: bool,
}

impl HttpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}

#[derive(Clone)]
pub struct HttpSource {
    pub fetcher: Fetcher,
    pub options: HttpOptions,
}

impl HttpSource {
    pub fn new(fetcher: Fetcher, options: HttpOptions) -> Self {
        Self { fetcher, options }
    }

    /// Create a new source, including its own fetcher.
    pub async fn with_options(
        fetcher: FetcherOptions,
        options: HttpOptions,
    ) -> Result<Self, SourceError> {
        let fetcher = Fetcher::new(fetcher).await.map_err(SourceError::Fatal)?;
        Ok(Self::new(fetcher, options))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SourceError> {
        Ok(self.fetcher.fetch::<Json<T>>(url.clone()).await?.into_inner())
    }
}

#[async_trait(?Send)]
impl Source for HttpSource {
    async fn load_metadata(&self, url: &Url) -> Result<ProviderMetadata, SourceError> {
        self.fetch_json(url).await
    }

    async fn load_feed(&self, url: &Url) -> Result<Vec<AdvisoryFile>, SourceError> {
        let feed: RolieFeed = self.fetch_json(url).await?;
        let files = feed.advisory_files();

        log::debug!("Feed {url} lists {} advisories", files.len());

        Ok(files)
    }

    async fn load_advisory(&self, url: &Url) -> Result<AdvisoryDocument, SourceError> {
        self.fetch_json(url).await
    }

    async fn load_service_document(&self, url: &Url) -> Result<ServiceDocument, SourceError> {
        self.fetch_json(url).await
    }

    fn check_tls(&self, url: &Url) -> bool {
        self.options.insecure || url.scheme() == "https"
    }
}
