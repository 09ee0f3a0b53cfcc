use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Data which can be extracted from a [`Response`].
#[async_trait(?Send)]
pub trait Data: Sized {
    async fn from_response(response: Response) -> Result<Self, reqwest::Error>;
}

/// String data
#[async_trait(?Send)]
impl Data for String {
    async fn from_response(response: Response) -> Result<Self, reqwest::Error> {
        response.error_for_status()?.text().await
    }
}

/// JSON based data.
#[derive(Clone, Debug)]
pub struct Json<D>(pub D)
where
    D: DeserializeOwned;

#[async_trait(?Send)]
impl<D> Data for Json<D>
where
    D: DeserializeOwned,
{
    async fn from_response(response: Response) -> Result<Self, reqwest::Error> {
        response.error_for_status()?.json().await.map(Self)
    }
}

impl<D: DeserializeOwned> Json<D> {
    #[inline]
    pub fn into_inner(self) -> D {
        self.0
    }
}
