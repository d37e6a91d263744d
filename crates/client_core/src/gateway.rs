use std::sync::Arc;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Item, ItemId, ItemPatch, NewItem},
    protocol::{ListResponse, PageRequest, PagedResult},
};
use tracing::debug;
use url::Url;

use crate::{
    config::Settings,
    error::{ClientError, ClientResult},
    session::SessionStore,
};

const PRODUCTS_PATH: &str = "products";

/// Request/response access to the remote product collection.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn list(&self, page: u32, limit: u32) -> ClientResult<PagedResult<Item>>;
    /// Un-paginated listing; the whole collection as a single page.
    async fn list_all(&self) -> ClientResult<PagedResult<Item>>;
    async fn get_by_id(&self, id: &ItemId) -> ClientResult<Item>;
    async fn create(&self, item: &NewItem) -> ClientResult<Item>;
    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> ClientResult<Item>;
    async fn delete(&self, id: &ItemId) -> ClientResult<()>;
}

pub struct HttpCatalogGateway {
    http: Client,
    base: Url,
    session: Arc<dyn SessionStore>,
}

impl HttpCatalogGateway {
    pub fn new(base: Url, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http: Client::new(),
            base,
            session,
        }
    }

    pub fn from_settings(settings: &Settings, session: Arc<dyn SessionStore>) -> anyhow::Result<Self> {
        let base = settings.api_base()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self {
            http,
            base,
            session,
        })
    }

    fn collection_url(&self) -> ClientResult<Url> {
        self.base
            .join(PRODUCTS_PATH)
            .map_err(|e| ClientError::Unknown(anyhow!("invalid products endpoint: {e}")))
    }

    fn item_url(&self, id: &ItemId) -> ClientResult<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Unknown(anyhow!("api url cannot carry path segments")))?
            .push(id.as_str());
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "gateway: request");
        let builder = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        match self.session.credential() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = checked(builder.send().await?).await?;
        Ok(response.json().await?)
    }
}

async fn checked(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let err = ClientError::from_response(status.as_u16(), &body);
    debug!(status = status.as_u16(), %err, "gateway: non-success response");
    Err(err)
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn list(&self, page: u32, limit: u32) -> ClientResult<PagedResult<Item>> {
        let query = PageRequest::new(page, limit);
        let url = self.collection_url()?;
        let response: ListResponse = self
            .send_json(self.request(Method::GET, url).query(&query))
            .await?;
        Ok(response.into_paged())
    }

    async fn list_all(&self) -> ClientResult<PagedResult<Item>> {
        let url = self.collection_url()?;
        let response: ListResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.into_paged())
    }

    async fn get_by_id(&self, id: &ItemId) -> ClientResult<Item> {
        let url = self.item_url(id)?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn create(&self, item: &NewItem) -> ClientResult<Item> {
        let url = self.collection_url()?;
        self.send_json(self.request(Method::POST, url).json(item))
            .await
    }

    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> ClientResult<Item> {
        let url = self.item_url(id)?;
        self.send_json(self.request(Method::PUT, url).json(patch))
            .await
    }

    async fn delete(&self, id: &ItemId) -> ClientResult<()> {
        let url = self.item_url(id)?;
        checked(self.request(Method::DELETE, url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
