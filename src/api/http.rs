//! HTTP implementation of `CatalogApi`

use super::types::{DetailResponse, ItemDetail, Listing, ListingResponse};
use super::{ApiError, CatalogApi, Result};
use crate::config::GallerySettings;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// REST client for a PokeAPI-shaped catalog
///
/// Every request carries the configured timeout; a request that exceeds it
/// fails with `ApiError::Timeout`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    placeholder_image: String,
}

impl HttpCatalog {
    /// Create a client for the listing endpoint at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` does not parse, or
    /// `ApiError::Request` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, placeholder_image: impl Into<String>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::from_reqwest(base_url, e))?;

        Ok(Self {
            client,
            base_url: parsed,
            placeholder_image: placeholder_image.into(),
        })
    }

    /// Create a client from gallery settings
    ///
    /// # Errors
    ///
    /// Same as [`HttpCatalog::new`].
    pub fn from_settings(settings: &GallerySettings) -> Result<Self> {
        Self::new(
            &settings.base_url,
            settings.request_timeout(),
            settings.placeholder_image.clone(),
        )
    }

    /// Base listing URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Listing URL for one window
    #[must_use]
    pub fn listing_url(&self, limit: usize, offset: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let url_str = url.to_string();
        tracing::debug!(url = %url_str, "catalog request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&url_str, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(&url_str, e))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn list(&self, limit: usize, offset: usize) -> Result<Listing> {
        let response: ListingResponse = self.get_json(self.listing_url(limit, offset)).await?;
        Ok(response.into())
    }

    async fn detail(&self, detail_ref: &str) -> Result<ItemDetail> {
        let url = Url::parse(detail_ref)
            .map_err(|e| ApiError::InvalidUrl(format!("{detail_ref}: {e}")))?;
        let response: DetailResponse = self.get_json(url).await?;
        Ok(response.into_detail(&self.placeholder_image))
    }
}
