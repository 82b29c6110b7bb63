use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use hawkersg_core::MenuItem;

use crate::error::CatalogError;
use crate::types::parse_menu_items;

/// Both raw catalog arrays, exactly as the backend returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalog {
    pub hawkers: Vec<Value>,
    pub stalls: Vec<Value>,
}

/// HTTP client for the HawkerSG backend's public catalog endpoints.
///
/// All endpoints are unauthenticated JSON GETs returning a bare array.
/// Non-2xx responses are [`CatalogError::UnexpectedStatus`]; a body that is
/// not a JSON array is [`CatalogError::Deserialize`]. Nothing is retried:
/// a failed load is reported to the caller, which keeps its previous data.
#[derive(Debug, Clone)]
pub struct HawkerApiClient {
    client: Client,
    base_url: Url,
}

impl HawkerApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8001`
    /// or `https://api.example.sg/v1`).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   URL that paths can be appended to.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// `GET /hawkers`.
    ///
    /// # Errors
    ///
    /// See [`HawkerApiClient`].
    pub async fn fetch_hawkers(&self) -> Result<Vec<Value>, CatalogError> {
        let url = self.endpoint(&["hawkers"])?;
        self.get_array(url, "hawker centres").await
    }

    /// `GET /stalls`.
    ///
    /// # Errors
    ///
    /// See [`HawkerApiClient`].
    pub async fn fetch_stalls(&self) -> Result<Vec<Value>, CatalogError> {
        let url = self.endpoint(&["stalls"])?;
        self.get_array(url, "stalls").await
    }

    /// Fetches `/hawkers` and `/stalls` concurrently. Fails if either fails;
    /// a partial catalog is never returned.
    ///
    /// # Errors
    ///
    /// The first error from either request.
    pub async fn fetch_raw_catalog(&self) -> Result<RawCatalog, CatalogError> {
        let (hawkers, stalls) = tokio::try_join!(self.fetch_hawkers(), self.fetch_stalls())?;
        tracing::debug!(
            hawkers = hawkers.len(),
            stalls = stalls.len(),
            "fetched raw catalog"
        );
        Ok(RawCatalog { hawkers, stalls })
    }

    /// `GET /business/{license_number}/menu-items`, parsed into menu items.
    /// Prices that do not parse as decimals become `None`.
    ///
    /// # Errors
    ///
    /// See [`HawkerApiClient`].
    pub async fn fetch_menu(&self, license_number: &str) -> Result<Vec<MenuItem>, CatalogError> {
        let url = self.endpoint(&["business", license_number, "menu-items"])?;
        let items = self
            .get_array(url, &format!("menu items for {license_number}"))
            .await?;
        Ok(parse_menu_items(&items))
    }

    /// Appends path segments to the base URL. Segments are percent-encoded,
    /// so a license number containing `/` stays one segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_array(&self, url: Url, context: &str) -> Result<Vec<Value>, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<Value>>(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
