use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::apis::schema::ResponseSchemas;
use crate::apis::wire::{DetailResponse, PageResponse};
use crate::app::ports::{CatalogPort, HttpClientPort, HttpGetResult};
use crate::common::constants::{POKEAPI_BASE_URL, POKEMON_COLLECTION};
use crate::common::error::{CatalogError, Result};
use crate::domain::{CollectionItemSummary, ItemDetails, ItemRef};
use crate::observability::metrics;

const LIST_ITEMS: &str = "list_items";
const GET_ITEM_DETAILS: &str = "get_item_details";

/// Client for the external catalog service.
///
/// Base URL and collection are fixed when the client is built. Every call
/// issues exactly one GET; nothing is cached or retried. The client is cheap
/// to clone and safe to share across tasks.
#[derive(Clone)]
pub struct CatalogClient {
    http: Arc<dyn HttpClientPort>,
    base_url: Url,
    collection: String,
    schemas: Arc<ResponseSchemas>,
}

impl CatalogClient {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: &str, collection: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CatalogError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "base URL '{}' cannot carry path segments",
                base_url
            )));
        }
        if collection.is_empty() || collection.contains('/') {
            return Err(CatalogError::Config(format!(
                "collection '{}' must be a single path segment",
                collection
            )));
        }

        Ok(Self {
            http,
            base_url,
            collection: collection.to_string(),
            schemas: Arc::new(ResponseSchemas::compile()?),
        })
    }

    /// Client for the public PokeAPI `pokemon` collection.
    pub fn pokeapi(http: Arc<dyn HttpClientPort>) -> Result<Self> {
        Self::new(http, POKEAPI_BASE_URL, POKEMON_COLLECTION)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// `{base}/{collection}?limit={limit}&offset={offset}`
    pub fn list_url(&self, limit: u32, offset: u32) -> Result<Url> {
        let mut url = self.collection_url()?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    /// `{base}/{collection}/{idOrName}`
    pub fn detail_url(&self, item: &ItemRef) -> Result<Url> {
        if let ItemRef::Name(name) = item {
            if name.trim().is_empty() {
                return Err(CatalogError::InvalidReference(
                    "item name must not be blank".to_string(),
                ));
            }
        }
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| self.unusable_base())?
            .push(&item.as_segment());
        Ok(url)
    }

    fn collection_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| self.unusable_base())?
            .pop_if_empty()
            .push(&self.collection);
        Ok(url)
    }

    fn unusable_base(&self) -> CatalogError {
        CatalogError::Config(format!("base URL '{}' cannot carry path segments", self.base_url))
    }

    /// Issue the GET and hand back a success response.
    async fn fetch(&self, url: &Url) -> Result<HttpGetResult> {
        debug!(url = %url, "requesting catalog resource");
        let response = self.http.get(url.as_str()).await?;
        if !response.is_success() {
            return Err(CatalogError::RemoteFetch {
                status: response.status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        url: &Url,
        response: &HttpGetResult,
        check: impl FnOnce(&ResponseSchemas, &Value) -> std::result::Result<(), String>,
    ) -> Result<T> {
        let malformed = |reason: String| CatalogError::MalformedResponse {
            url: url.to_string(),
            reason,
        };

        let value: Value = serde_json::from_slice(&response.bytes).map_err(|e| {
            malformed(format!(
                "body is not valid JSON (content-type '{}'): {}",
                response.content_type, e
            ))
        })?;
        check(self.schemas.as_ref(), &value).map_err(&malformed)?;
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
    }

    async fn list_items_inner(&self, url: &Url) -> Result<(Vec<CollectionItemSummary>, usize)> {
        let response = self.fetch(url).await?;
        let page: PageResponse = self.decode(url, &response, ResponseSchemas::check_page)?;
        let items = page.results.into_iter().map(|entry| entry.into_summary()).collect();
        Ok((items, response.bytes.len()))
    }

    async fn get_item_details_inner(&self, url: &Url) -> Result<(ItemDetails, usize)> {
        let response = self.fetch(url).await?;
        let raw: DetailResponse = self.decode(url, &response, ResponseSchemas::check_detail)?;
        Ok((ItemDetails::from(raw), response.bytes.len()))
    }
}

fn record_outcome<T>(operation: &'static str, started: Instant, outcome: &Result<(T, usize)>) {
    let secs = started.elapsed().as_secs_f64();
    match outcome {
        Ok((_, bytes)) => metrics::catalog::request_success(operation, secs, *bytes),
        Err(e) => {
            warn!(operation, error = %e, kind = e.kind(), "catalog request failed");
            metrics::catalog::request_error(operation, e.kind(), secs);
        }
    }
}

#[async_trait]
impl CatalogPort for CatalogClient {
    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn list_items(&self, limit: u32, offset: u32) -> Result<Vec<CollectionItemSummary>> {
        let url = self.list_url(limit, offset)?;
        let started = Instant::now();
        let outcome = self.list_items_inner(&url).await;
        record_outcome(LIST_ITEMS, started, &outcome);

        let (items, _) = outcome?;
        info!("Fetched {} items from {}", items.len(), url);
        Ok(items)
    }

    #[instrument(skip(self, item), fields(collection = %self.collection, item = %item))]
    async fn get_item_details(&self, item: &ItemRef) -> Result<ItemDetails> {
        let url = self.detail_url(item)?;
        let started = Instant::now();
        let outcome = self.get_item_details_inner(&url).await;
        record_outcome(GET_ITEM_DETAILS, started, &outcome);

        let (details, _) = outcome?;
        info!(
            "Fetched details for {} (#{}, {} categories)",
            details.name,
            details.id,
            details.categories.len()
        );
        Ok(details)
    }
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("collection", &self.collection)
            .finish()
    }
}
