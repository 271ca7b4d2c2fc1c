use async_trait::async_trait;

use crate::common::constants::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::common::error::Result;
use crate::domain::{CollectionItemSummary, ItemDetails, ItemRef};

// Outbound side: one GET, no retries.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Everything view code needs from the catalog.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn list_items(&self, limit: u32, offset: u32) -> Result<Vec<CollectionItemSummary>>;

    /// `list_items` with the default page window.
    async fn list_first_page(&self) -> Result<Vec<CollectionItemSummary>> {
        self.list_items(DEFAULT_LIMIT, DEFAULT_OFFSET).await
    }

    async fn get_item_details(&self, item: &ItemRef) -> Result<ItemDetails>;
}
