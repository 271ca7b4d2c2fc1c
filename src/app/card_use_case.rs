use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

use crate::app::ports::CatalogPort;
use crate::common::error::{CatalogError, Result};
use crate::domain::{CollectionItemSummary, ItemCard, ItemRef};
use crate::observability::metrics;

/// Assembles detail cards the way a listing page does: one page fetch, then
/// one detail fetch per entry, then category mapping.
pub struct CardUseCase {
    catalog: Arc<dyn CatalogPort>,
    concurrency: usize,
}

impl CardUseCase {
    /// `concurrency` caps in-flight detail requests; zero is treated as one.
    pub fn new(catalog: Arc<dyn CatalogPort>, concurrency: usize) -> Self {
        Self {
            catalog,
            concurrency: concurrency.max(1),
        }
    }

    #[instrument(skip(self))]
    pub async fn build_card(&self, item: &ItemRef) -> Result<ItemCard> {
        let details = self.catalog.get_item_details(item).await?;
        metrics::cards::built(1);
        Ok(ItemCard::from_details(details))
    }

    /// Cards for one collection page, in page order. The first failure
    /// cancels the remaining detail fetches and is returned.
    #[instrument(skip(self))]
    pub async fn build_page(&self, limit: u32, offset: u32) -> Result<Vec<ItemCard>> {
        let summaries = self.catalog.list_items(limit, offset).await?;
        let total = summaries.len();
        debug!("Fetching details for {} items (concurrency {})", total, self.concurrency);

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, summary) in summaries.iter().enumerate() {
            let catalog = Arc::clone(&self.catalog);
            let semaphore = Arc::clone(&semaphore);
            let item = detail_ref(summary);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| CatalogError::Transport(format!("detail limiter closed: {}", e)))?;
                let details = catalog.get_item_details(&item).await?;
                Ok::<_, CatalogError>((index, ItemCard::from_details(details)))
            });
        }

        let mut slots: Vec<Option<ItemCard>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, card) = match joined {
                Ok(result) => result?,
                Err(e) => {
                    return Err(CatalogError::Transport(format!("detail task failed: {}", e)));
                }
            };
            slots[index] = Some(card);
        }

        let cards: Vec<ItemCard> = slots.into_iter().flatten().collect();
        metrics::cards::built(cards.len());
        info!("Built {} cards", cards.len());
        Ok(cards)
    }
}

/// Prefer the numeric id for the follow-up fetch; fall back to the name.
fn detail_ref(summary: &CollectionItemSummary) -> ItemRef {
    match summary.id {
        Some(id) => ItemRef::Id(id),
        None => ItemRef::Name(summary.name.clone()),
    }
}
