pub mod apis;
pub mod app;
pub mod common;
pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod observability;

pub use apis::CatalogClient;
pub use app::card_use_case::CardUseCase;
pub use app::ports::{CatalogPort, HttpClientPort, HttpGetResult};
pub use common::error::{CatalogError, Result};
pub use domain::{
    map_category, CategoryVariant, CollectionItemSummary, ItemCard, ItemDetails, ItemRef,
};
pub use infra::ReqwestHttp;
