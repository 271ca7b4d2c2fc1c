// Clients for external catalog services

pub mod catalog_client;
pub mod schema;
pub mod wire;

pub use catalog_client::CatalogClient;
