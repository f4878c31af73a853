pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod query;
pub mod store;
pub mod validation;

pub use catalog::{Catalog, ListingDetails};
pub use config::Config;
pub use error::{CatalogError, QueryError, StoreError, ValidationError};
pub use models::{Category, ListingUpdate, NewListing, NewRating, PropertyListing, Rating};
pub use query::{query, query_page, Page, QueryParams, SortKey};
pub use store::{HttpPropertyStore, MemoryPropertyStore, PropertyStore};
