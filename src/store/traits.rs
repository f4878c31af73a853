use crate::error::StoreResult;
use crate::models::{ListingUpdate, NewListing, NewRating, PropertyListing, Rating};
use crate::query::SortKey;
use async_trait::async_trait;

/// Backing source of listings and ratings.
/// Implemented over HTTP for the real store and in memory for demos and tests.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All listings, optionally searched and sorted by the store itself
    async fn list(&self, search: Option<&str>, sort: SortKey) -> StoreResult<Vec<PropertyListing>>;

    /// Homepage subset
    async fn featured(&self) -> StoreResult<Vec<PropertyListing>>;

    async fn get(&self, id: &str) -> StoreResult<PropertyListing>;

    async fn by_owner(&self, email: &str) -> StoreResult<Vec<PropertyListing>>;

    async fn create(&self, listing: NewListing) -> StoreResult<PropertyListing>;

    async fn update(&self, id: &str, update: ListingUpdate) -> StoreResult<PropertyListing>;

    async fn delete(&self, id: &str) -> StoreResult<()>;

    async fn ratings_for_property(&self, property_id: &str) -> StoreResult<Vec<Rating>>;

    async fn ratings_by_user(&self, email: &str) -> StoreResult<Vec<Rating>>;

    async fn add_rating(&self, rating: NewRating) -> StoreResult<Rating>;

    /// Name of the backing store, for logs
    fn source_name(&self) -> &'static str;
}
