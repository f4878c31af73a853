//! One entry point for every screen that shows listings.
//!
//! Fetches from a [`PropertyStore`] and shapes the result with the query
//! engine, so search and sort behave the same everywhere.

use crate::error::CatalogResult;
use crate::models::{ListingUpdate, NewListing, NewRating, PropertyListing, Rating};
use crate::query::{self, Page, QueryParams, SortKey};
use crate::store::PropertyStore;
use serde::Serialize;
use tracing::{debug, info};

/// A listing with everything its detail page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDetails {
    pub listing: PropertyListing,
    pub ratings: Vec<Rating>,
    pub average_stars: Option<f64>,
}

pub struct Catalog<S> {
    store: S,
}

impl<S: PropertyStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Browse page: the full collection, filtered, sorted and paged locally
    pub async fn browse(&self, params: &QueryParams) -> CatalogResult<Page> {
        let listings = self.store.list(None, SortKey::None).await?;
        let page = query::query_page(&listings, params);
        info!(
            "{} of {} listings match (sort: {}, showing {})",
            page.total,
            listings.len(),
            params.sort_key,
            page.items.len()
        );
        Ok(page)
    }

    /// Browse from the raw search box and sort dropdown values.
    ///
    /// An unrecognised sort key fails before anything is fetched.
    pub async fn browse_raw(
        &self,
        search: Option<&str>,
        sort: Option<&str>,
        offset: usize,
        limit: Option<usize>,
    ) -> CatalogResult<Page> {
        let params = QueryParams::from_raw(search, sort)?.page(offset, limit);
        self.browse(&params).await
    }

    pub async fn featured(&self) -> CatalogResult<Vec<PropertyListing>> {
        Ok(self.store.featured().await?)
    }

    pub async fn listing_details(&self, id: &str) -> CatalogResult<ListingDetails> {
        let listing = self.store.get(id).await?;
        let ratings = self.store.ratings_for_property(id).await?;
        let average_stars = Rating::average(&ratings);
        debug!("Listing {} has {} ratings", id, ratings.len());
        Ok(ListingDetails {
            listing,
            ratings,
            average_stars,
        })
    }

    /// An owner's listings, shaped with the same engine as the browse page
    pub async fn my_listings(&self, email: &str, params: &QueryParams) -> CatalogResult<Page> {
        let listings = self.store.by_owner(email).await?;
        Ok(query::query_page(&listings, params))
    }

    pub async fn my_ratings(&self, email: &str) -> CatalogResult<Vec<Rating>> {
        Ok(self.store.ratings_by_user(email).await?)
    }

    pub async fn add_listing(&self, listing: NewListing) -> CatalogResult<PropertyListing> {
        listing.validate()?;
        Ok(self.store.create(listing).await?)
    }

    pub async fn update_listing(
        &self,
        id: &str,
        update: ListingUpdate,
    ) -> CatalogResult<PropertyListing> {
        update.validate()?;
        Ok(self.store.update(id, update).await?)
    }

    pub async fn remove_listing(&self, id: &str) -> CatalogResult<()> {
        Ok(self.store.delete(id).await?)
    }

    pub async fn rate(&self, rating: NewRating) -> CatalogResult<Rating> {
        rating.validate()?;
        Ok(self.store.add_rating(rating).await?)
    }
}
