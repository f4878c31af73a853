use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::models::{ListingUpdate, NewListing, NewRating, PropertyListing, Rating};
use crate::query::SortKey;
use crate::store::traits::PropertyStore;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Property store reached over its REST API
#[derive(Clone)]
pub struct HttpPropertyStore {
    client: Client,
    base_url: Url,
}

impl HttpPropertyStore {
    /// Create a store client for `base_url` with the default timeout
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn from_config(config: &Config) -> StoreResult<Self> {
        Self::with_timeout(&config.store_url, config.timeout)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| StoreError::Config(format!("invalid store URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "store URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL with `segments` appended, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| StoreError::Config("store URL cannot carry a path".to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> StoreResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("{context}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), context, "Property store returned an error status");
            return Err(StoreError::Status {
                status: status.as_u16(),
                context,
            });
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> StoreResult<T> {
        let response = self.execute(request, context).await?;
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Network(format!("{context}: failed to read body: {e}")))?;

        debug!("Received {} bytes for {}", body.len(), context);

        serde_json::from_str(&body).map_err(|e| StoreError::Parse(format!("{context}: {e}")))
    }
}

/// Turn a 404 on a single-resource call into `NotFound`
fn not_found_as(id: &str) -> impl FnOnce(StoreError) -> StoreError + '_ {
    move |error| match error {
        StoreError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            StoreError::NotFound(id.to_string())
        }
        other => other,
    }
}

/// A blank id would address the collection route instead of one listing
fn require_id(id: &str) -> StoreResult<()> {
    if id.trim().is_empty() {
        return Err(StoreError::NotFound(id.to_string()));
    }
    Ok(())
}

#[async_trait]
impl PropertyStore for HttpPropertyStore {
    async fn list(
        &self,
        search: Option<&str>,
        sort: SortKey,
    ) -> StoreResult<Vec<PropertyListing>> {
        let url = self.endpoint(&["api", "properties"])?;
        let mut request = self.client.get(url.clone());
        if let Some(term) = search.filter(|term| !term.is_empty()) {
            request = request.query(&[("search", term)]);
        }
        if sort != SortKey::None {
            request = request.query(&[("sort", sort.as_str())]);
        }

        debug!(%url, ?search, %sort, "GET listings");
        let listings: Vec<PropertyListing> = self.fetch_json(request, "fetch properties").await?;
        info!("Fetched {} listings from {}", listings.len(), self.source_name());
        Ok(listings)
    }

    async fn featured(&self) -> StoreResult<Vec<PropertyListing>> {
        let url = self.endpoint(&["api", "properties", "featured"])?;
        debug!(%url, "GET featured listings");
        self.fetch_json(self.client.get(url), "fetch featured properties")
            .await
    }

    async fn get(&self, id: &str) -> StoreResult<PropertyListing> {
        require_id(id)?;
        let url = self.endpoint(&["api", "properties", id])?;
        debug!(%url, "GET listing");
        self.fetch_json(self.client.get(url), "fetch property")
            .await
            .map_err(not_found_as(id))
    }

    async fn by_owner(&self, email: &str) -> StoreResult<Vec<PropertyListing>> {
        let url = self.endpoint(&["api", "properties", "user", email])?;
        debug!(%url, "GET listings by owner");
        self.fetch_json(self.client.get(url), "fetch user properties")
            .await
    }

    async fn create(&self, listing: NewListing) -> StoreResult<PropertyListing> {
        let url = self.endpoint(&["api", "properties"])?;
        debug!(%url, name = %listing.name, "POST listing");
        let created: PropertyListing = self
            .fetch_json(self.client.post(url).json(&listing), "add property")
            .await?;
        info!("Created listing {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update(&self, id: &str, update: ListingUpdate) -> StoreResult<PropertyListing> {
        require_id(id)?;
        let url = self.endpoint(&["api", "properties", id])?;
        debug!(%url, "PUT listing");
        self.fetch_json(self.client.put(url).json(&update), "update property")
            .await
            .map_err(not_found_as(id))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        require_id(id)?;
        let url = self.endpoint(&["api", "properties", id])?;
        debug!(%url, "DELETE listing");
        self.execute(self.client.delete(url), "delete property")
            .await
            .map_err(not_found_as(id))?;
        info!("Deleted listing {}", id);
        Ok(())
    }

    async fn ratings_for_property(&self, property_id: &str) -> StoreResult<Vec<Rating>> {
        let url = self.endpoint(&["api", "ratings", "property", property_id])?;
        debug!(%url, "GET ratings for listing");
        self.fetch_json(self.client.get(url), "fetch ratings").await
    }

    async fn ratings_by_user(&self, email: &str) -> StoreResult<Vec<Rating>> {
        let url = self.endpoint(&["api", "ratings", "user", email])?;
        debug!(%url, "GET ratings by user");
        self.fetch_json(self.client.get(url), "fetch user ratings")
            .await
    }

    async fn add_rating(&self, rating: NewRating) -> StoreResult<Rating> {
        let url = self.endpoint(&["api", "ratings"])?;
        debug!(%url, property_id = %rating.property_id, "POST rating");
        self.fetch_json(self.client.post(url).json(&rating), "add rating")
            .await
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
