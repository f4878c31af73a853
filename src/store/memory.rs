use crate::error::{StoreError, StoreResult};
use crate::models::{Category, ListingUpdate, NewListing, NewRating, PropertyListing, Rating};
use crate::query::{self, QueryParams, SortKey};
use crate::store::traits::PropertyStore;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

const FEATURED_COUNT: usize = 5;

#[derive(Debug, Default)]
struct Inner {
    listings: Vec<PropertyListing>,
    ratings: Vec<Rating>,
    next_id: u64,
}

impl Inner {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// Property store held in memory.
///
/// `list` runs the shared query engine, so this store doubles as the
/// reference behaviour for server-side search and sort.
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    inner: RwLock<Inner>,
}

impl MemoryPropertyStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the sample catalogue
    pub fn with_sample_data() -> Self {
        Self::with_records(sample_listings(), sample_ratings())
    }

    pub fn with_records(listings: Vec<PropertyListing>, ratings: Vec<Rating>) -> Self {
        // Fresh ids continue past any numeric id already present
        let next_id = listings
            .iter()
            .map(|listing| listing.id.as_str())
            .chain(ratings.iter().map(|rating| rating.id.as_str()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            inner: RwLock::new(Inner {
                listings,
                ratings,
                next_id,
            }),
        }
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn list(&self, search: Option<&str>, sort: SortKey) -> StoreResult<Vec<PropertyListing>> {
        let inner = self.inner.read().await;
        let params = QueryParams {
            search_term: search.map(str::to_string),
            sort_key: sort,
            ..QueryParams::default()
        };
        Ok(query::query(&inner.listings, &params))
    }

    async fn featured(&self) -> StoreResult<Vec<PropertyListing>> {
        let inner = self.inner.read().await;
        let params = QueryParams::new()
            .sort(SortKey::DateDesc)
            .page(0, Some(FEATURED_COUNT));
        Ok(query::query(&inner.listings, &params))
    }

    async fn get(&self, id: &str) -> StoreResult<PropertyListing> {
        let inner = self.inner.read().await;
        inner
            .listings
            .iter()
            .find(|listing| listing.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn by_owner(&self, email: &str) -> StoreResult<Vec<PropertyListing>> {
        let inner = self.inner.read().await;
        Ok(inner
            .listings
            .iter()
            .filter(|listing| listing.is_owned_by(email))
            .cloned()
            .collect())
    }

    async fn create(&self, listing: NewListing) -> StoreResult<PropertyListing> {
        let mut inner = self.inner.write().await;
        let created = PropertyListing {
            id: inner.next_id(),
            name: listing.name,
            description: listing.description,
            category: listing.category,
            price: Some(listing.price),
            location: listing.location,
            image_url: listing.image_url,
            owner_name: listing.owner_name,
            owner_email: listing.owner_email,
            owner_photo: None,
            posted_at: Some(Utc::now()),
        };
        info!("Created listing {} ({})", created.id, created.name);
        inner.listings.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, update: ListingUpdate) -> StoreResult<PropertyListing> {
        let mut inner = self.inner.write().await;
        let listing = inner
            .listings
            .iter_mut()
            .find(|listing| listing.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        listing.apply(update);
        debug!("Updated listing {}", id);
        Ok(listing.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.listings.len();
        inner.listings.retain(|listing| listing.id != id);
        if inner.listings.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        inner.ratings.retain(|rating| rating.property_id != id);
        info!("Deleted listing {}", id);
        Ok(())
    }

    async fn ratings_for_property(&self, property_id: &str) -> StoreResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        Ok(inner
            .ratings
            .iter()
            .filter(|rating| rating.property_id == property_id)
            .cloned()
            .collect())
    }

    async fn ratings_by_user(&self, email: &str) -> StoreResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        Ok(inner
            .ratings
            .iter()
            .filter(|rating| rating.reviewer_email.eq_ignore_ascii_case(email.trim()))
            .cloned()
            .collect())
    }

    async fn add_rating(&self, rating: NewRating) -> StoreResult<Rating> {
        let mut inner = self.inner.write().await;
        let property_name = inner
            .listings
            .iter()
            .find(|listing| listing.id == rating.property_id)
            .map(|listing| listing.name.clone())
            .ok_or_else(|| StoreError::NotFound(rating.property_id.clone()))?;

        let created = Rating {
            id: inner.next_id(),
            property_id: rating.property_id,
            property_name: Some(property_name),
            reviewer_name: rating.reviewer_name,
            reviewer_email: rating.reviewer_email,
            stars: rating.stars,
            review: rating.review,
            created_at: Some(Utc::now()),
        };
        info!("Added {}-star rating to listing {}", created.stars, created.property_id);
        inner.ratings.push(created.clone());
        Ok(created)
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}

fn day(year: i32, month: u32, date: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0).single()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    category: Category,
    description: &str,
    location: &str,
    price: f64,
    image: &str,
    owner: (&str, &str),
    posted: (i32, u32, u32),
) -> PropertyListing {
    PropertyListing {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        price: Some(price),
        location: location.to_string(),
        image_url: format!("https://images.unsplash.com/{image}?w=600"),
        owner_name: owner.0.to_string(),
        owner_email: owner.1.to_string(),
        owner_photo: None,
        posted_at: day(posted.0, posted.1, posted.2),
    }
}

/// Sample catalogue used by the demo store
pub fn sample_listings() -> Vec<PropertyListing> {
    vec![
        sample(
            "1",
            "Modern Villa",
            Category::Sale,
            "Stunning modern villa",
            "Beverly Hills, CA",
            2_500_000.0,
            "photo-1613490493576-7fde63acd811",
            ("John Doe", "john@example.com"),
            (2025, 1, 15),
        ),
        sample(
            "2",
            "Downtown Apartment",
            Category::Rent,
            "Luxury apartment",
            "New York, NY",
            4_500.0,
            "photo-1522708323590-d24dbb6b0267",
            ("John Doe", "john@example.com"),
            (2025, 2, 1),
        ),
        sample(
            "3",
            "Beach House",
            Category::Sale,
            "Beachfront property",
            "Malibu, CA",
            3_200_000.0,
            "photo-1499793983690-e29da59ef1c2",
            ("Mike Johnson", "mike@example.com"),
            (2025, 1, 20),
        ),
        sample(
            "4",
            "Commercial Space",
            Category::Commercial,
            "Prime location",
            "Los Angeles, CA",
            8_000.0,
            "photo-1497366216548-37526070297c",
            ("Sarah Williams", "sarah@example.com"),
            (2025, 1, 25),
        ),
        sample(
            "5",
            "Mountain Cabin",
            Category::Rent,
            "Cozy retreat",
            "Aspen, CO",
            3_000.0,
            "photo-1542718610-a1d656d1884c",
            ("David Brown", "david@example.com"),
            (2025, 2, 5),
        ),
        sample(
            "6",
            "Urban Loft",
            Category::Sale,
            "Industrial style",
            "Chicago, IL",
            850_000.0,
            "photo-1502672260066-6bc36a05d0d6",
            ("Emily Davis", "emily@example.com"),
            (2025, 1, 30),
        ),
        sample(
            "7",
            "Suburban House",
            Category::Sale,
            "Family home",
            "Austin, TX",
            650_000.0,
            "photo-1605276374104-dee2a0ed3cd6",
            ("Robert Wilson", "robert@example.com"),
            (2025, 2, 10),
        ),
        sample(
            "8",
            "Penthouse Suite",
            Category::Rent,
            "Luxury living",
            "Miami, FL",
            12_000.0,
            "photo-1512917774080-9991f1c4c750",
            ("Lisa Anderson", "lisa@example.com"),
            (2025, 2, 8),
        ),
    ]
}

/// Sample reviews for the sample catalogue
pub fn sample_ratings() -> Vec<Rating> {
    vec![
        review(
            "101",
            ("1", "Modern Villa"),
            ("Alice Johnson", "alice@example.com"),
            5,
            "Amazing property! Highly recommended.",
            (2025, 2, 14),
        ),
        review(
            "102",
            ("1", "Modern Villa"),
            ("Bob Smith", "bob@example.com"),
            4,
            "Great location and beautiful home.",
            (2025, 2, 13),
        ),
        review(
            "103",
            ("2", "Downtown Apartment"),
            ("Alice Johnson", "alice@example.com"),
            4,
            "Great location.",
            (2025, 2, 20),
        ),
    ]
}

fn review(
    id: &str,
    property: (&str, &str),
    reviewer: (&str, &str),
    stars: u8,
    text: &str,
    date: (i32, u32, u32),
) -> Rating {
    Rating {
        id: id.to_string(),
        property_id: property.0.to_string(),
        property_name: Some(property.1.to_string()),
        reviewer_name: reviewer.0.to_string(),
        reviewer_email: reviewer.1.to_string(),
        stars,
        review: text.to_string(),
        created_at: day(date.0, date.1, date.2),
    }
}
