mod dates;
mod rating;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use rating::{NewRating, Rating};

/// What kind of deal a listing is offered under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Rent,
    Sale,
    Commercial,
    Land,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Rent,
        Category::Sale,
        Category::Commercial,
        Category::Land,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Sale => "Sale",
            Category::Commercial => "Commercial",
            Category::Land => "Land",
        }
    }

    /// Rent is quoted per month, everything else as an absolute price
    pub fn is_recurring(&self) -> bool {
        matches!(self, Category::Rent)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A property listing as served by the property store.
///
/// `price` and `posted_at` are optional on the wire so that a malformed
/// record still deserializes; the query engine orders such records after
/// every record that has the value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyListing {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "propertyName", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "imageLink", alias = "imageUrl", default)]
    pub image_url: String,
    #[serde(rename = "userName", alias = "ownerName", default)]
    pub owner_name: String,
    #[serde(rename = "userEmail", alias = "ownerEmail", default)]
    pub owner_email: String,
    #[serde(rename = "userPhoto", default, skip_serializing_if = "Option::is_none")]
    pub owner_photo: Option<String>,
    #[serde(rename = "postedDate", alias = "postedAt", default, with = "dates")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl PropertyListing {
    /// Price usable for ordering: missing and NaN prices count as absent
    pub fn sortable_price(&self) -> Option<f64> {
        self.price.filter(|price| !price.is_nan())
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email.eq_ignore_ascii_case(email.trim())
    }

    /// Apply a partial update in place; `id` and `posted_at` never change
    pub fn apply(&mut self, update: ListingUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = Some(price);
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
    }
}

/// Payload for creating a listing; the store assigns `id` and `posted_at`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListing {
    #[serde(rename = "propertyName")]
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub location: String,
    #[serde(rename = "imageLink")]
    pub image_url: String,
    #[serde(rename = "userName")]
    pub owner_name: String,
    #[serde(rename = "userEmail")]
    pub owner_email: String,
}

/// Partial update; only the fields that are set are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingUpdate {
    #[serde(rename = "propertyName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "imageLink", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ListingUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ListingUpdate::default()
    }
}
