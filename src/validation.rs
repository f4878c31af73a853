//! Checks run on listing and rating submissions before they reach the store.

use crate::error::ValidationError;
use crate::models::{ListingUpdate, NewListing, NewRating};

const MIN_STARS: u8 = 1;
const MAX_STARS: u8 = 5;

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

fn valid_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

impl NewListing {
    /// Every field is required and the price must be a finite, non-negative number
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "property name")?;
        required(&self.description, "description")?;
        valid_price(self.price)?;
        required(&self.location, "location")?;
        required(&self.image_url, "image link")?;
        required(&self.owner_email, "owner email")?;
        Ok(())
    }
}

impl ListingUpdate {
    /// Same rules as [`NewListing::validate`], for the fields that are set
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            required(name, "property name")?;
        }
        if let Some(description) = &self.description {
            required(description, "description")?;
        }
        if let Some(price) = self.price {
            valid_price(price)?;
        }
        if let Some(location) = &self.location {
            required(location, "location")?;
        }
        if let Some(image_url) = &self.image_url {
            required(image_url, "image link")?;
        }
        Ok(())
    }
}

impl NewRating {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.property_id, "property id")?;
        required(&self.reviewer_email, "reviewer email")?;
        if !(MIN_STARS..=MAX_STARS).contains(&self.stars) {
            return Err(ValidationError::StarsOutOfRange(self.stars));
        }
        required(&self.review, "review")?;
        Ok(())
    }
}
