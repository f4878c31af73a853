use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates;

/// A star rating with a written review, attached to one listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "propertyId", default)]
    pub property_id: String,
    #[serde(rename = "propertyName", default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(rename = "reviewerName", default)]
    pub reviewer_name: String,
    #[serde(rename = "reviewerEmail", default)]
    pub reviewer_email: String,
    #[serde(rename = "rating", alias = "stars")]
    pub stars: u8,
    #[serde(default)]
    pub review: String,
    #[serde(rename = "reviewDate", alias = "createdAt", default, with = "dates")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Rating {
    /// Mean star count, `None` when there are no ratings
    pub fn average(ratings: &[Rating]) -> Option<f64> {
        if ratings.is_empty() {
            return None;
        }
        let total: u32 = ratings.iter().map(|rating| u32::from(rating.stars)).sum();
        Some(f64::from(total) / ratings.len() as f64)
    }
}

/// Payload for submitting a rating; the store assigns `id` and `created_at`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRating {
    #[serde(rename = "propertyId")]
    pub property_id: String,
    #[serde(rename = "reviewerName")]
    pub reviewer_name: String,
    #[serde(rename = "reviewerEmail")]
    pub reviewer_email: String,
    #[serde(rename = "rating")]
    pub stars: u8,
    pub review: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rating(stars: u8) -> Rating {
        Rating {
            id: format!("r{stars}"),
            property_id: "1".to_string(),
            property_name: None,
            reviewer_name: "Alice Johnson".to_string(),
            reviewer_email: "alice@example.com".to_string(),
            stars,
            review: "Nice".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn average_of_ratings() {
        assert_eq!(Rating::average(&[]), None);
        assert_eq!(Rating::average(&[rating(5), rating(4)]), Some(4.5));
    }

    #[test]
    fn deserializes_review_from_store() {
        let rating: Rating = serde_json::from_value(json!({
            "_id": "1",
            "reviewerName": "Alice Johnson",
            "rating": 5,
            "review": "Amazing property! Highly recommended.",
            "reviewDate": "2025-11-14"
        }))
        .unwrap();

        assert_eq!(rating.stars, 5);
        assert_eq!(rating.property_id, "");
        assert!(rating.created_at.is_some());
    }
}
