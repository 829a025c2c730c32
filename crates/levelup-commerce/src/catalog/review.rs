//! Product reviews.

use crate::error::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Reviewer display name.
    #[serde(alias = "nombre")]
    pub name: String,
    /// Stars, 1 to 5.
    pub rating: u8,
    /// Review body.
    #[serde(alias = "texto", alias = "comment")]
    pub text: String,
    /// When the review was written.
    #[serde(alias = "date", alias = "fecha")]
    pub timestamp: DateTime<Utc>,
}

impl Review {
    /// Validate and build a review.
    pub fn new(
        name: &str,
        rating: u8,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        let name = name.trim();
        let text = text.trim();
        if name.is_empty() {
            return Err(CommerceError::InvalidReview("name is required".into()));
        }
        if text.is_empty() {
            return Err(CommerceError::InvalidReview("text is required".into()));
        }
        if !(1..=5).contains(&rating) {
            return Err(CommerceError::InvalidReview(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            rating,
            text: text.to_string(),
            timestamp,
        })
    }
}

/// Average rating of a set of reviews, if any.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(sum) / reviews.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_review_is_trimmed() {
        let review = Review::new("  Ana ", 5, " Excelente ", Utc::now()).unwrap();
        assert_eq!(review.name, "Ana");
        assert_eq!(review.text, "Excelente");
    }

    #[test]
    fn test_invalid_reviews() {
        let now = Utc::now();
        for (name, rating, text) in [("", 3, "ok"), ("Ana", 3, "  "), ("Ana", 0, "ok"), ("Ana", 6, "ok")] {
            let err = Review::new(name, rating, text, now).unwrap_err();
            assert_eq!(err.code(), "INVALID_REVIEW");
        }
    }

    #[test]
    fn test_average_rating() {
        let now = Utc::now();
        let reviews = vec![
            Review::new("A", 5, "x", now).unwrap(),
            Review::new("B", 4, "y", now).unwrap(),
        ];
        assert_eq!(average_rating(&reviews), Some(4.5));
        assert_eq!(average_rating(&[]), None);
    }
}
