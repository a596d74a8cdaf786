//! Reviews
//!
//! Product reviews shown on a product page, with live delivery of new reviews to subscribers.

use std::sync::mpsc::{Receiver, Sender, channel};

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    products::ProductId,
    storage::{CartStorage, StorageError},
};

/// Lowest and highest accepted star ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Slot reviews are persisted under.
pub const REVIEWS_SLOT: &str = "reviews";

/// Review Errors
#[derive(Debug, Error)]
pub enum ReviewsError {
    /// Ratings are whole stars from one to five.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// A required text field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Reviews could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// New Review Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    /// Product being reviewed
    pub product_id: ProductId,

    /// Display name of the reviewer
    pub author: String,

    /// Whole stars, see [`RATING_RANGE`]
    pub rating: u8,

    /// Review text
    pub comment: String,
}

/// Review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Product being reviewed
    pub product_id: ProductId,

    /// Display name of the reviewer, trimmed
    pub author: String,

    /// Whole stars, see [`RATING_RANGE`]
    pub rating: u8,

    /// Review text, trimmed
    pub comment: String,

    /// When the review was accepted
    pub created_at: Timestamp,
}

/// Review Source
pub trait ReviewSource {
    /// Validate and store a review, notifying subscribers of its product.
    ///
    /// # Errors
    ///
    /// Returns a [`ReviewsError`] if the rating is out of range or a field is blank.
    fn add_review(&mut self, review: NewReview) -> Result<Review, ReviewsError>;

    /// Reviews for a product, oldest first.
    fn list_reviews(&self, product: &ProductId) -> Vec<Review>;

    /// Receive every review added to `product` from now on.
    fn subscribe(&mut self, product: &ProductId) -> Receiver<Review>;
}

/// In-memory review source.
#[derive(Debug, Default)]
pub struct InMemoryReviews {
    reviews: FxHashMap<ProductId, Vec<Review>>,
    subscribers: FxHashMap<ProductId, Vec<Sender<Review>>>,
}

impl InMemoryReviews {
    /// Create an empty review source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the reviews persisted under `slot`.
    ///
    /// A value that cannot be decoded is logged and treated as no reviews.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewsError::Storage`] if the slot cannot be read.
    pub fn load(storage: &impl CartStorage, slot: &str) -> Result<Self, ReviewsError> {
        let mut reviews = Self::new();

        let Some(blob) = storage.read(slot)? else {
            return Ok(reviews);
        };

        let stored: Vec<Review> = match serde_json::from_str(&blob) {
            Ok(stored) => stored,
            Err(error) => {
                warn!(slot, %error, "stored reviews are unreadable; starting empty");

                return Ok(reviews);
            }
        };

        for review in stored {
            reviews
                .reviews
                .entry(review.product_id.clone())
                .or_default()
                .push(review);
        }

        Ok(reviews)
    }

    /// Write every review to `slot`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewsError::Storage`] if the reviews cannot be encoded or written.
    pub fn save(&self, storage: &mut impl CartStorage, slot: &str) -> Result<(), ReviewsError> {
        let mut all: Vec<&Review> = self.reviews.values().flatten().collect();

        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });

        let blob = serde_json::to_string(&all).map_err(StorageError::from)?;

        storage.write(slot, &blob)?;

        debug!(slot, reviews = all.len(), "persisted reviews");

        Ok(())
    }
}

impl ReviewSource for InMemoryReviews {
    fn add_review(&mut self, review: NewReview) -> Result<Review, ReviewsError> {
        if !RATING_RANGE.contains(&review.rating) {
            return Err(ReviewsError::InvalidRating(review.rating));
        }

        if review.author.trim().is_empty() {
            return Err(ReviewsError::MissingField("author"));
        }

        if review.comment.trim().is_empty() {
            return Err(ReviewsError::MissingField("comment"));
        }

        let review = Review {
            product_id: review.product_id,
            author: review.author.trim().to_string(),
            rating: review.rating,
            comment: review.comment.trim().to_string(),
            created_at: Timestamp::now(),
        };

        self.reviews
            .entry(review.product_id.clone())
            .or_default()
            .push(review.clone());

        if let Some(subscribers) = self.subscribers.get_mut(&review.product_id) {
            // Receivers that were dropped are pruned on the next delivery.
            subscribers.retain(|subscriber| subscriber.send(review.clone()).is_ok());

            debug!(
                product = %review.product_id,
                subscribers = subscribers.len(),
                "delivered review"
            );
        }

        Ok(review)
    }

    fn list_reviews(&self, product: &ProductId) -> Vec<Review> {
        self.reviews.get(product).cloned().unwrap_or_default()
    }

    fn subscribe(&mut self, product: &ProductId) -> Receiver<Review> {
        let (sender, receiver) = channel();

        self.subscribers
            .entry(product.clone())
            .or_default()
            .push(sender);

        receiver
    }
}

/// Mean star rating rounded to one decimal place, or `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<Decimal> {
    if reviews.is_empty() {
        return None;
    }

    let sum: Decimal = reviews
        .iter()
        .map(|review| Decimal::from(review.rating))
        .sum();

    let count = Decimal::from(reviews.len());

    Some((sum / count).round_dp(1))
}
