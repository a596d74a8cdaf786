//! Command Context

use atelier::prelude::*;
use rusty_money::iso::Currency;
use tracing::debug;

use crate::{config::storage::StorageConfig, errors::AppError};

/// Catalog, cart store, reviews and display currency shared by every command.
#[derive(Debug)]
pub struct AppContext {
    /// Product catalog
    pub catalog: FixtureCatalog,

    /// Cart persisted under the data directory
    pub store: CartStore<FileStorage>,

    /// Product reviews persisted under the data directory
    pub reviews: InMemoryReviews,

    review_storage: FileStorage,

    /// Currency for prices and totals
    pub currency: &'static Currency,
}

impl AppContext {
    /// Load the catalog and open the cart store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid or the stored cart or reviews cannot be read.
    pub fn from_config(config: &StorageConfig) -> Result<Self, AppError> {
        let catalog = match &config.catalog {
            Some(path) => FixtureCatalog::from_path(path)?,
            None => FixtureCatalog::bundled()?,
        };

        debug!(products = catalog.len(), "catalog loaded");

        let storage = FileStorage::new(&config.data_dir);
        let reviews = InMemoryReviews::load(&storage, REVIEWS_SLOT)?;
        let store = CartStore::open(storage.clone())?;

        Ok(Self {
            catalog,
            store,
            reviews,
            review_storage: storage,
            currency: config.currency.currency(),
        })
    }

    /// Look up a product, treating a missing id as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownProduct`] if no product has this id.
    pub fn product(&self, id: &ProductId) -> Result<Product, AppError> {
        self.catalog
            .get_by_id(id)?
            .ok_or_else(|| AppError::UnknownProduct(id.clone()))
    }

    /// Record a review for a catalog product and persist every review.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown, the review is invalid or the reviews
    /// cannot be written.
    pub fn add_review(&mut self, review: NewReview) -> Result<Review, AppError> {
        self.product(&review.product_id)?;

        let review = self.reviews.add_review(review)?;

        self.reviews.save(&mut self.review_storage, REVIEWS_SLOT)?;

        Ok(review)
    }
}
