//! Atelier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, LineItem, ValidationError},
    catalog::{CatalogError, CatalogSource, FixtureCatalog, ProductFilter},
    pricing::{PriceError, RawPrice, normalize_price},
    products::{Product, ProductId},
    reviews::{
        InMemoryReviews, NewReview, REVIEWS_SLOT, Review, ReviewSource, ReviewsError,
        average_rating,
    },
    sizes::Size,
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
    store::{CartStore, CartStoreError, DEFAULT_SLOT},
};
