//! Application Errors

use std::io;

use atelier::prelude::{CartStoreError, CatalogError, ProductId, ReviewsError};
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog could not be loaded or queried.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A cart operation was rejected or could not be persisted.
    #[error(transparent)]
    Cart(#[from] CartStoreError),

    /// A review was rejected or reviews could not be persisted.
    #[error(transparent)]
    Reviews(#[from] ReviewsError),

    /// No product with this id exists in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Writing command output failed.
    #[error("failed to write output")]
    Output(#[from] io::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging")]
    Logging(#[from] TryInitError),
}
