//! Catalog
//!
//! Read-only access to the product listing. The cart only depends on the [`Product`] shape, not
//! on where products come from.

use std::io;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    pricing::PriceError,
    products::{Product, ProductId},
};

mod fixture;

pub use fixture::FixtureCatalog;

/// Catalog Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog document
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("failed to parse catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product has an empty id
    #[error("product {0} has an empty id")]
    EmptyId(usize),

    /// A product id appears more than once
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A product price could not be normalized
    #[error("product {id} has an invalid price")]
    InvalidPrice {
        /// Product id
        id: ProductId,
        /// Normalization failure
        #[source]
        source: PriceError,
    },
}

/// Product Filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive text matched against name and description
    pub query: Option<String>,

    /// Inclusive upper bound on price
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Whether `product` passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        let query_matches = self.query.as_deref().map(str::trim).is_none_or(|query| {
            let query = query.to_lowercase();

            product.name.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query)
        });

        let price_matches = self
            .max_price
            .is_none_or(|max_price| product.price <= max_price);

        query_matches && price_matches
    }
}

/// Catalog Source
pub trait CatalogSource {
    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog cannot be queried. A missing product is `Ok(None)`.
    fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// List products passing `filter`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog cannot be queried.
    fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(name),
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(price, 0),
            image: String::new(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(ProductFilter::default().matches(&product("Hat", "Stylish winter hat", 100)));
    }

    #[test]
    fn query_matches_name_or_description_ignoring_case() {
        let filter = ProductFilter {
            query: Some("WINTER".to_string()),
            ..ProductFilter::default()
        };

        assert!(filter.matches(&product("Hat", "Stylish winter hat", 100)));
        assert!(!filter.matches(&product("Socks", "Comfortable cotton socks", 50)));
    }

    #[test]
    fn max_price_is_inclusive() {
        let filter = ProductFilter {
            max_price: Some(Decimal::new(100, 0)),
            ..ProductFilter::default()
        };

        assert!(filter.matches(&product("Hat", "", 100)));
        assert!(!filter.matches(&product("Coat", "", 500)));
    }
}
