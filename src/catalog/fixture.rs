//! Fixture Catalog

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::{CatalogError, CatalogSource, ProductFilter},
    pricing::{RawPrice, normalize_price},
    products::{Product, ProductId},
};

const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog/default.yml");

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    price: RawPrice,
    #[serde(default)]
    image: String,
}

/// Fixture Catalog
///
/// A catalog read once from a YAML document and held in memory.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl FixtureCatalog {
    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled document is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUNDLED_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a product is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path.as_ref())?;

        debug!(path = %path.as_ref().display(), "loading catalog");

        Self::from_yaml_str(&contents)
    }

    /// Load a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, a price cannot be normalized, an id is
    /// empty or repeated.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut catalog = Self::default();

        for (position, product_fixture) in fixture.products.into_iter().enumerate() {
            if product_fixture.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }

            let id = ProductId::new(product_fixture.id);

            let price = normalize_price(&product_fixture.price).map_err(|source| {
                CatalogError::InvalidPrice {
                    id: id.clone(),
                    source,
                }
            })?;

            if catalog.index.contains_key(&id) {
                return Err(CatalogError::DuplicateProduct(id));
            }

            catalog.index.insert(id.clone(), catalog.products.len());
            catalog.products.push(Product {
                id,
                name: product_fixture.name,
                description: product_fixture.description,
                price,
                image: product_fixture.image,
            });
        }

        Ok(catalog)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogSource for FixtureCatalog {
    fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self
            .index
            .get(id)
            .and_then(|position| self.products.get(*position))
            .cloned())
    }

    fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }
}
