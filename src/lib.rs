//! Atelier
//!
//! Atelier is the domain core of a small clothing storefront: a product catalog, product reviews
//! and a shopping cart that is written through to a persisted key-value slot on every change.

pub mod cart;
pub mod catalog;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod reviews;
pub mod sizes;
pub mod storage;
pub mod store;
