//! Cart Store
//!
//! The single owner of the shopping cart. Every mutation is computed on a copy of the cart,
//! written through to storage as a whole, and only then becomes the current cart. A failed write
//! therefore leaves both the stored value and the in-memory cart as they were.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, ValidationError, records},
    products::{Product, ProductId},
    sizes::Size,
    storage::{CartStorage, StorageError},
};

/// Slot the cart is persisted under unless told otherwise.
pub const DEFAULT_SLOT: &str = "cart";

/// Errors returned by cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The caller supplied an invalid quantity or size.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage could not be read or written.
    #[error("cart persistence failed")]
    Persistence(#[from] StorageError),
}

/// Cart Store
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    slot: String,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart persisted under [`DEFAULT_SLOT`].
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Persistence`] if storage cannot be read.
    pub fn open(storage: S) -> Result<Self, CartStoreError> {
        Self::open_slot(storage, DEFAULT_SLOT)
    }

    /// Open the cart persisted under `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Persistence`] if the slot is invalid or storage cannot be read.
    pub fn open_slot(storage: S, slot: impl Into<String>) -> Result<Self, CartStoreError> {
        let mut store = Self {
            storage,
            slot: slot.into(),
            cart: Cart::new(),
        };

        store.load()?;

        info!(slot = %store.slot, lines = store.cart.len(), "opened cart");

        Ok(store)
    }

    /// Re-read the cart from storage, replacing the in-memory copy.
    ///
    /// Entries that fail validation are dropped and logged; they never fail the load.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Persistence`] if storage cannot be read.
    pub fn load(&mut self) -> Result<&Cart, CartStoreError> {
        let Some(blob) = self.storage.read(&self.slot)? else {
            self.cart = Cart::new();

            return Ok(&self.cart);
        };

        let decoded = records::decode(&blob);

        if decoded.unreadable {
            warn!(slot = %self.slot, "stored cart is not a readable list; starting empty");
        }

        for dropped in &decoded.dropped {
            warn!(
                slot = %self.slot,
                index = dropped.index,
                reason = %dropped.reason,
                "dropped malformed cart entry"
            );
        }

        if !decoded.dropped.is_empty() {
            warn!(
                slot = %self.slot,
                dropped = decoded.dropped.len(),
                kept = decoded.cart.len(),
                "recovered cart from malformed data"
            );
        }

        if decoded.merged > 0 {
            warn!(
                slot = %self.slot,
                merged = decoded.merged,
                "merged repeated cart entries"
            );
        }

        self.cart = decoded.cart;

        Ok(&self.cart)
    }

    /// Add `quantity` of `product` in `size`, merging with an existing line for the same pair.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Validation`]: `quantity` is zero or the merged quantity overflows.
    /// - [`CartStoreError::Persistence`]: the write failed; the cart is unchanged.
    pub fn add(
        &mut self,
        product: &Product,
        size: Size,
        quantity: u32,
    ) -> Result<&Cart, CartStoreError> {
        let mut next = self.cart.clone();

        next.add(product, size, quantity)?;

        self.commit(next)
    }

    /// Change the quantity of a line by `delta`. A result of zero or less removes the line.
    ///
    /// A missing line is not an error: the cart is returned unchanged and nothing is written.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Validation`]: the new quantity overflows.
    /// - [`CartStoreError::Persistence`]: the write failed; the cart is unchanged.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        size: Size,
        delta: i64,
    ) -> Result<&Cart, CartStoreError> {
        let mut next = self.cart.clone();

        if !next.update_quantity(id, size, delta)? {
            debug!(%id, %size, "no cart line to update");

            return Ok(&self.cart);
        }

        self.commit(next)
    }

    /// Remove the line for `id` and `size`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Persistence`] if the write failed; the cart is unchanged.
    pub fn remove(&mut self, id: &ProductId, size: Size) -> Result<&Cart, CartStoreError> {
        let mut next = self.cart.clone();

        if !next.remove(id, size) {
            debug!(%id, %size, "no cart line to remove");

            return Ok(&self.cart);
        }

        self.commit(next)
    }

    /// Empty the cart. The empty cart is written even if the cart was already empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Persistence`] if the write failed; the cart is unchanged.
    pub fn clear(&mut self) -> Result<&Cart, CartStoreError> {
        self.commit(Cart::new())
    }

    /// Sum of `price * quantity` over the in-memory cart.
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// [`CartStore::total`] in the given currency.
    pub fn total_money(&self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_decimal(self.total(), currency)
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Slot the cart is persisted under.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn commit(&mut self, next: Cart) -> Result<&Cart, CartStoreError> {
        let blob = records::encode(&next).map_err(StorageError::from)?;

        self.storage.write(&self.slot, &blob)?;

        debug!(
            slot = %self.slot,
            lines = next.len(),
            items = next.item_count(),
            "persisted cart"
        );

        self.cart = next;

        Ok(&self.cart)
    }
}
