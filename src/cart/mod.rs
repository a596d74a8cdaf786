//! Cart
//!
//! The in-memory shopping cart. A line item is identified by its product id and size; adding the
//! same pair twice merges quantities, and a line whose quantity drops to zero is removed rather
//! than kept at zero.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    products::{Product, ProductId},
    sizes::Size,
};

pub mod records;

/// Errors caused by invalid caller input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Quantities added to a cart must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The resulting quantity does not fit in a line item.
    #[error("quantity is too large")]
    QuantityOverflow,

    /// The cart total would no longer be representable.
    #[error("cart total is too large")]
    TotalOverflow,

    /// The size label is not one of the offered sizes.
    #[error("unknown size {0:?}; expected one of S, M, L, XL, XXL")]
    UnknownSize(String),
}

/// Line Item
///
/// A product snapshot taken when it was added, plus the chosen size and quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Product snapshot
    pub product: Product,

    /// Selected size
    pub size: Size,

    /// Quantity, always at least one
    pub quantity: u32,
}

impl LineItem {
    /// Whether this line is the entry for the given product and size.
    pub fn matches(&self, id: &ProductId, size: Size) -> bool {
        self.product.id == *id && self.size == size
    }

    /// Price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }

    fn checked_line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a product in the given size.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidQuantity`]: `quantity` is zero.
    /// - [`ValidationError::QuantityOverflow`]: the merged quantity does not fit.
    /// - [`ValidationError::TotalOverflow`]: the cart total would not fit.
    pub fn add(
        &mut self,
        product: &Product,
        size: Size,
        quantity: u32,
    ) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }

        let index = self.position(&product.id, size);

        let line = match index.and_then(|index| self.items.get(index)) {
            Some(item) => LineItem {
                quantity: item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(ValidationError::QuantityOverflow)?,
                ..item.clone()
            },
            None => LineItem {
                product: product.clone(),
                size,
                quantity,
            },
        };

        self.replace_line(index, line)
    }

    /// Apply `delta` to the quantity of a line, removing the line when the result is zero or less.
    ///
    /// Returns `false` when there is no such line.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::QuantityOverflow`]: the new quantity does not fit.
    /// - [`ValidationError::TotalOverflow`]: the cart total would not fit.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        size: Size,
        delta: i64,
    ) -> Result<bool, ValidationError> {
        let Some((index, item)) = self
            .items
            .iter()
            .enumerate()
            .find(|(_, item)| item.matches(id, size))
        else {
            return Ok(false);
        };

        let quantity = i64::from(item.quantity)
            .checked_add(delta)
            .ok_or(ValidationError::QuantityOverflow)?;

        if quantity <= 0 {
            self.items.remove(index);

            return Ok(true);
        }

        let line = LineItem {
            quantity: u32::try_from(quantity).map_err(|_err| ValidationError::QuantityOverflow)?,
            ..item.clone()
        };

        self.replace_line(Some(index), line)?;

        Ok(true)
    }

    /// Remove a line. Returns `false` when there is no such line.
    pub fn remove(&mut self, id: &ProductId, size: Size) -> bool {
        let before = self.items.len();

        self.items.retain(|item| !item.matches(id, size));

        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get the line for a product and size.
    pub fn get(&self, id: &ProductId, size: Size) -> Option<&LineItem> {
        self.items.iter().find(|item| item.matches(id, size))
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` across all lines.
    ///
    /// Lines are only admitted while the total fits in a [`Decimal`], so this never saturates.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    fn position(&self, id: &ProductId, size: Size) -> Option<usize> {
        self.items.iter().position(|item| item.matches(id, size))
    }

    /// Put `line` at `index`, or append it, if the resulting total still fits.
    fn replace_line(&mut self, index: Option<usize>, line: LineItem) -> Result<(), ValidationError> {
        let others = self
            .items
            .iter()
            .enumerate()
            .filter(|(position, _)| Some(*position) != index)
            .map(|(_, item)| item);

        let fits = others
            .chain(std::iter::once(&line))
            .try_fold(Decimal::ZERO, |sum, item| {
                item.checked_line_total()
                    .and_then(|line_total| sum.checked_add(line_total))
            })
            .is_some();

        if !fits {
            return Err(ValidationError::TotalOverflow);
        }

        match index.and_then(|index| self.items.get_mut(index)) {
            Some(item) => *item = line,
            None => self.items.push(line),
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
