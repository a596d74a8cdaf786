//! Cart Records
//!
//! The persisted form of a cart: a JSON array of flat line item objects. Decoding validates each
//! entry on its own so that one corrupted record never hides the rest of the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem, ValidationError},
    pricing::{PriceError, RawPrice, normalize_price},
    products::{Product, ProductId},
    sizes::Size,
};

/// Line Item Record, as written to storage.
#[derive(Debug, Serialize)]
struct LineItemRecord<'a> {
    id: &'a ProductId,
    name: &'a str,
    description: &'a str,
    image: &'a str,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price: Decimal,
    size: Size,
    quantity: u32,
}

impl<'a> From<&'a LineItem> for LineItemRecord<'a> {
    fn from(item: &'a LineItem) -> Self {
        Self {
            id: &item.product.id,
            name: &item.product.name,
            description: &item.product.description,
            image: &item.product.image,
            price: item.product.price,
            size: item.size,
            quantity: item.quantity,
        }
    }
}

/// Line Item Record, as read back from storage before validation.
#[derive(Debug, Deserialize)]
struct StoredLineItem {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    price: Value,
    size: String,
    quantity: i64,
}

/// Reasons a stored entry is rejected.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The entry is not an object with the required fields.
    #[error("malformed entry: {0}")]
    Shape(#[from] serde_json::Error),

    /// The entry has an empty product id.
    #[error("entry has an empty id")]
    EmptyId,

    /// The stored price could not be normalized.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The stored price is neither a number nor a string.
    #[error("price must be a number or a string, got {0}")]
    PriceType(Value),

    /// The stored size is not one of the offered sizes.
    #[error("unknown size {0:?}")]
    Size(String),

    /// The stored quantity is below one or too large.
    #[error("invalid quantity {0}")]
    Quantity(i64),

    /// The entry is valid on its own but cannot join the cart.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

/// A stored entry that was dropped while decoding.
#[derive(Debug)]
pub struct DroppedRecord {
    /// Position of the entry in the stored array.
    pub index: usize,

    /// Why it was dropped.
    pub reason: RecordError,
}

/// Result of decoding a stored cart.
#[derive(Debug, Default)]
pub struct Decoded {
    /// The best-effort cart.
    pub cart: Cart,

    /// Entries that failed validation.
    pub dropped: Vec<DroppedRecord>,

    /// Number of entries folded into an earlier entry with the same id and size.
    pub merged: usize,

    /// Whether the blob as a whole could not be read as an array.
    pub unreadable: bool,
}

/// Serialize a cart into its persisted form.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    let records: Vec<LineItemRecord<'_>> = cart.iter().map(LineItemRecord::from).collect();

    serde_json::to_string(&records)
}

/// Decode a persisted cart, keeping every entry that validates.
pub fn decode(blob: &str) -> Decoded {
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(blob) else {
        return Decoded {
            unreadable: true,
            ..Decoded::default()
        };
    };

    let mut cart = Cart::new();
    let mut dropped = Vec::new();
    let mut merged = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        let item = match validate(entry) {
            Ok(item) => item,
            Err(reason) => {
                dropped.push(DroppedRecord { index, reason });
                continue;
            }
        };

        // Repeated identities only come from data written outside this crate.
        let repeat = cart.get(&item.product.id, item.size).is_some();

        match cart.add(&item.product, item.size, item.quantity) {
            Ok(()) if repeat => merged += 1,
            Ok(()) => {}
            Err(error) => dropped.push(DroppedRecord {
                index,
                reason: RecordError::Rejected(error),
            }),
        }
    }

    Decoded {
        cart,
        dropped,
        merged,
        unreadable: false,
    }
}

fn validate(entry: Value) -> Result<LineItem, RecordError> {
    let stored: StoredLineItem = serde_json::from_value(entry)?;

    if stored.id.trim().is_empty() {
        return Err(RecordError::EmptyId);
    }

    // Numbers are read from their exact text so decimals survive a round trip.
    let raw = match stored.price {
        Value::Number(number) => RawPrice::Text(number.to_string()),
        Value::String(text) => RawPrice::Text(text),
        other => return Err(RecordError::PriceType(other)),
    };

    let price = normalize_price(&raw)?;

    let size = stored
        .size
        .parse::<Size>()
        .map_err(|_err| RecordError::Size(stored.size.clone()))?;

    let quantity = u32::try_from(stored.quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or(RecordError::Quantity(stored.quantity))?;

    Ok(LineItem {
        product: Product {
            id: ProductId::new(stored.id),
            name: stored.name,
            description: stored.description,
            price,
            image: stored.image,
        },
        size,
        quantity,
    })
}
