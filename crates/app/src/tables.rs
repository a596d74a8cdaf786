//! Table rendering for command output.

use atelier::{prelude::*, products::DESCRIPTION_SUMMARY_LEN};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

/// Format an amount in `currency`, e.g. `$300.00`.
pub(crate) fn money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

/// One row per product: id, name, truncated description and price.
pub(crate) fn products(products: &[Product], currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Description", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.summary(DESCRIPTION_SUMMARY_LEN),
            money(product.price, currency),
        ]);
    }

    finish(builder.build(), 3..4)
}

/// One row per cart line with its line total.
pub(crate) fn cart(cart: &Cart, currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Size", "Qty", "Price", "Line total"]);

    for item in cart {
        builder.push_record([
            item.product.id.to_string(),
            item.product.name.clone(),
            item.size.to_string(),
            item.quantity.to_string(),
            money(item.product.price, currency),
            money(item.line_total(), currency),
        ]);
    }

    finish(builder.build(), 3..6)
}

fn finish(mut table: Table, numeric: std::ops::Range<usize>) -> String {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(numeric), Alignment::right());

    table.to_string()
}
