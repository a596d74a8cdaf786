use std::io::Write;

use atelier::prelude::*;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use crate::{context::AppContext, errors::AppError, tables};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List catalog products
    List(ListProductsArgs),

    /// Show a single product with its reviews
    Show(ShowProductArgs),

    /// Review a product
    Review(ReviewArgs),
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only products whose name or description contains this text
    #[arg(long)]
    query: Option<String>,

    /// Only products priced at or below this amount
    #[arg(long)]
    max_price: Option<Decimal>,
}

#[derive(Debug, Args)]
struct ShowProductArgs {
    /// Product id
    id: ProductId,
}

#[derive(Debug, Args)]
struct ReviewArgs {
    /// Product id
    id: ProductId,

    /// Reviewer name
    #[arg(long)]
    author: String,

    /// Stars from 1 to 5
    #[arg(long)]
    rating: u8,

    /// Review text
    #[arg(long)]
    comment: String,
}

pub(crate) fn run(
    command: ProductsCommand,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command.command {
        ProductsSubcommand::List(args) => list(args, context, out),
        ProductsSubcommand::Show(args) => show(&args, context, out),
        ProductsSubcommand::Review(args) => review(args, context, out),
    }
}

fn list(args: ListProductsArgs, context: &AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let filter = ProductFilter {
        query: args.query,
        max_price: args.max_price,
    };

    let products = context.catalog.list(&filter)?;

    if products.is_empty() {
        writeln!(out, "no products found")?;
        return Ok(());
    }

    writeln!(out, "{}", tables::products(&products, context.currency))?;

    Ok(())
}

fn show(args: &ShowProductArgs, context: &AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let product = context.product(&args.id)?;

    let sizes = Size::ALL
        .iter()
        .map(|size| size.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "id: {}", product.id)?;
    writeln!(out, "name: {}", product.name)?;
    writeln!(out, "description: {}", product.description)?;
    writeln!(out, "price: {}", tables::money(product.price, context.currency))?;
    writeln!(out, "sizes: {sizes}")?;
    writeln!(out, "image: {}", product.image)?;

    let reviews = context.reviews.list_reviews(&product.id);

    match average_rating(&reviews) {
        Some(average) => writeln!(out, "rating: {average} ({} reviews)", reviews.len())?,
        None => writeln!(out, "rating: no reviews")?,
    }

    for review in &reviews {
        writeln!(
            out,
            "  {}/5 {} ({}): {}",
            review.rating,
            review.author,
            review.created_at.strftime("%Y-%m-%d"),
            review.comment
        )?;
    }

    Ok(())
}

fn review(args: ReviewArgs, context: &mut AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let review = context.add_review(NewReview {
        product_id: args.id,
        author: args.author,
        rating: args.rating,
        comment: args.comment,
    })?;

    info!(product = %review.product_id, rating = review.rating, "review added");

    writeln!(
        out,
        "review by {} added to {} ({}/5)",
        review.author, review.product_id, review.rating
    )?;

    Ok(())
}
