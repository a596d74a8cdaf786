//! Command line interface

use std::io::Write;

use clap::{Parser, Subcommand};

use crate::{config::AppConfig, context::AppContext, errors::AppError};

mod cart;
mod products;

/// Atelier storefront CLI
#[derive(Debug, Parser)]
#[command(name = "atelier-app", about = "Atelier storefront CLI", long_about = None)]
pub struct Cli {
    /// Storage and logging settings.
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(products::ProductsCommand),

    /// Inspect and edit the cart
    Cart(cart::CartCommand),
}

impl Cli {
    /// Load `.env` if present, then parse flags and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Run the selected command, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog, cart or reviews cannot be loaded, a product is unknown,
    /// a cart change or review is rejected or cannot be persisted, or output cannot be written.
    pub fn run(self, out: &mut impl Write) -> Result<(), AppError> {
        let mut context = AppContext::from_config(&self.config.storage)?;

        match self.command {
            Commands::Products(command) => products::run(command, &mut context, out),
            Commands::Cart(command) => cart::run(command, &mut context, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use atelier::prelude::{CartStoreError, ReviewsError, ValidationError};
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn parse(dir: &TempDir, args: &[&str]) -> Result<Cli, clap::Error> {
        let data_dir = dir.path().to_string_lossy().into_owned();

        let mut argv = vec!["atelier-app", "--data-dir", data_dir.as_str()];
        argv.extend_from_slice(args);

        Cli::try_parse_from(argv)
    }

    fn output(cli: Cli) -> Result<String, AppError> {
        let mut out = Vec::new();
        cli.run(&mut out)?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn products_list_shows_the_catalog() -> TestResult {
        let dir = tempfile::tempdir()?;

        let listing = output(parse(&dir, &["products", "list"])?)?;

        for name in ["T-shirt", "Jeans", "Sweater", "Coat", "Socks", "Hat"] {
            assert!(listing.contains(name), "missing {name} in {listing}");
        }

        Ok(())
    }

    #[test]
    fn products_list_applies_filters() -> TestResult {
        let dir = tempfile::tempdir()?;

        let listing = output(parse(
            &dir,
            &["products", "list", "--query", "winter", "--max-price", "100"],
        )?)?;

        assert!(listing.contains("Hat"), "missing Hat in {listing}");
        assert!(!listing.contains("Coat"), "Coat should be filtered out: {listing}");

        let none = output(parse(&dir, &["products", "list", "--query", "velvet"])?)?;

        assert_eq!(none.trim(), "no products found");

        Ok(())
    }

    #[test]
    fn products_show_lists_sizes() -> TestResult {
        let dir = tempfile::tempdir()?;

        let detail = output(parse(&dir, &["products", "show", "3"])?)?;

        assert!(detail.contains("name: Sweater"), "unexpected output {detail}");
        assert!(
            detail.contains("sizes: S, M, L, XL, XXL"),
            "unexpected output {detail}"
        );

        Ok(())
    }

    #[test]
    fn products_show_includes_persisted_reviews() -> TestResult {
        let dir = tempfile::tempdir()?;

        let unreviewed = output(parse(&dir, &["products", "show", "4"])?)?;
        assert!(unreviewed.contains("rating: no reviews"), "unexpected output {unreviewed}");

        for (author, rating) in [("Ada", "5"), ("Grace", "4")] {
            output(parse(
                &dir,
                &[
                    "products", "review", "4", "--author", author, "--rating", rating,
                    "--comment", "Warm",
                ],
            )?)?;
        }

        let detail = output(parse(&dir, &["products", "show", "4"])?)?;

        assert!(detail.contains("rating: 4.5 (2 reviews)"), "unexpected output {detail}");
        assert!(detail.contains("5/5 Ada"), "missing review in {detail}");
        assert!(detail.contains("4/5 Grace"), "missing review in {detail}");
        assert!(dir.path().join("reviews.json").exists(), "reviews should be persisted");

        Ok(())
    }

    #[test]
    fn invalid_reviews_are_rejected_without_writing() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = output(parse(
            &dir,
            &["products", "review", "4", "--author", "Ada", "--rating", "9", "--comment", "Hm"],
        )?);

        assert!(
            matches!(result, Err(AppError::Reviews(ReviewsError::InvalidRating(9)))),
            "expected InvalidRating, got {result:?}"
        );
        assert!(!dir.path().join("reviews.json").exists(), "rejected review should not write");

        let unknown = output(parse(
            &dir,
            &["products", "review", "404", "--author", "Ada", "--rating", "5", "--comment", "Hm"],
        )?);

        assert!(
            matches!(unknown, Err(AppError::UnknownProduct(_))),
            "expected UnknownProduct, got {unknown:?}"
        );

        Ok(())
    }

    #[test]
    fn cart_commands_persist_between_runs() -> TestResult {
        let dir = tempfile::tempdir()?;

        output(parse(&dir, &["cart", "add", "1", "--size", "M", "--quantity", "2"])?)?;
        output(parse(&dir, &["cart", "add", "5", "--size", "xxl"])?)?;

        let total = output(parse(&dir, &["cart", "total"])?)?;
        assert!(total.contains("650"), "unexpected total {total}");

        let shown = output(parse(&dir, &["cart", "show"])?)?;
        assert!(shown.contains("T-shirt"), "missing T-shirt in {shown}");
        assert!(shown.contains("items: 3"), "unexpected item count in {shown}");

        Ok(())
    }

    #[test]
    fn cart_update_to_zero_removes_the_line() -> TestResult {
        let dir = tempfile::tempdir()?;

        output(parse(&dir, &["cart", "add", "2", "--size", "L"])?)?;

        let message = output(parse(
            &dir,
            &["cart", "update", "2", "--size", "L", "--delta", "-1"],
        )?)?;

        assert_eq!(message.trim(), "2 (L) removed");
        assert_eq!(output(parse(&dir, &["cart", "show"])?)?.trim(), "cart is empty");

        Ok(())
    }

    #[test]
    fn missing_lines_are_reported_without_writing() -> TestResult {
        let dir = tempfile::tempdir()?;

        let message = output(parse(&dir, &["cart", "remove", "nonexistent", "--size", "S"])?)?;

        assert_eq!(message.trim(), "no nonexistent (S) line in cart");
        assert!(
            !dir.path().join("cart.json").exists(),
            "no-op should not write"
        );

        Ok(())
    }

    #[test]
    fn updating_a_missing_line_does_not_write() -> TestResult {
        let dir = tempfile::tempdir()?;

        let message = output(parse(
            &dir,
            &["cart", "update", "1", "--size", "M", "--delta", "2"],
        )?)?;

        assert_eq!(message.trim(), "no 1 (M) line in cart");
        assert!(
            !dir.path().join("cart.json").exists(),
            "no-op should not write"
        );

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() -> TestResult {
        let dir = tempfile::tempdir()?;

        output(parse(&dir, &["cart", "add", "4"])?)?;
        output(parse(&dir, &["cart", "clear"])?)?;

        assert_eq!(output(parse(&dir, &["cart", "show"])?)?.trim(), "cart is empty");
        assert_eq!(fs::read_to_string(dir.path().join("cart.json"))?, "[]");

        Ok(())
    }

    #[test]
    fn unknown_products_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = output(parse(&dir, &["cart", "add", "404"])?);

        assert!(
            matches!(result, Err(AppError::UnknownProduct(ref id)) if id.as_str() == "404"),
            "expected UnknownProduct, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn zero_quantity_is_a_validation_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = output(parse(&dir, &["cart", "add", "1", "--quantity", "0"])?);

        assert!(
            matches!(
                result,
                Err(AppError::Cart(CartStoreError::Validation(
                    ValidationError::InvalidQuantity
                )))
            ),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn unknown_sizes_fail_to_parse() -> TestResult {
        let dir = tempfile::tempdir()?;

        assert!(parse(&dir, &["cart", "add", "1", "--size", "XXXL"]).is_err());

        Ok(())
    }

    #[test]
    fn custom_catalog_and_currency() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yml");

        fs::write(
            &path,
            "products:\n  - { id: scarf, name: Scarf, description: Silk scarf, price: \"£1,200\" }\n",
        )?;

        let catalog = path.to_string_lossy().into_owned();

        output(parse(
            &dir,
            &["--catalog", catalog.as_str(), "cart", "add", "scarf"],
        )?)?;

        let total = output(parse(
            &dir,
            &["--catalog", catalog.as_str(), "--currency", "GBP", "cart", "total"],
        )?)?;

        assert!(total.contains('£'), "expected pounds in {total}");
        assert!(total.contains("1,200"), "unexpected total {total}");

        Ok(())
    }
}
