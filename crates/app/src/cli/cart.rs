use std::io::Write;

use atelier::prelude::*;
use clap::{Args, Subcommand};
use tracing::info;

use crate::{context::AppContext, errors::AppError, tables};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart lines and total
    Show,

    /// Add a catalog product to the cart
    Add(AddArgs),

    /// Change the quantity of a cart line by a signed amount
    Update(UpdateArgs),

    /// Remove a cart line
    Remove(LineArgs),

    /// Empty the cart
    Clear,

    /// Print the cart total
    Total,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    id: ProductId,

    /// Size (S, M, L, XL, XXL)
    #[arg(long, default_value_t = Size::default())]
    size: Size,

    /// Number of units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Product id
    id: ProductId,

    /// Size of the line to change
    #[arg(long)]
    size: Size,

    /// Signed change; a line that drops to zero or below is removed
    #[arg(long, allow_negative_numbers = true)]
    delta: i64,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Product id
    id: ProductId,

    /// Size of the line
    #[arg(long)]
    size: Size,
}

pub(crate) fn run(
    command: CartCommand,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command.command {
        CartSubcommand::Show => show(context, out),
        CartSubcommand::Add(args) => add(&args, context, out),
        CartSubcommand::Update(args) => update(&args, context, out),
        CartSubcommand::Remove(args) => remove(&args, context, out),
        CartSubcommand::Clear => {
            context.store.clear()?;
            writeln!(out, "cart cleared")?;

            Ok(())
        }
        CartSubcommand::Total => {
            writeln!(out, "{}", total(context))?;

            Ok(())
        }
    }
}

fn show(context: &AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let cart = context.store.cart();

    if cart.is_empty() {
        writeln!(out, "cart is empty")?;
        return Ok(());
    }

    writeln!(out, "{}", tables::cart(cart, context.currency))?;
    writeln!(out, "items: {}", cart.item_count())?;
    writeln!(out, "total: {}", total(context))?;

    Ok(())
}

fn add(args: &AddArgs, context: &mut AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let product = context.product(&args.id)?;

    let quantity = context
        .store
        .add(&product, args.size, args.quantity)?
        .get(&product.id, args.size)
        .map_or(args.quantity, |item| item.quantity);

    info!(product = %product.id, size = %args.size, quantity, "added to cart");

    writeln!(
        out,
        "{} ({}) quantity {quantity}, total {}",
        product.name,
        args.size,
        total(context)
    )?;

    Ok(())
}

fn update(args: &UpdateArgs, context: &mut AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let had_line = context.store.cart().get(&args.id, args.size).is_some();

    let line = context
        .store
        .update_quantity(&args.id, args.size, args.delta)?
        .get(&args.id, args.size)
        .map(|item| item.quantity);

    match (had_line, line) {
        (_, Some(quantity)) => writeln!(out, "{} ({}) quantity {quantity}", args.id, args.size)?,
        (true, None) => writeln!(out, "{} ({}) removed", args.id, args.size)?,
        (false, None) => writeln!(out, "no {} ({}) line in cart", args.id, args.size)?,
    }

    Ok(())
}

fn remove(args: &LineArgs, context: &mut AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let lines = context.store.cart().len();

    if context.store.remove(&args.id, args.size)?.len() == lines {
        writeln!(out, "no {} ({}) line in cart", args.id, args.size)?;
    } else {
        writeln!(out, "{} ({}) removed", args.id, args.size)?;
    }

    Ok(())
}

fn total(context: &AppContext) -> String {
    tables::money(context.store.total(), context.currency)
}
