//! Atelier Storefront CLI

use std::{error::Error, io, process};

use atelier_app::{cli::Cli, errors::AppError, logging};

pub fn main() {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    if let Err(error) = run(cli) {
        eprintln!("{error}");

        let mut source = error.source();

        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    logging::init_subscriber(&cli.config.logging)?;

    let stdout = io::stdout();

    cli.run(&mut stdout.lock())
}
