//! Atelier command line application: configuration, logging and the storefront commands.

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod logging;

mod tables;
