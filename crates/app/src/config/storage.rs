//! Storage Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::{Currency, EUR, GBP, USD};

/// Currencies totals can be shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CurrencyCode {
    /// US dollar
    #[default]
    #[value(name = "USD")]
    Usd,

    /// Pound sterling
    #[value(name = "GBP")]
    Gbp,

    /// Euro
    #[value(name = "EUR")]
    Eur,
}

impl CurrencyCode {
    /// The `rusty_money` currency for this code.
    pub fn currency(self) -> &'static Currency {
        match self {
            CurrencyCode::Usd => USD,
            CurrencyCode::Gbp => GBP,
            CurrencyCode::Eur => EUR,
        }
    }
}

/// Where the cart lives and what it is priced against.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart
    #[arg(long, env = "ATELIER_DATA_DIR", default_value = ".atelier")]
    pub data_dir: PathBuf,

    /// YAML product catalog; the bundled catalog is used when omitted
    #[arg(long, env = "ATELIER_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Currency used to format prices and totals
    #[arg(
        long,
        env = "ATELIER_CURRENCY",
        value_enum,
        ignore_case = true,
        default_value_t = CurrencyCode::Usd
    )]
    pub currency: CurrencyCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_codes_map_to_iso_currencies() {
        assert_eq!(CurrencyCode::default().currency(), USD);
        assert_eq!(CurrencyCode::Gbp.currency().iso_alpha_code, "GBP");
        assert_eq!(CurrencyCode::Eur.currency(), EUR);
    }
}
