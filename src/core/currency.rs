//! Display currency selection
//!
//! The symbol is cosmetic only: it prefixes formatted values and never
//! affects the stored magnitudes or the derived metrics.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// The closed set of selectable currencies. The first entry is the
/// fallback for unknown or missing symbols.
pub const CURRENCIES: [Currency; 5] = [
    Currency {
        symbol: "₹",
        name: "INR",
    },
    Currency {
        symbol: "$",
        name: "USD",
    },
    Currency {
        symbol: "€",
        name: "EUR",
    },
    Currency {
        symbol: "£",
        name: "GBP",
    },
    Currency {
        symbol: "AED",
        name: "AED",
    },
];

pub fn find_by_symbol(symbol: &str) -> Currency {
    CURRENCIES
        .iter()
        .copied()
        .find(|c| c.symbol == symbol)
        .unwrap_or(CURRENCIES[0])
}
