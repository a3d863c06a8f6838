//! ISO 4217 currencies of the covered jurisdictions.

use chrono::{Datelike, NaiveDate};

use super::countries::CountryCode;

/// Check whether `code` is the currency of at least one covered jurisdiction.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// The national currency of `country` on date `on`.
///
/// Euro area members map to `"EUR"`; the others keep their own currency.
pub fn national_currency(country: CountryCode, on: NaiveDate) -> &'static str {
    match country {
        // Euro since 2026-01-01.
        CountryCode::BG if on.year() < 2026 => "BGN",
        CountryCode::CZ => "CZK",
        CountryCode::DK => "DKK",
        CountryCode::GB => "GBP",
        CountryCode::HU => "HUF",
        CountryCode::PL => "PLN",
        CountryCode::RO => "RON",
        CountryCode::SE => "SEK",
        _ => "EUR",
    }
}

/// Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "BGN", // Bulgarian Lev, kept for snapshots before 2026
    "CZK", // Czech Koruna
    "DKK", // Danish Krone
    "EUR", // Euro
    "GBP", // Pound Sterling
    "HUF", // Hungarian Forint
    "PLN", // Polish Zloty
    "RON", // Romanian Leu
    "SEK", // Swedish Krona
];
