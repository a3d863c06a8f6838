//! Dataset types, the embedded snapshot, and its accessors.
//!
//! The snapshot in `data/eu-vat-rates.json` is compiled into the crate and
//! parsed on first use. Parsing failure is a defect in the shipped data and
//! aborts with a panic; unknown country codes are ordinary `None` results.

mod countries;
pub mod currencies;
mod embedded;
mod error;
mod types;
mod validation;

pub use countries::*;
pub use currencies::is_known_currency_code;
pub use embedded::*;
pub use error::*;
pub use types::*;
pub use validation::*;
