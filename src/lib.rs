//! # eu-vat-rates
//!
//! VAT rates for the 27 EU member states and the United Kingdom, shipped as
//! an embedded JSON snapshot and exposed through a small read-only API.
//!
//! All rates use [`rust_decimal::Decimal`], never floating point. The
//! snapshot is parsed once per process and never changes afterwards, so
//! every accessor is a pure, lock-free read.
//!
//! ## Quick Start
//!
//! ```rust
//! use eu_vat_rates::*;
//! use rust_decimal_macros::dec;
//!
//! // Optional lookup for codes that arrive at runtime
//! let de = get_rate("DE").unwrap();
//! assert_eq!(de.currency, "EUR");
//! assert_eq!(get_standard_rate("DE"), Some(de.standard));
//! assert!(get_rate("US").is_none());
//!
//! // Total lookup once the code is known to be covered
//! if let Some(code) = as_member("FR") {
//!     assert_eq!(code.rate().country, "France");
//! }
//! assert_eq!(CountryCode::GB.standard_rate(), dec!(20));
//!
//! assert_eq!(get_all_rates().len(), CountryCode::ALL.len());
//! assert_eq!(data_version(), dataset().version);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Dataset types, embedded snapshot, accessors, validation |
//! | `update` | TEDB SOAP client, snapshot builder, diff, `eu-vat-rates-update` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "update")]
pub mod tedb;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
