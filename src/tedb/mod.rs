//! Refresh tooling: fetch rates from the European Commission TEDB service,
//! turn them into a [`Dataset`](crate::Dataset), and diff against the
//! published snapshot.
//!
//! Nothing in [`crate::core`] calls into this module. It exists for the
//! `eu-vat-rates-update` binary, which rewrites `data/eu-vat-rates.json`
//! ahead of the next release.
//!
//! # Example
//!
//! ```ignore
//! use eu_vat_rates::tedb::*;
//!
//! let config = TedbConfig::default();
//! let upstream = fetch_rates(&config).await?;
//! let dataset = build_dataset(&upstream, "2025-11-03", config.situation_on)?;
//! let changes = compute_diff(&read_previous(path), &serde_json::to_value(&dataset)?);
//! ```

mod client;
mod diff;
mod error;
mod snapshot;
mod soap;
pub(crate) mod xml_utils;

pub use client::{TedbConfig, fetch_rates};
pub use diff::{FieldChange, compute_diff, read_previous};
pub use error::TedbError;
pub use snapshot::{build_dataset, country_name, uk_rates, write_dataset};
pub use soap::{UpstreamRates, UpstreamRecord, parse_soap_response, soap_request_body};

/// TEDB SOAP endpoint.
pub const TEDB_ENDPOINT: &str = "https://ec.europa.eu/taxation_customs/tedb/ws/";

/// Message namespace of `IVatRetrievalService`.
pub const TEDB_NS_MSG: &str = "urn:ec.europa.eu:taxud:tedb:services:v1:IVatRetrievalService";

/// Types namespace of `IVatRetrievalService`.
pub const TEDB_NS_TYPES: &str =
    "urn:ec.europa.eu:taxud:tedb:services:v1:IVatRetrievalService:types";

/// `SOAPAction` header value for `RetrieveVatRates`.
pub const TEDB_SOAP_ACTION: &str =
    "urn:ec.europa.eu:taxud:tedb:services:v1:VatRetrievalService/RetrieveVatRates";

/// Attribution written into every snapshot.
pub const TEDB_SOURCE: &str = "European Commission TEDB";

/// Public page listing the rates, written into every snapshot.
pub const TEDB_URL: &str = "https://taxation-customs.ec.europa.eu/tedb/vatRates.html";

/// Member states as TEDB knows them (Greece is `EL`).
pub const TEDB_MEMBER_STATES: [&str; 27] = [
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "HR", "HU", "IE", "IT",
    "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Map a TEDB member-state code to ISO 3166-1 alpha-2 (`EL` → `GR`).
pub fn to_iso_code(tedb_code: &str) -> &str {
    match tedb_code {
        "EL" => "GR",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CountryCode, as_member};

    #[test]
    fn endpoint_is_https() {
        assert!(TEDB_ENDPOINT.starts_with("https://"));
        assert!(TEDB_URL.starts_with("https://"));
    }

    #[test]
    fn member_states_map_onto_covered_codes() {
        let mut mapped: Vec<CountryCode> = TEDB_MEMBER_STATES
            .iter()
            .map(|s| as_member(to_iso_code(s)).unwrap())
            .collect();
        let expected: Vec<CountryCode> = CountryCode::ALL
            .into_iter()
            .filter(|c| *c != CountryCode::GB)
            .collect();
        mapped.sort();
        assert_eq!(mapped, expected);
    }

    #[test]
    fn only_greece_is_remapped() {
        assert_eq!(to_iso_code("EL"), "GR");
        assert_eq!(to_iso_code("DE"), "DE");
        assert_eq!(to_iso_code("GR"), "GR");
    }
}
