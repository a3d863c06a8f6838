//! The snapshot compiled into the crate and the process-wide accessors over it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::countries::CountryCode;
use super::types::{Dataset, RateRecord};

/// The raw resource, byte-for-byte as published in `data/eu-vat-rates.json`.
pub const EMBEDDED_JSON: &str = include_str!("../../data/eu-vat-rates.json");

static DATASET: LazyLock<Dataset> = LazyLock::new(|| {
    let dataset = Dataset::from_json(EMBEDDED_JSON)
        .unwrap_or_else(|e| panic!("embedded VAT dataset is invalid: {e}"));
    tracing::debug!(
        version = %dataset.version,
        jurisdictions = dataset.rates.len(),
        "loaded embedded VAT dataset"
    );
    dataset
});

/// Parse the embedded snapshot now instead of on the first lookup.
///
/// Call this during start-up to surface a corrupt build immediately.
/// Repeated calls are free.
///
/// # Panics
///
/// If the embedded resource is malformed. There is no partial-dataset mode.
pub fn load() {
    LazyLock::force(&DATASET);
}

/// The complete embedded snapshot: version, attribution and rate table.
pub fn dataset() -> &'static Dataset {
    &DATASET
}

/// Rates for `code`, or `None` if it is not a covered jurisdiction.
///
/// The code is matched exactly; Greece is `"GR"`, not `"EL"`.
pub fn get_rate(code: &str) -> Option<&'static RateRecord> {
    DATASET.get(code)
}

/// Standard rate for `code`, or `None` if it is not a covered jurisdiction.
pub fn get_standard_rate(code: &str) -> Option<Decimal> {
    get_rate(code).map(|r| r.standard)
}

/// The whole rate table, ordered by code.
pub fn get_all_rates() -> &'static BTreeMap<CountryCode, RateRecord> {
    &DATASET.rates
}

/// Whether `code` is covered by the dataset (EU member state or `GB`).
///
/// Use [`as_member`](crate::as_member) to obtain the narrowed [`CountryCode`].
pub fn is_eu_member(code: &str) -> bool {
    get_rate(code).is_some()
}

/// Version of the embedded snapshot.
pub fn data_version() -> &'static str {
    &DATASET.version
}

impl CountryCode {
    /// Rates for this jurisdiction in the embedded snapshot.
    pub fn rate(self) -> &'static RateRecord {
        DATASET.rate(self)
    }

    /// Standard rate for this jurisdiction in the embedded snapshot.
    pub fn standard_rate(self) -> Decimal {
        self.rate().standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn embedded_resource_is_valid() {
        load();
        assert_eq!(dataset().rates.len(), 28);
    }

    #[test]
    fn every_code_is_total() {
        for code in CountryCode::ALL {
            assert!(!code.rate().country.is_empty());
            assert_eq!(get_rate(code.as_str()), Some(code.rate()));
        }
    }

    #[test]
    fn get_all_rates_is_the_backing_table() {
        assert!(std::ptr::eq(get_all_rates(), &dataset().rates));
    }

    #[test]
    fn version_accessor() {
        assert_eq!(data_version(), dataset().version);
        assert!(dataset().version_date().is_some());
    }

    #[test]
    fn greece_uses_iso_code() {
        assert!(get_rate("GR").is_some());
        assert!(get_rate("EL").is_none());
    }

    #[test]
    fn united_kingdom_fixed_rates() {
        let gb = CountryCode::GB.rate();
        assert_eq!(gb.currency, "GBP");
        assert_eq!(gb.standard, dec!(20));
        assert_eq!(gb.reduced, vec![dec!(5)]);
    }
}
