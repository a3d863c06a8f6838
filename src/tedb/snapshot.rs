//! Assemble a publishable [`Dataset`] from upstream rates.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::error::TedbError;
use super::soap::{UpstreamRates, UpstreamRecord};
use super::{TEDB_SOURCE, TEDB_URL};
use crate::core::currencies::national_currency;
use crate::core::{CountryCode, Dataset, RateRecord, validate_dataset};

/// English display name written into each record.
pub fn country_name(code: CountryCode) -> &'static str {
    match code {
        CountryCode::AT => "Austria",
        CountryCode::BE => "Belgium",
        CountryCode::BG => "Bulgaria",
        CountryCode::CY => "Cyprus",
        CountryCode::CZ => "Czech Republic",
        CountryCode::DE => "Germany",
        CountryCode::DK => "Denmark",
        CountryCode::EE => "Estonia",
        CountryCode::ES => "Spain",
        CountryCode::FI => "Finland",
        CountryCode::FR => "France",
        CountryCode::GB => "United Kingdom",
        CountryCode::GR => "Greece",
        CountryCode::HR => "Croatia",
        CountryCode::HU => "Hungary",
        CountryCode::IE => "Ireland",
        CountryCode::IT => "Italy",
        CountryCode::LT => "Lithuania",
        CountryCode::LU => "Luxembourg",
        CountryCode::LV => "Latvia",
        CountryCode::MT => "Malta",
        CountryCode::NL => "Netherlands",
        CountryCode::PL => "Poland",
        CountryCode::PT => "Portugal",
        CountryCode::RO => "Romania",
        CountryCode::SE => "Sweden",
        CountryCode::SI => "Slovenia",
        CountryCode::SK => "Slovakia",
    }
}

/// UK rates, maintained by hand: TEDB only covers the EU-27.
///
/// Unchanged since 2011; update here if HMRC changes them.
pub fn uk_rates() -> UpstreamRecord {
    UpstreamRecord {
        standard: Some(dec!(20)),
        reduced: vec![dec!(5)],
        super_reduced: None,
        parking: None,
    }
}

/// Build a complete snapshot stamped with `version`, with currencies as
/// they stand on `situation_on`.
///
/// # Errors
///
/// `TedbError::MissingCountry` if a member state has no record or no
/// standard rate upstream; `TedbError::Invalid` if the result breaks a
/// dataset invariant. An incomplete snapshot is never returned.
pub fn build_dataset(
    upstream: &UpstreamRates,
    version: &str,
    situation_on: NaiveDate,
) -> Result<Dataset, TedbError> {
    let mut rates = BTreeMap::new();

    for code in CountryCode::ALL {
        let entry = if code == CountryCode::GB {
            uk_rates()
        } else {
            match upstream.get(code.as_str()) {
                Some(entry) => entry.clone(),
                None => {
                    tracing::warn!(%code, "no upstream data");
                    return Err(TedbError::MissingCountry(code));
                }
            }
        };
        let Some(standard) = entry.standard else {
            tracing::warn!(%code, "no upstream standard rate");
            return Err(TedbError::MissingCountry(code));
        };

        let mut reduced = entry.reduced;
        reduced.sort();

        rates.insert(
            code,
            RateRecord {
                country: country_name(code).into(),
                currency: national_currency(code, situation_on).into(),
                standard,
                reduced,
                super_reduced: entry.super_reduced,
                parking: entry.parking,
            },
        );
    }

    let dataset = Dataset {
        version: version.into(),
        source: TEDB_SOURCE.into(),
        url: TEDB_URL.into(),
        rates,
    };

    let errors = validate_dataset(&dataset);
    if !errors.is_empty() {
        return Err(TedbError::Invalid(errors));
    }
    Ok(dataset)
}

/// Write `dataset` in the resource format, creating parent directories.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<(), TedbError> {
    let json = dataset
        .to_json_pretty()
        .map_err(|e| TedbError::Io(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| TedbError::Io(format!("{}: {e}", parent.display())))?;
    }
    std::fs::write(path, json).map_err(|e| TedbError::Io(format!("{}: {e}", path.display())))
}
