use rust_decimal::Decimal;

use super::countries::CountryCode;
use super::currencies::is_known_currency_code;
use super::error::ValidationError;
use super::types::*;

/// Validate a dataset against the invariants every consumer relies on.
/// Returns all validation errors found (not just the first).
///
/// Relative ordering between standard, reduced, super-reduced and parking
/// rates is not checked: upstream data is taken as published.
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if dataset.version.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "version",
            "version must not be empty",
            "version-present",
        ));
    }

    // Unknown keys cannot be represented at all; only gaps are possible.
    for code in CountryCode::ALL {
        if !dataset.rates.contains_key(&code) {
            errors.push(ValidationError::with_rule(
                format!("rates.{code}"),
                "jurisdiction is missing from the dataset",
                "complete-key-set",
            ));
        }
    }

    for (code, record) in &dataset.rates {
        validate_record(record, &format!("rates.{code}"), &mut errors);
    }

    errors
}

fn validate_record(record: &RateRecord, path: &str, errors: &mut Vec<ValidationError>) {
    if record.country.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{path}.country"),
            "country name must not be empty",
            "country-present",
        ));
    }

    let currency = &record.currency;
    if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
        errors.push(ValidationError::with_rule(
            format!("{path}.currency"),
            format!("currency '{currency}' must be 3 uppercase letters (ISO 4217)"),
            "currency-format",
        ));
    } else if !is_known_currency_code(currency) {
        errors.push(ValidationError::with_rule(
            format!("{path}.currency"),
            format!("currency '{currency}' is not used by any covered jurisdiction"),
            "currency-known",
        ));
    }

    check_non_negative(record.standard, &format!("{path}.standard"), errors);
    for (i, rate) in record.reduced.iter().enumerate() {
        check_non_negative(*rate, &format!("{path}.reduced[{i}]"), errors);
    }
    if let Some(rate) = record.super_reduced {
        check_non_negative(rate, &format!("{path}.super_reduced"), errors);
    }
    if let Some(rate) = record.parking {
        check_non_negative(rate, &format!("{path}.parking"), errors);
    }

    // Duplicates are allowed; only a descent is an error.
    if let Some(i) = record.reduced.windows(2).position(|w| w[0] > w[1]) {
        errors.push(ValidationError::with_rule(
            format!("{path}.reduced"),
            format!(
                "reduced rates must be ascending, found {} before {}",
                record.reduced[i],
                record.reduced[i + 1]
            ),
            "reduced-sorted",
        ));
    }
}

fn check_non_negative(rate: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if rate < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            field,
            format!("rate {rate} must not be negative"),
            "non-negative",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn record(standard: Decimal, reduced: Vec<Decimal>) -> RateRecord {
        RateRecord {
            country: "Testland".into(),
            currency: "EUR".into(),
            standard,
            reduced,
            super_reduced: None,
            parking: None,
        }
    }

    fn complete() -> Dataset {
        Dataset {
            version: "2025-01-01".into(),
            source: "test".into(),
            url: "https://example.invalid".into(),
            rates: CountryCode::ALL
                .iter()
                .map(|c| (*c, record(dec!(20), vec![dec!(5), dec!(10)])))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn rules(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().filter_map(|e| e.rule.as_deref()).collect()
    }

    #[test]
    fn complete_dataset_is_valid() {
        assert!(validate_dataset(&complete()).is_empty());
    }

    #[test]
    fn missing_jurisdiction() {
        let mut ds = complete();
        ds.rates.remove(&CountryCode::GR);
        let errors = validate_dataset(&ds);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rates.GR");
        assert_eq!(rules(&errors), ["complete-key-set"]);
    }

    #[test]
    fn unsorted_reduced() {
        let mut ds = complete();
        ds.rates.get_mut(&CountryCode::FI).unwrap().reduced = vec![dec!(14), dec!(10)];
        let errors = validate_dataset(&ds);
        assert_eq!(rules(&errors), ["reduced-sorted"]);
        assert_eq!(errors[0].field, "rates.FI.reduced");
    }

    #[test]
    fn duplicate_reduced_allowed() {
        let mut ds = complete();
        ds.rates.get_mut(&CountryCode::PT).unwrap().reduced = vec![dec!(6), dec!(6), dec!(13)];
        assert!(validate_dataset(&ds).is_empty());
    }

    #[test]
    fn negative_rates() {
        let mut ds = complete();
        let r = ds.rates.get_mut(&CountryCode::IE).unwrap();
        r.standard = dec!(-1);
        r.parking = Some(dec!(-13.5));
        let errors = validate_dataset(&ds);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["rates.IE.standard", "rates.IE.parking"]);
    }

    #[test]
    fn zero_rate_allowed() {
        let mut ds = complete();
        ds.rates.get_mut(&CountryCode::DK).unwrap().standard = dec!(0);
        assert!(validate_dataset(&ds).is_empty());
    }

    #[test]
    fn no_ordering_between_rate_kinds() {
        let mut ds = complete();
        let r = ds.rates.get_mut(&CountryCode::LU).unwrap();
        r.super_reduced = Some(dec!(30));
        r.parking = Some(dec!(1));
        assert!(validate_dataset(&ds).is_empty());
    }

    #[test]
    fn bad_currency() {
        let mut ds = complete();
        ds.rates.get_mut(&CountryCode::SE).unwrap().currency = "sek".into();
        ds.rates.get_mut(&CountryCode::PL).unwrap().currency = "USD".into();
        let errors = validate_dataset(&ds);
        assert_eq!(rules(&errors), ["currency-known", "currency-format"]);
    }

    #[test]
    fn empty_country_and_version() {
        let mut ds = complete();
        ds.version = " ".into();
        ds.rates.get_mut(&CountryCode::AT).unwrap().country = String::new();
        let errors = validate_dataset(&ds);
        assert_eq!(rules(&errors), ["version-present", "country-present"]);
        assert_eq!(
            errors[1].to_string(),
            "[country-present] rates.AT.country: country name must not be empty"
        );
    }
}
