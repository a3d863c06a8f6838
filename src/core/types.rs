use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::countries::{CountryCode, as_member};
use super::error::VatRatesError;
use super::validation::validate_dataset;

/// VAT rates of one jurisdiction, all in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Display name (e.g. "Finland").
    pub country: String,
    /// ISO 4217 currency code (e.g. "EUR").
    pub currency: String,
    /// Standard rate.
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "rate_number::deserialize"
    )]
    pub standard: Decimal,
    /// Reduced rates, ascending. Includes rates that only apply in special
    /// territories of the jurisdiction. May be empty.
    #[serde(
        serialize_with = "float_seq::serialize",
        deserialize_with = "rate_number::deserialize_seq"
    )]
    pub reduced: Vec<Decimal>,
    /// Super-reduced rate, if the jurisdiction has one.
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "rate_number::deserialize_option",
        default
    )]
    pub super_reduced: Option<Decimal>,
    /// Transitional "parking" rate, if the jurisdiction has one.
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "rate_number::deserialize_option",
        default
    )]
    pub parking: Option<Decimal>,
}

/// A complete, versioned snapshot of the rate table.
///
/// Build one with [`Dataset::from_json`] (or any serde deserializer), which
/// validates every invariant; the embedded snapshot is available through
/// [`dataset()`](crate::dataset). The rate table is read-only from outside
/// the crate, so every `Dataset` a caller holds covers all jurisdictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DatasetDocument")]
pub struct Dataset {
    /// Snapshot identifier, conventionally the production date (`YYYY-MM-DD`).
    pub version: String,
    /// Upstream authority.
    pub source: String,
    /// Where the upstream authority publishes its rates.
    pub url: String,
    /// One record per covered jurisdiction.
    pub(crate) rates: BTreeMap<CountryCode, RateRecord>,
}

/// The resource format before validation.
#[derive(Deserialize)]
struct DatasetDocument {
    version: String,
    source: String,
    url: String,
    #[serde(deserialize_with = "unique_rates::deserialize")]
    rates: BTreeMap<CountryCode, RateRecord>,
}

impl TryFrom<DatasetDocument> for Dataset {
    type Error = VatRatesError;

    fn try_from(doc: DatasetDocument) -> Result<Self, Self::Error> {
        let dataset = Dataset {
            version: doc.version,
            source: doc.source,
            url: doc.url,
            rates: doc.rates,
        };
        let errors = validate_dataset(&dataset);
        if !errors.is_empty() {
            return Err(VatRatesError::Validation(errors));
        }
        Ok(dataset)
    }
}

impl Dataset {
    /// Parse and validate a document in the resource format.
    ///
    /// # Errors
    ///
    /// Returns `VatRatesError::Parse` on malformed JSON, schema mismatches and
    /// keys outside [`CountryCode::ALL`], and `VatRatesError::Validation` when
    /// the document breaks a dataset invariant (missing jurisdiction, negative
    /// or unsorted rates, empty names, bad currency codes).
    pub fn from_json(json: &str) -> Result<Self, VatRatesError> {
        let doc: DatasetDocument = serde_json::from_str(json)?;
        Dataset::try_from(doc)
    }

    /// Serialize in the resource format: 2-space indentation, trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, VatRatesError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// One record per covered jurisdiction, ordered by code.
    pub fn rates(&self) -> &BTreeMap<CountryCode, RateRecord> {
        &self.rates
    }

    /// Look up an arbitrary code. `None` if it is not a covered jurisdiction.
    pub fn get(&self, code: &str) -> Option<&RateRecord> {
        as_member(code).and_then(|c| self.rates.get(&c))
    }

    /// Look up a covered jurisdiction. Total: every `Dataset` outside this
    /// crate passed validation and holds all of [`CountryCode::ALL`].
    pub fn rate(&self, code: CountryCode) -> &RateRecord {
        &self.rates[&code]
    }

    /// Standard rate for an arbitrary code; same presence as [`Dataset::get`].
    pub fn standard_rate(&self, code: &str) -> Option<Decimal> {
        self.get(code).map(|r| r.standard)
    }

    /// Whether `code` has a record in this dataset.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// The version parsed as a calendar date, when it is one.
    pub fn version_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.version, "%Y-%m-%d").ok()
    }
}

/// Writes a list of decimals as JSON numbers.
mod float_seq {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::ser::{Error, SerializeSeq, Serializer};

    pub fn serialize<S: Serializer>(values: &[Decimal], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            let float = value
                .to_f64()
                .ok_or_else(|| S::Error::custom(format!("rate {value} does not fit in f64")))?;
            seq.serialize_element(&float)?;
        }
        seq.end()
    }
}

/// Reads rates from JSON numbers only. Strings are refused, and so are
/// numbers a `Decimal` cannot hold without rounding (e.g. `1e-30`).
mod rate_number {
    use super::*;

    fn to_decimal<E: de::Error>(number: &serde_json::Number) -> Result<Decimal, E> {
        let text = number.to_string();
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(&text)
        } else {
            Decimal::from_str(&text)
        };
        parsed.map_err(|e| E::custom(format!("rate {text} is not representable: {e}")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        to_decimal(&serde_json::Number::deserialize(deserializer)?)
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        Option::<serde_json::Number>::deserialize(deserializer)?
            .as_ref()
            .map(to_decimal)
            .transpose()
    }

    pub fn deserialize_seq<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Decimal>, D::Error> {
        Vec::<serde_json::Number>::deserialize(deserializer)?
            .iter()
            .map(to_decimal)
            .collect()
    }
}

/// Reads the `rates` object, refusing a jurisdiction that appears twice.
mod unique_rates {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<CountryCode, RateRecord>, D::Error> {
        deserializer.deserialize_map(RatesVisitor)
    }

    struct RatesVisitor;

    impl<'de> Visitor<'de> for RatesVisitor {
        type Value = BTreeMap<CountryCode, RateRecord>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping jurisdiction codes to rate records")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut rates = BTreeMap::new();
            while let Some((code, record)) = map.next_entry::<CountryCode, RateRecord>()? {
                if rates.insert(code, record).is_some() {
                    return Err(de::Error::custom(format!("duplicate jurisdiction {code}")));
                }
            }
            Ok(rates)
        }
    }
}
