//! SOAP envelope construction and response parsing for `RetrieveVatRates`.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;

use super::error::TedbError;
use super::xml_utils::{XmlWriter, local_name};
use super::{TEDB_NS_MSG, TEDB_NS_TYPES, to_iso_code};

/// Rates reported upstream for one member state, before it becomes a
/// [`RateRecord`](crate::RateRecord).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamRecord {
    /// Highest `STANDARD`/`DEFAULT` value, if any was reported.
    pub standard: Option<Decimal>,
    /// Unique `REDUCED_RATE` values, ascending.
    pub reduced: Vec<Decimal>,
    /// Lowest `SUPER_REDUCED_RATE` value.
    pub super_reduced: Option<Decimal>,
    /// Lowest `PARKING_RATE` value.
    pub parking: Option<Decimal>,
}

/// Upstream rates keyed by ISO code (Greece already remapped to `GR`).
pub type UpstreamRates = BTreeMap<String, UpstreamRecord>;

/// Rate value types that do not describe a positive VAT rate.
const SKIP_RATE_TYPES: &[&str] = &["EXEMPTED", "OUT_OF_SCOPE", "NOT_APPLICABLE"];

/// Build the `retrieveVatRatesReqMsg` envelope.
pub fn soap_request_body(
    member_states: &[&str],
    situation_on: NaiveDate,
) -> Result<String, TedbError> {
    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", "http://schemas.xmlsoap.org/soap/envelope/"),
            ("xmlns:v1", TEDB_NS_MSG),
            ("xmlns:types", TEDB_NS_TYPES),
        ],
    )?;
    w.start_element("soapenv:Body")?;
    w.start_element("v1:retrieveVatRatesReqMsg")?;
    w.start_element("types:memberStates")?;
    for state in member_states {
        w.text_element("types:isoCode", state)?;
    }
    w.end_element("types:memberStates")?;
    w.text_element(
        "types:situationOn",
        &situation_on.format("%Y-%m-%d").to_string(),
    )?;
    w.end_element("v1:retrieveVatRatesReqMsg")?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;
    w.into_string()
}

/// Fields collected from one `vatRateResults` element.
#[derive(Default)]
struct RateResult {
    member_state: Option<String>,
    outer_type: Option<String>,
    rate_type: Option<String>,
    value: Option<Decimal>,
}

/// Value sets accumulated per member state.
#[derive(Default)]
struct Accumulator {
    standard: BTreeSet<Decimal>,
    reduced: BTreeSet<Decimal>,
    super_reduced: BTreeSet<Decimal>,
    parking: BTreeSet<Decimal>,
}

impl Accumulator {
    fn add(&mut self, outer_type: &str, rate_type: &str, value: Decimal) {
        match (outer_type, rate_type) {
            ("STANDARD", "DEFAULT") => {
                self.standard.insert(value);
            }
            ("REDUCED", "REDUCED_RATE") => {
                self.reduced.insert(value);
            }
            ("REDUCED", "SUPER_REDUCED_RATE") => {
                self.super_reduced.insert(value);
            }
            ("REDUCED", "PARKING_RATE") => {
                self.parking.insert(value);
            }
            _ => {}
        }
    }

    fn finish(self) -> UpstreamRecord {
        UpstreamRecord {
            standard: self.standard.last().copied(),
            reduced: self.reduced.into_iter().collect(),
            // Several values occur for special territories; keep the lowest.
            super_reduced: self.super_reduced.first().copied(),
            parking: self.parking.first().copied(),
        }
    }
}

/// Parse a `retrieveVatRatesRespMsg` document.
///
/// Namespace prefixes are ignored. Results with missing fields, non-rate
/// value types, or values that are unparseable or not positive are skipped.
///
/// # Errors
///
/// `TedbError::Parse` on malformed XML, `TedbError::Api` on a SOAP fault,
/// `TedbError::Empty` when no usable rate was found.
pub fn parse_soap_response(xml: &str) -> Result<UpstreamRates, TedbError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut current: Option<(usize, RateResult)> = None;
    let mut fault: Option<String> = None;
    let mut acc: BTreeMap<String, Accumulator> = BTreeMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "vatRateResults" && current.is_none() {
                    current = Some((path.len(), RateResult::default()));
                }
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| TedbError::Parse(e.to_string()))?
                    .trim()
                    .to_string();
                if text.is_empty() {
                    continue;
                }
                if path.last().is_some_and(|n| n == "faultstring") {
                    fault = Some(text);
                    continue;
                }
                if let Some((base, result)) = current.as_mut() {
                    let rel: Vec<&str> = path[*base + 1..].iter().map(String::as_str).collect();
                    match rel.as_slice() {
                        ["memberState"] => result.member_state = Some(to_iso_code(&text).into()),
                        ["type"] => result.outer_type = Some(text),
                        ["rate", "type"] => result.rate_type = Some(text),
                        ["rate", "value"] => result.value = Decimal::from_str(&text).ok(),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
                if current.as_ref().is_some_and(|(base, _)| *base == path.len()) {
                    if let Some((_, result)) = current.take() {
                        collect(result, &mut acc);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TedbError::Parse(format!(
                    "error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    if let Some(fault) = fault {
        return Err(TedbError::Api(fault));
    }
    if acc.is_empty() {
        return Err(TedbError::Empty);
    }
    Ok(acc.into_iter().map(|(k, v)| (k, v.finish())).collect())
}

fn collect(result: RateResult, acc: &mut BTreeMap<String, Accumulator>) {
    let (Some(code), Some(outer_type), Some(rate_type)) =
        (result.member_state, result.outer_type, result.rate_type)
    else {
        return;
    };
    if code.is_empty() || SKIP_RATE_TYPES.contains(&rate_type.as_str()) {
        return;
    }
    let Some(value) = result.value.filter(|v| *v > Decimal::ZERO) else {
        return;
    };
    acc.entry(code)
        .or_default()
        .add(&outer_type, &rate_type, value);
}
