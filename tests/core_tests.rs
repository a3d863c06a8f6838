use std::collections::BTreeSet;

use eu_vat_rates::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const UNKNOWN: &[&str] = &[
    "US", "CH", "NO", "IS", "LI", "EL", "XI", "EU", "UK", "de", "De", "", " ", "DEU", "D", "GR ",
    " FR", "123", "ÄT",
];

// ---------------------------------------------------------------------------
// Totality and membership
// ---------------------------------------------------------------------------

#[test]
fn every_covered_code_has_a_named_record() {
    for code in CountryCode::ALL {
        let r = get_rate(code.as_str()).unwrap_or_else(|| panic!("{code} missing"));
        assert!(!r.country.is_empty(), "{code} has an empty country name");
    }
}

#[test]
fn unknown_codes_are_absent_not_errors() {
    for s in UNKNOWN {
        assert!(get_rate(s).is_none(), "{s:?}");
        assert!(get_standard_rate(s).is_none(), "{s:?}");
        assert!(!is_eu_member(s), "{s:?}");
        assert!(as_member(s).is_none(), "{s:?}");
    }
}

#[test]
fn membership_iff_lookup() {
    let codes = CountryCode::ALL.iter().map(|c| c.as_str());
    for s in codes.chain(UNKNOWN.iter().copied()) {
        assert_eq!(is_eu_member(s), get_rate(s).is_some(), "{s:?}");
        assert_eq!(is_eu_member(s), as_member(s).is_some(), "{s:?}");
    }
}

#[test]
fn standard_rate_agrees_with_record() {
    let codes = CountryCode::ALL.iter().map(|c| c.as_str());
    for s in codes.chain(UNKNOWN.iter().copied()) {
        assert_eq!(get_standard_rate(s), get_rate(s).map(|r| r.standard), "{s:?}");
    }
}

#[test]
fn narrowed_lookups_match_string_lookups() {
    for code in CountryCode::ALL {
        assert_eq!(Some(code.rate()), get_rate(code.as_str()));
        assert_eq!(Some(code.standard_rate()), get_standard_rate(code.as_str()));
        assert_eq!(dataset().rate(code), code.rate());
    }
}

// ---------------------------------------------------------------------------
// Table shape
// ---------------------------------------------------------------------------

#[test]
fn reduced_rates_are_ascending() {
    for (code, r) in get_all_rates() {
        assert!(
            r.reduced.windows(2).all(|w| w[0] <= w[1]),
            "{code}: {:?}",
            r.reduced
        );
    }
}

#[test]
fn rates_are_non_negative() {
    for (code, r) in get_all_rates() {
        let all = std::iter::once(r.standard)
            .chain(r.reduced.iter().copied())
            .chain(r.super_reduced)
            .chain(r.parking);
        for rate in all {
            assert!(rate >= Decimal::ZERO, "{code}: {rate}");
        }
    }
}

#[test]
fn all_rates_covers_exactly_the_members() {
    let all = get_all_rates();
    assert_eq!(all.len(), CountryCode::ALL.len());
    let keys: BTreeSet<&str> = all.keys().map(|c| c.as_str()).collect();
    assert_eq!(keys.len(), 28, "duplicate keys");
    for code in CountryCode::ALL {
        assert!(all.contains_key(&code));
        assert!(is_eu_member(code.as_str()));
    }
}

#[test]
fn currencies_are_iso_4217_shaped() {
    for (code, r) in get_all_rates() {
        assert_eq!(r.currency.len(), 3, "{code}");
        assert!(is_known_currency_code(&r.currency), "{code}: {}", r.currency);
    }
}

#[test]
fn version_and_attribution() {
    assert_eq!(data_version(), dataset().version);
    assert!(!dataset().source.is_empty());
    assert!(dataset().url.starts_with("https://"));
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn finland() {
    let fi = get_rate("FI").unwrap();
    assert_eq!(fi.country, "Finland");
    assert_eq!(fi.currency, "EUR");
    assert!(fi.reduced.len() >= 2);
    assert!(fi.reduced[0] < fi.reduced[1]);
    assert!(fi.super_reduced.is_none());
    assert!(fi.parking.is_none());
}

#[test]
fn germany_standard_rate_in_range() {
    let de = get_standard_rate("DE").unwrap();
    assert!(de > dec!(0) && de < dec!(100), "{de}");
}

#[test]
fn united_states_is_not_covered() {
    assert!(!is_eu_member("US"));
    assert!(get_rate("US").is_none());
}

#[test]
fn greece_is_stored_under_gr() {
    let gr = get_rate("GR").unwrap();
    assert_eq!(gr.country, "Greece");
    assert!(get_rate("EL").is_none());
}

#[test]
fn twenty_eight_entries() {
    assert_eq!(get_all_rates().len(), 28);
}

#[test]
fn round_trip_through_resource_format() {
    let json = dataset().to_json_pretty().unwrap();
    let back = Dataset::from_json(&json).unwrap();
    assert_eq!(&back, dataset());
}

#[test]
fn embedded_resource_round_trips_verbatim_values() {
    let raw: serde_json::Value = serde_json::from_str(EMBEDDED_JSON).unwrap();
    let ours = serde_json::to_value(dataset()).unwrap();
    assert_eq!(raw, ours);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_readers_see_the_same_table() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                load();
                std::ptr::from_ref(dataset()) as usize
            })
        })
        .collect();
    let addrs: BTreeSet<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(addrs.len(), 1);
}
