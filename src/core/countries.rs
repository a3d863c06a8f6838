//! The closed set of covered jurisdiction codes.
//!
//! ISO 3166-1 alpha-2 codes for the EU-27 plus the United Kingdom. Greece is
//! `GR` here even though the European Commission uses `EL` internally; the
//! remap happens when a snapshot is produced, never during lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A jurisdiction covered by the dataset.
///
/// Variants are declared in code order, so `Ord` and iteration over
/// [`CountryCode::ALL`] follow the alphabetical order of the codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CountryCode {
    /// Austria.
    AT,
    /// Belgium.
    BE,
    /// Bulgaria.
    BG,
    /// Cyprus.
    CY,
    /// Czech Republic.
    CZ,
    /// Germany.
    DE,
    /// Denmark.
    DK,
    /// Estonia.
    EE,
    /// Spain.
    ES,
    /// Finland.
    FI,
    /// France.
    FR,
    /// United Kingdom.
    GB,
    /// Greece (`EL` upstream).
    GR,
    /// Croatia.
    HR,
    /// Hungary.
    HU,
    /// Ireland.
    IE,
    /// Italy.
    IT,
    /// Lithuania.
    LT,
    /// Luxembourg.
    LU,
    /// Latvia.
    LV,
    /// Malta.
    MT,
    /// Netherlands.
    NL,
    /// Poland.
    PL,
    /// Portugal.
    PT,
    /// Romania.
    RO,
    /// Sweden.
    SE,
    /// Slovenia.
    SI,
    /// Slovakia.
    SK,
}

impl CountryCode {
    /// Every covered jurisdiction, sorted by code.
    pub const ALL: [CountryCode; 28] = [
        Self::AT,
        Self::BE,
        Self::BG,
        Self::CY,
        Self::CZ,
        Self::DE,
        Self::DK,
        Self::EE,
        Self::ES,
        Self::FI,
        Self::FR,
        Self::GB,
        Self::GR,
        Self::HR,
        Self::HU,
        Self::IE,
        Self::IT,
        Self::LT,
        Self::LU,
        Self::LV,
        Self::MT,
        Self::NL,
        Self::PL,
        Self::PT,
        Self::RO,
        Self::SE,
        Self::SI,
        Self::SK,
    ];

    /// The two-letter code, e.g. `"DE"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AT => "AT",
            Self::BE => "BE",
            Self::BG => "BG",
            Self::CY => "CY",
            Self::CZ => "CZ",
            Self::DE => "DE",
            Self::DK => "DK",
            Self::EE => "EE",
            Self::ES => "ES",
            Self::FI => "FI",
            Self::FR => "FR",
            Self::GB => "GB",
            Self::GR => "GR",
            Self::HR => "HR",
            Self::HU => "HU",
            Self::IE => "IE",
            Self::IT => "IT",
            Self::LT => "LT",
            Self::LU => "LU",
            Self::LV => "LV",
            Self::MT => "MT",
            Self::NL => "NL",
            Self::PL => "PL",
            Self::PT => "PT",
            Self::RO => "RO",
            Self::SE => "SE",
            Self::SI => "SI",
            Self::SK => "SK",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the covered jurisdiction codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCountryCode(pub String);

impl fmt::Display for UnknownCountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown jurisdiction code '{}'", self.0)
    }
}

impl std::error::Error for UnknownCountryCode {}

impl FromStr for CountryCode {
    type Err = UnknownCountryCode;

    /// Exact, case-sensitive match against [`CountryCode::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        as_member(s).ok_or_else(|| UnknownCountryCode(s.to_string()))
    }
}

impl TryFrom<&str> for CountryCode {
    type Error = UnknownCountryCode;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for CountryCode {
    type Error = UnknownCountryCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        as_member(&s).ok_or(UnknownCountryCode(s))
    }
}

impl From<CountryCode> for &'static str {
    fn from(code: CountryCode) -> Self {
        code.as_str()
    }
}

/// Narrow an arbitrary string to a [`CountryCode`].
///
/// `Some` exactly when the code is covered by the dataset. No trimming or
/// case folding: `"de"` and `"EL"` are not members.
pub fn as_member(code: &str) -> Option<CountryCode> {
    CountryCode::ALL
        .binary_search_by(|c| c.as_str().cmp(code))
        .ok()
        .map(|i| CountryCode::ALL[i])
}
