use std::fmt;

use crate::core::{CountryCode, ValidationError};

/// Error from the TEDB refresh pipeline.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TedbError {
    /// Network or HTTP transport error.
    Network(String),
    /// The service answered with a non-success status or a SOAP fault.
    Api(String),
    /// The response is not well-formed XML.
    Parse(String),
    /// The response parsed but contained no usable rates.
    Empty,
    /// A covered member state is absent from the upstream answer.
    MissingCountry(CountryCode),
    /// The assembled snapshot breaks a dataset invariant.
    Invalid(Vec<ValidationError>),
    /// Building the request document failed.
    Xml(String),
    /// Reading or writing the dataset file failed.
    Io(String),
}

impl fmt::Display for TedbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "TEDB network error: {e}"),
            Self::Api(e) => write!(f, "TEDB API error: {e}"),
            Self::Parse(e) => write!(f, "TEDB parse error: {e}"),
            Self::Empty => write!(f, "TEDB response yielded no rates"),
            Self::MissingCountry(c) => write!(f, "TEDB returned no rates for {c}"),
            Self::Invalid(errors) => {
                write!(f, "snapshot failed validation:")?;
                for e in errors {
                    write!(f, " {e};")?;
                }
                Ok(())
            }
            Self::Xml(e) => write!(f, "SOAP request error: {e}"),
            Self::Io(e) => write!(f, "dataset file error: {e}"),
        }
    }
}

impl std::error::Error for TedbError {}
