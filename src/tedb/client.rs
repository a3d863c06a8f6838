//! TEDB SOAP client.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;

use super::error::TedbError;
use super::soap::{UpstreamRates, parse_soap_response, soap_request_body};
use super::{TEDB_ENDPOINT, TEDB_MEMBER_STATES, TEDB_SOAP_ACTION};

/// Where and how to query TEDB.
#[derive(Debug, Clone)]
pub struct TedbConfig {
    /// SOAP endpoint URL.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Date the rates must be valid on.
    pub situation_on: NaiveDate,
}

impl Default for TedbConfig {
    /// Official endpoint, 60 second timeout, rates valid today.
    fn default() -> Self {
        Self {
            endpoint: TEDB_ENDPOINT.into(),
            timeout: Duration::from_secs(60),
            situation_on: chrono::Local::now().date_naive(),
        }
    }
}

/// Query TEDB for the current rates of all member states.
///
/// This function is async and requires network access.
/// TEDB needs no authentication.
///
/// # Errors
///
/// Returns `TedbError::Network` on connection issues,
/// `TedbError::Api` on non-success responses and SOAP faults,
/// `TedbError::Parse` / `TedbError::Empty` on unusable response bodies.
pub async fn fetch_rates(config: &TedbConfig) -> Result<UpstreamRates, TedbError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| TedbError::Network(e.to_string()))?;

    let body = soap_request_body(&TEDB_MEMBER_STATES, config.situation_on)?;

    tracing::info!(endpoint = %config.endpoint, situation_on = %config.situation_on, "requesting TEDB rates");
    let resp = client
        .post(&config.endpoint)
        .header(CONTENT_TYPE, "text/xml; charset=utf-8")
        .header("SOAPAction", TEDB_SOAP_ACTION)
        .body(body)
        .send()
        .await
        .map_err(|e| TedbError::Network(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| TedbError::Network(e.to_string()))?;

    if !status.is_success() {
        // SOAP faults come back as HTTP 500 with a useful faultstring.
        return Err(match parse_soap_response(&text) {
            Err(TedbError::Api(fault)) => TedbError::Api(format!("HTTP {status}: {fault}")),
            _ => TedbError::Api(format!("HTTP {status}")),
        });
    }

    let rates = parse_soap_response(&text)?;
    tracing::info!(member_states = rates.len(), "received TEDB rates");
    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_official_endpoint() {
        let config = TedbConfig::default();
        assert_eq!(config.endpoint, TEDB_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let config = TedbConfig {
            endpoint: "http://127.0.0.1:9/".into(),
            timeout: Duration::from_secs(2),
            situation_on: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
        };
        let err = fetch_rates(&config).await.unwrap_err();
        assert!(matches!(err, TedbError::Network(_)), "{err}");
    }
}
