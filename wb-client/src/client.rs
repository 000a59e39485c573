//! HTTP client for the World Bank REST v2 API.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::WbError;

/// Env-driven client configuration.
#[derive(Clone, Debug)]
pub struct WbConfig {
    /// API base, e.g. `https://api.worldbank.org/v2`.
    pub base: String,
    pub timeout_secs: u64,
    /// Retries after the first attempt.
    pub retries: u32,
}

impl WbConfig {
    pub fn from_env() -> Self {
        Self {
            base: std::env::var("WB_API_BASE")
                .unwrap_or_else(|_| "https://api.worldbank.org/v2".to_string()),
            timeout_secs: parse("WB_TIMEOUT_SECS", 10),
            retries: parse("WB_RETRIES", 2),
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

/// Result of one indicator fetch.
#[derive(Clone, Debug)]
pub struct FetchOutcome {
    /// The numeric value, when the API had one.
    pub value: Option<f64>,
    /// The year the value actually belongs to (may differ from requested).
    pub actual_year: Option<i32>,
    /// The exact URL queried, surfaced for observability.
    pub url: String,
}

/// World Bank API client with bounded retries and exponential backoff.
pub struct WorldBankClient {
    http: Client,
    base: String,
    retries: u32,
}

impl WorldBankClient {
    /// Builds the client.
    ///
    /// # Errors
    /// [`WbError::Transport`] if the HTTP client cannot be constructed.
    pub fn new(cfg: &WbConfig) -> Result<Self, WbError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base: cfg.base.trim_end_matches('/').to_string(),
            retries: cfg.retries,
        })
    }

    fn build_url(&self, country_code: &str, indicator_code: &str, time_param: &str) -> String {
        format!(
            "{}/country/{}/indicator/{}?{}&format=json&per_page=2000",
            self.base, country_code, indicator_code, time_param
        )
    }

    /// Fetches a URL as JSON, retrying transient failures.
    ///
    /// Backoff doubles from 500ms per attempt. Non-200 statuses count as
    /// failures (the WB API signals errors in-body with 200 sometimes, but
    /// those still parse and are handled by the caller).
    async fn fetch(&self, url: &str) -> Result<Value, WbError> {
        let attempts = self.retries + 1;
        let mut last_error = String::new();

        for attempt in 0..attempts {
            match self.http.get(url).send().await {
                Ok(resp) if resp.status().is_success() => match resp.json::<Value>().await {
                    Ok(payload) => return Ok(payload),
                    Err(e) => {
                        last_error = format!("bad JSON: {e}");
                        warn!("Response decode failed: {e}, attempt {}/{}", attempt + 1, attempts);
                    }
                },
                Ok(resp) => {
                    last_error = format!("HTTP {}", resp.status());
                    warn!(
                        "Request failed with {last_error}, attempt {}/{}",
                        attempt + 1,
                        attempts
                    );
                }
                Err(e) if e.is_timeout() => {
                    last_error = "request timeout".to_string();
                    warn!("Request timeout, attempt {}/{}", attempt + 1, attempts);
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!("Request error: {e}, attempt {}/{}", attempt + 1, attempts);
                }
            }

            if attempt + 1 < attempts {
                let wait = Duration::from_millis(500 * (1 << attempt));
                tokio::time::sleep(wait).await;
            }
        }

        Err(WbError::Upstream {
            attempts,
            last_error,
        })
    }

    /// Fetches one indicator value for one country.
    #[instrument(skip(self), fields(country = %country_code, indicator = %indicator_code))]
    pub async fn fetch_indicator(
        &self,
        country_code: &str,
        indicator_code: &str,
        time_param: &str,
        requested_year: Option<i32>,
    ) -> Result<FetchOutcome, WbError> {
        let url = self.build_url(country_code, indicator_code, time_param);
        debug!("GET {url}");
        let payload = self.fetch(&url).await?;
        let (value, actual_year) = parse_value(&payload, requested_year);
        Ok(FetchOutcome {
            value,
            actual_year,
            url,
        })
    }
}

/// Extracts `(value, year)` from a WB v2 payload: `[metadata, rows]`.
///
/// Prefers the exact requested year when it holds a non-null value, else
/// takes the first non-null row (the API orders newest first).
pub fn parse_value(payload: &Value, requested_year: Option<i32>) -> (Option<f64>, Option<i32>) {
    let Some(rows) = payload.get(1).and_then(|d| d.as_array()) else {
        return (None, None);
    };

    if let Some(want) = requested_year {
        for row in rows {
            let year = row
                .get("date")
                .and_then(|d| d.as_str())
                .and_then(|s| s.parse::<i32>().ok());
            if year == Some(want) {
                if let Some(value) = row.get("value").and_then(|v| v.as_f64()) {
                    return (Some(value), year);
                }
            }
        }
    }

    for row in rows {
        if let Some(value) = row.get("value").and_then(|v| v.as_f64()) {
            let year = row
                .get("date")
                .and_then(|d| d.as_str())
                .and_then(|s| s.parse::<i32>().ok());
            return (Some(value), year);
        }
    }

    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!([
            {"page": 1},
            [
                {"date": "2023", "value": null},
                {"date": "2022", "value": 1108571000000.0},
                {"date": "2021", "value": 868586000000.0}
            ]
        ])
    }

    #[test]
    fn prefers_exact_requested_year() {
        let (value, year) = parse_value(&payload(), Some(2021));
        assert_eq!(value, Some(868586000000.0));
        assert_eq!(year, Some(2021));
    }

    #[test]
    fn falls_back_to_first_non_null_row() {
        let (value, year) = parse_value(&payload(), Some(2023));
        assert_eq!(value, Some(1108571000000.0));
        assert_eq!(year, Some(2022));

        let (value, year) = parse_value(&payload(), None);
        assert_eq!(value, Some(1108571000000.0));
        assert_eq!(year, Some(2022));
    }

    #[test]
    fn malformed_payload_yields_nothing() {
        assert_eq!(parse_value(&json!({"error": "x"}), None), (None, None));
        assert_eq!(parse_value(&json!([{"page": 1}]), None), (None, None));
    }
}
