//! Server configuration, read from the environment (after `.env` is loaded).

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Fiscal year stamped on placeholder figures
    pub fiscal_year: i32,
    /// Empty means any origin is allowed
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_raw = lookup("RATIO_API_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().with_context(|| {
            format!("RATIO_API_BIND_ADDR is not a socket address: {}", bind_raw)
        })?;

        let fiscal_year = match lookup("RATIO_API_FISCAL_YEAR") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .with_context(|| format!("RATIO_API_FISCAL_YEAR is not a year: {}", raw))?,
            None => filings_client::DEFAULT_FISCAL_YEAR,
        };

        let cors_origins = lookup("RATIO_API_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|origin| {
                        HeaderValue::from_str(origin)
                            .with_context(|| format!("Invalid CORS origin: {}", origin))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            fiscal_year,
            cors_origins,
        })
    }

    pub fn cors_layer(&self) -> CorsLayer {
        if self.cors_origins.is_empty() {
            return CorsLayer::permissive();
        }
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.cors_origins.clone()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            fiscal_year: filings_client::DEFAULT_FISCAL_YEAR,
            cors_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.fiscal_year, 2024);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("RATIO_API_BIND_ADDR", "127.0.0.1:8080"),
            ("RATIO_API_FISCAL_YEAR", " 2023 "),
            (
                "RATIO_API_CORS_ORIGINS",
                "http://localhost:5173, https://ratios.example.com,",
            ),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.fiscal_year, 2023);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_invalid_values_fail() {
        let cases = [
            ("RATIO_API_BIND_ADDR", "nowhere"),
            ("RATIO_API_FISCAL_YEAR", "FY24"),
            ("RATIO_API_CORS_ORIGINS", "bad\norigin"),
        ];
        for (key, value) in cases {
            let result = ServerConfig::from_lookup(lookup(&[(key, value)]));
            assert!(result.is_err(), "{key}={value:?} should be rejected");
        }
    }
}
