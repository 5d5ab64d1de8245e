use reqwest::Client;
use std::{fmt, time::Duration};

pub mod forecast;
pub mod geocode;

/// Identifies this tool to the upstream services; the geocoding service's
/// usage policy requires a non-default user agent.
const USER_AGENT: &str = concat!("cityweather/", env!("CARGO_PKG_VERSION"));

/// Upper bound on one HTTP round trip. A hung upstream surfaces as a
/// request failure instead of blocking the run forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which upstream a pipeline stage was talking to. Used in error
/// messages so a failed run names the service that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Geocoding,
    Forecast,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Geocoding => "geocoding",
            Service::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the HTTP client both service clients share the configuration
/// of. Panics only if the TLS backend cannot initialize, matching
/// `Client::new`.
pub(crate) fn http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("reqwest client with static configuration")
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // The cap can land inside a multi-byte char; back up to a boundary.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
