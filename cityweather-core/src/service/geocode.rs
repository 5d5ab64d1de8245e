use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    model::Location,
    service::{self, Service, truncate_body},
};

/// Production geocoding endpoint.
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Client for the free-text city → coordinates lookup.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Points the client at a different host, e.g. a local stand-in
    /// server when exercising the pipeline in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { http: service::http_client(), base_url: base_url.into() }
    }

    /// Resolves arbitrary user input to coordinates and a display name.
    ///
    /// The query serializer percent-encodes the city, so raw user text is
    /// safe here. The first candidate wins; there is no ranking. An empty
    /// candidate list is [`Error::NotFound`], never a decode failure.
    pub async fn resolve(&self, city: &str) -> Result<Location> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("format", "json"), ("addressdetails", "1")])
            .send()
            .await
            .map_err(|err| Error::RequestFailed {
                service: Service::Geocoding,
                detail: err.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| Error::RequestFailed {
            service: Service::Geocoding,
            detail: format!("failed to read response body: {err}"),
        })?;

        if !status.is_success() {
            return Err(Error::RequestFailed {
                service: Service::Geocoding,
                detail: format!("status {}: {}", status, truncate_body(&body)),
            });
        }

        parse_location(&body, city)
    }
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes the candidate array and extracts the first match.
fn parse_location(body: &str, query: &str) -> Result<Location> {
    let candidates: Vec<Candidate> =
        serde_json::from_str(body).map_err(|err| Error::DecodeFailed {
            service: Service::Geocoding,
            detail: err.to_string(),
        })?;

    let candidate = candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound { query: query.to_string() })?;

    let place_name = candidate.address.place_name().to_owned();

    Ok(Location {
        latitude: candidate.lat,
        longitude: candidate.lon,
        place_name,
        country: candidate.address.country.unwrap_or_default(),
    })
}

#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

impl Address {
    /// Display-name preference: city, else town, else village; the first
    /// non-empty field wins and an address carrying none of them names an
    /// empty place.
    fn place_name(&self) -> &str {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|name| !name.is_empty())
            .unwrap_or("")
    }
}
