use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    model::{CurrentConditions, DailyForecast, WeatherReport},
    service::{self, Service, truncate_body},
};

/// Production forecast endpoint.
const OPEN_METEO_URL: &str = "https://api.open-meteo.com";

/// Daily variables requested from the forecast service. The response
/// carries them as parallel arrays, index-aligned with `daily.time`.
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,weathercode,precipitation_probability_max";

/// Client for the coordinates → current conditions + daily forecast call.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_URL)
    }

    /// Points the client at a different host, e.g. a local stand-in
    /// server when exercising the pipeline in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { http: service::http_client(), base_url: base_url.into() }
    }

    /// Fetches the weather report for a coordinate pair, forwarded as the
    /// geocoder's decimal strings.
    ///
    /// Every failure comes back as a typed error; this call never writes
    /// to the console itself.
    pub async fn fetch(&self, latitude: &str, longitude: &str) -> Result<WeatherReport> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude),
                ("longitude", longitude),
                ("daily", DAILY_FIELDS),
                ("current_weather", "true"),
                ("timezone", "auto"),
                ("timeformat", "iso8601"),
            ])
            .send()
            .await
            .map_err(|err| Error::RequestFailed {
                service: Service::Forecast,
                detail: err.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| Error::RequestFailed {
            service: Service::Forecast,
            detail: format!("failed to read response body: {err}"),
        })?;

        if !status.is_success() {
            return Err(Error::RequestFailed {
                service: Service::Forecast,
                detail: format!("status {}: {}", status, truncate_body(&body)),
            });
        }

        parse_report(&body)
    }
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes the response body and zips the daily parallel arrays into one
/// entry per day.
///
/// A length disagreement between the arrays means the service broke its
/// contract; that is a decode failure, never a silent truncation to the
/// shortest array.
fn parse_report(body: &str) -> Result<WeatherReport> {
    let ForecastResponse { current_weather, daily } =
        serde_json::from_str(body).map_err(|err| Error::DecodeFailed {
            service: Service::Forecast,
            detail: err.to_string(),
        })?;

    let len = daily.time.len();
    if daily.temperature_max.len() != len
        || daily.temperature_min.len() != len
        || daily.weather_code.len() != len
        || daily.precipitation_probability.len() != len
    {
        return Err(Error::DecodeFailed {
            service: Service::Forecast,
            detail: format!(
                "daily arrays disagree on length: time={}, max={}, min={}, code={}, rain={}",
                len,
                daily.temperature_max.len(),
                daily.temperature_min.len(),
                daily.weather_code.len(),
                daily.precipitation_probability.len(),
            ),
        });
    }

    let current = CurrentConditions {
        temperature_c: current_weather.temperature,
        wind_speed_kmh: current_weather.windspeed,
        wind_direction_deg: current_weather.winddirection,
        time: current_weather.time,
        is_day: current_weather.is_day == 1,
    };

    let entries = (0..len)
        .map(|i| DailyForecast {
            date: daily.time[i].clone(),
            temp_max_c: daily.temperature_max[i],
            temp_min_c: daily.temperature_min[i],
            weather_code: daily.weather_code[i],
            precipitation_chance_pct: daily.precipitation_probability[i],
        })
        .collect();

    Ok(WeatherReport { current, daily: entries })
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    time: String,
    is_day: u8,
}

#[derive(Debug, Deserialize)]
struct DailyArrays {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Vec<f64>,
    #[serde(rename = "weathercode")]
    weather_code: Vec<u16>,
    #[serde(rename = "precipitation_probability_max")]
    precipitation_probability: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    daily: DailyArrays,
}
