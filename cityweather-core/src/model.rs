/// A geocoded place: the single value the resolve stage hands to the
/// forecast stage, then drops.
#[derive(Debug, Clone)]
pub struct Location {
    /// Latitude as the geocoder's decimal string, passed through verbatim
    /// so precision never round-trips through a float.
    pub latitude: String,
    /// Longitude, same representation as `latitude`.
    pub longitude: String,
    /// Display name picked from the address: city, else town, else
    /// village; empty when the address has none of them.
    pub place_name: String,
    pub country: String,
}

/// Conditions at the time of the forecast request.
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    /// Local ISO-8601 timestamp as reported by the service.
    pub time: String,
    pub is_day: bool,
}

/// One day of the forecast window, zipped out of the service's parallel
/// arrays by position.
#[derive(Debug, Clone)]
pub struct DailyForecast {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub weather_code: u16,
    pub precipitation_chance_pct: u8,
}

/// Everything one pipeline run renders: current conditions plus the
/// daily entries in service order. Built from one response, rendered,
/// then dropped.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}
