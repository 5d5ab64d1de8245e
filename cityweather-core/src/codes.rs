//! Static table of weather interpretation codes.
//!
//! The forecast service enumerates discrete weather phenomena as integer
//! codes (0–99, sparse); the descriptions below are its published list,
//! taken as-is. The table is compiled in, never mutated, and safe to read
//! from any number of tasks without synchronization.

/// Condition codes and their descriptions, sorted by code.
static WEATHER_CODES: &[(u16, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Human description for a condition code.
///
/// Codes outside the published table come back as an explicit
/// `Unknown condition (code N)` so a novel or corrupt code stays visible
/// in the rendered forecast instead of leaving the field blank.
pub fn describe(code: u16) -> String {
    match WEATHER_CODES.binary_search_by_key(&code, |&(c, _)| c) {
        Ok(idx) => WEATHER_CODES[idx].1.to_string(),
        Err(_) => format!("Unknown condition (code {code})"),
    }
}
