use std::io::Write;

use tokio::task::JoinHandle;

use crate::{
    codes, dates,
    error::{Error, Result},
    model::WeatherReport,
    service::{Service, forecast::ForecastClient, geocode::GeocodeClient},
};

/// Runs the two-stage pipeline once and writes the transcript to `out`.
///
/// Each stage runs as its own spawned task; its join handle is the
/// one-shot handoff back to this caller, so the result moves by value
/// and nothing is shared between tasks. The forecast stage starts only
/// after geocoding has succeeded, so the two network calls are never in
/// flight together. The first failing stage ends the run with its error
/// and nothing further is written.
pub async fn run_once<W: Write>(
    geocode: &GeocodeClient,
    forecast: &ForecastClient,
    city: &str,
    out: &mut W,
) -> Result<()> {
    let resolver = {
        let client = geocode.clone();
        let city = city.to_owned();
        tokio::spawn(async move { client.resolve(&city).await })
    };
    let location = join_stage(resolver, Service::Geocoding).await?;

    // User feedback while the forecast call is still ahead.
    writeln!(out, "City: {} , {}", location.place_name, location.country)?;

    let fetcher = {
        let client = forecast.clone();
        tokio::spawn(async move { client.fetch(&location.latitude, &location.longitude).await })
    };
    let report = join_stage(fetcher, Service::Forecast).await?;

    render_report(&report, out)
}

/// Waits for a stage task's single result. A worker that died without
/// reporting counts as a failed request for that stage; the orchestrator
/// never unwinds across a lost worker.
async fn join_stage<T>(handle: JoinHandle<Result<T>>, service: Service) -> Result<T> {
    match handle.await {
        Ok(result) => result,
        Err(err) => Err(Error::RequestFailed {
            service,
            detail: format!("stage worker lost: {err}"),
        }),
    }
}

/// Writes the current-conditions block, then one block per daily entry.
///
/// A day whose date fails to parse contributes a one-line parse notice
/// instead of its block; the remaining days still render and keep their
/// day numbers.
fn render_report<W: Write>(report: &WeatherReport, out: &mut W) -> Result<()> {
    let current = &report.current;

    writeln!(out)?;
    writeln!(out, "----- Current Weather -----")?;
    writeln!(out)?;
    writeln!(out, "Current temperature: {} °C", current.temperature_c)?;
    writeln!(
        out,
        "Windspeed: {} km/h {} °",
        current.wind_speed_kmh, current.wind_direction_deg
    )?;
    writeln!(out, "Time: {}", current.time)?;
    if current.is_day {
        writeln!(out, "It is currently day time")?;
    } else {
        writeln!(out, "It is currently night time")?;
    }

    writeln!(out)?;
    writeln!(out, "----- 7 Day Forecast -----")?;
    for (i, day) in report.daily.iter().enumerate() {
        let date = match dates::format_date(&day.date) {
            Ok(date) => date,
            Err(err) => {
                writeln!(out, "Date parse error: {err}")?;
                continue;
            }
        };

        writeln!(out)?;
        writeln!(out, "Day {} - {}", i + 1, date)?;
        writeln!(out, "  - High: {:.1}°C", day.temp_max_c)?;
        writeln!(out, "  - Low: {:.1}°C", day.temp_min_c)?;
        writeln!(out, "  - Weather: {}", codes::describe(day.weather_code))?;
        writeln!(out, "  - Rain chance: {}%", day.precipitation_chance_pct)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailyForecast};
    use crate::service::testutil::serve;

    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Json, Router, routing::get};
    use serde_json::{Value, json};

    fn current() -> CurrentConditions {
        CurrentConditions {
            temperature_c: 18.3,
            wind_speed_kmh: 11.2,
            wind_direction_deg: 215.0,
            time: "2025-05-15T14:30".to_string(),
            is_day: true,
        }
    }

    fn day(date: &str, max: f64, min: f64, code: u16, rain: u8) -> DailyForecast {
        DailyForecast {
            date: date.to_string(),
            temp_max_c: max,
            temp_min_c: min,
            weather_code: code,
            precipitation_chance_pct: rain,
        }
    }

    fn rendered(report: &WeatherReport) -> String {
        let mut out = Vec::new();
        render_report(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_the_exact_transcript() {
        let report = WeatherReport {
            current: current(),
            daily: vec![
                day("2025-05-15", 22.1, 11.4, 0, 10),
                day("2025-05-16", 19.0, 9.2, 61, 70),
            ],
        };

        let expected = "\
\n----- Current Weather -----\n\
\nCurrent temperature: 18.3 °C\n\
Windspeed: 11.2 km/h 215 °\n\
Time: 2025-05-15T14:30\n\
It is currently day time\n\
\n----- 7 Day Forecast -----\n\
\nDay 1 - Thursday 15/05\n\
\x20 - High: 22.1°C\n\
\x20 - Low: 11.4°C\n\
\x20 - Weather: Clear sky\n\
\x20 - Rain chance: 10%\n\
\nDay 2 - Friday 16/05\n\
\x20 - High: 19.0°C\n\
\x20 - Low: 9.2°C\n\
\x20 - Weather: Slight rain\n\
\x20 - Rain chance: 70%\n";

        assert_eq!(rendered(&report), expected);
    }

    #[test]
    fn night_line_when_not_day() {
        let mut report = WeatherReport { current: current(), daily: Vec::new() };
        report.current.is_day = false;

        let out = rendered(&report);
        assert!(out.contains("It is currently night time"));
        assert!(!out.contains("day time"));
    }

    #[test]
    fn bad_date_skips_that_day_only() {
        let report = WeatherReport {
            current: current(),
            daily: vec![
                day("2025-05-15", 22.1, 11.4, 0, 10),
                day("wednesday-ish", 19.0, 9.2, 61, 70),
                day("2025-05-17", 17.5, 8.0, 95, 95),
            ],
        };

        let out = rendered(&report);
        assert!(out.contains("Day 1 - Thursday 15/05"));
        assert!(out.contains("Date parse error: invalid calendar date \"wednesday-ish\""));
        assert!(!out.contains("Day 2"));
        // The skipped day keeps its number reserved.
        assert!(out.contains("Day 3 - Saturday 17/05"));
    }

    #[test]
    fn unknown_code_stays_visible_in_the_block() {
        let report = WeatherReport {
            current: current(),
            daily: vec![day("2025-05-15", 22.1, 11.4, 42, 10)],
        };

        assert!(rendered(&report).contains("  - Weather: Unknown condition (code 42)"));
    }

    #[tokio::test]
    async fn lost_stage_worker_is_a_request_failure() {
        let worker: JoinHandle<Result<()>> = tokio::spawn(async { panic!("worker died") });

        let err = join_stage(worker, Service::Forecast).await.unwrap_err();

        assert!(matches!(err, Error::RequestFailed { service: Service::Forecast, .. }), "{err}");
        assert!(err.to_string().contains("stage worker lost"), "{err}");
    }

    // --- end-to-end against in-process stand-ins for both services ---

    fn paris_candidates() -> Value {
        json!([{
            "lat": "48.8566",
            "lon": "2.3522",
            "address": {"city": "Paris", "country": "France"}
        }])
    }

    fn seven_day_payload() -> Value {
        json!({
            "current_weather": {
                "temperature": 18.3,
                "windspeed": 11.2,
                "winddirection": 215.0,
                "time": "2025-05-15T14:30",
                "is_day": 1
            },
            "daily": {
                "time": ["2025-05-15", "2025-05-16", "2025-05-17", "2025-05-18",
                         "2025-05-19", "2025-05-20", "2025-05-21"],
                "temperature_2m_max": [22.1, 19.0, 17.5, 20.2, 23.8, 24.4, 21.0],
                "temperature_2m_min": [11.4, 9.2, 8.0, 10.1, 12.6, 13.2, 11.9],
                "weathercode": [0, 61, 95, 2, 3, 45, 80],
                "precipitation_probability_max": [10, 70, 95, 20, 5, 0, 55]
            }
        })
    }

    #[tokio::test]
    async fn full_pipeline_renders_seven_days_for_paris() {
        let app = Router::new()
            .route("/search", get(|| async { Json(paris_candidates()) }))
            .route("/v1/forecast", get(|| async { Json(seven_day_payload()) }));
        let base = serve(app).await;

        let geocode = GeocodeClient::with_base_url(&base);
        let forecast = ForecastClient::with_base_url(&base);

        let mut out = Vec::new();
        run_once(&geocode, &forecast, "Paris", &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("City: Paris , France"), "{out}");
        assert_eq!(out.matches("\nDay ").count(), 7, "{out}");
        assert!(out.contains("It is currently day time"));

        // Index alignment: every served value comes back verbatim inside
        // its own day's block.
        let days = [
            ("Thursday 15/05", "22.1", "11.4", "Clear sky", "10"),
            ("Friday 16/05", "19.0", "9.2", "Slight rain", "70"),
            ("Saturday 17/05", "17.5", "8.0", "Thunderstorm", "95"),
            ("Sunday 18/05", "20.2", "10.1", "Partly cloudy", "20"),
            ("Monday 19/05", "23.8", "12.6", "Overcast", "5"),
            ("Tuesday 20/05", "24.4", "13.2", "Fog", "0"),
            ("Wednesday 21/05", "21.0", "11.9", "Slight rain showers", "55"),
        ];
        for (i, (date, high, low, weather, rain)) in days.iter().enumerate() {
            let block = format!(
                "Day {} - {date}\n  - High: {high}°C\n  - Low: {low}°C\n  - Weather: {weather}\n  - Rain chance: {rain}%\n",
                i + 1
            );
            assert!(out.contains(&block), "missing block:\n{block}\nin transcript:\n{out}");
        }
    }

    #[tokio::test]
    async fn geocode_miss_short_circuits_before_the_forecast_stage() {
        let forecast_hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/search", get(|| async { Json(json!([])) }))
            .route(
                "/v1/forecast",
                get({
                    let hits = forecast_hits.clone();
                    move || async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        Json(seven_day_payload())
                    }
                }),
            );
        let base = serve(app).await;

        let geocode = GeocodeClient::with_base_url(&base);
        let forecast = ForecastClient::with_base_url(&base);

        let mut out = Vec::new();
        let err = run_once(&geocode, &forecast, "xyzzy", &mut out).await.unwrap_err();

        assert!(matches!(err, Error::NotFound { ref query } if query == "xyzzy"));
        assert!(out.is_empty(), "nothing may be written for a failed resolve");
        assert_eq!(forecast_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forecast_failure_is_reported_after_the_feedback_line() {
        let app = Router::new()
            .route("/search", get(|| async { Json(paris_candidates()) }))
            .route("/v1/forecast", get(|| async { "no such endpoint" }));
        let base = serve(app).await;

        let geocode = GeocodeClient::with_base_url(&base);
        let forecast = ForecastClient::with_base_url(&base);

        let mut out = Vec::new();
        let err = run_once(&geocode, &forecast, "Paris", &mut out).await.unwrap_err();

        assert!(matches!(err, Error::DecodeFailed { service: Service::Forecast, .. }), "{err}");
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "City: Paris , France\n");
    }
}
