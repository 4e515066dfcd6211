//! OpenWeatherMap payload decoding
//!
//! Converts the "current weather" and "5 day / 3 hour forecast" documents
//! (metric units) into the advisor's observation model. Fetching the
//! documents is left to the caller.

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{CurrentConditions, ObservationPoint};

use crate::error::{AppError, AppResult};

/// Assumed when the payload omits visibility
const DEFAULT_VISIBILITY_METERS: i64 = 10_000;

const MPS_TO_KMH: Decimal = Decimal::from_parts(36, 0, 0, false, 1);

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    visibility: Option<i64>,
    wind: OWMWind,
    rain: Option<OWMRain>,
    dt: i64,
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl OWMRain {
    fn total(&self) -> AppResult<Decimal> {
        let one_hour = decimal(self.one_hour.unwrap_or_default(), "rain.1h")?;
        let three_hour = decimal(self.three_hour.unwrap_or_default(), "rain.3h")?;
        one_hour
            .checked_add(three_hour)
            .ok_or_else(|| AppError::Provider("Rain total out of range".to_string()))
    }
}

fn rain_total(rain: Option<&OWMRain>) -> AppResult<Decimal> {
    rain.map(OWMRain::total).transpose().map(Option::unwrap_or_default)
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    #[serde(default)]
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Default, Deserialize)]
struct OWMCity {
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

/// Decode a current-weather document
pub fn decode_current(json: &str) -> AppResult<CurrentConditions> {
    let data: OWMCurrentResponse = serde_json::from_str(json)
        .map_err(|e| AppError::Provider(format!("Failed to parse weather response: {}", e)))?;

    let (description, icon) = describe(&data.weather)?;
    let visibility_m = data.visibility.unwrap_or(DEFAULT_VISIBILITY_METERS);

    Ok(CurrentConditions {
        timestamp: local_time(data.dt, data.timezone)?,
        temperature_celsius: decimal(data.main.temp, "main.temp")?,
        feels_like_celsius: decimal(data.main.feels_like, "main.feels_like")?,
        humidity_percent: data.main.humidity,
        wind_speed_kmh: to_kmh(data.wind.speed)?,
        precipitation_mm: rain_total(data.rain.as_ref())?,
        description,
        icon,
        pressure_hpa: data.main.pressure,
        visibility_km: Decimal::new(visibility_m, 3).normalize(),
    })
}

/// Decode a forecast document into observation points in payload order
pub fn decode_forecast(json: &str) -> AppResult<Vec<ObservationPoint>> {
    let data: OWMForecastResponse = serde_json::from_str(json)
        .map_err(|e| AppError::Provider(format!("Failed to parse forecast response: {}", e)))?;

    let offset = data.city.timezone;
    data.list
        .into_iter()
        .map(|item| {
            let (description, icon) = describe(&item.weather)?;
            Ok(ObservationPoint {
                timestamp: local_time(item.dt, offset)?,
                temperature_celsius: decimal(item.main.temp, "main.temp")?,
                feels_like_celsius: decimal(item.main.feels_like, "main.feels_like")?,
                humidity_percent: item.main.humidity,
                wind_speed_kmh: to_kmh(item.wind.speed)?,
                precipitation_mm: rain_total(item.rain.as_ref())?,
                description,
                icon,
            })
        })
        .collect()
}

/// Description and icon come from the first condition entry
fn describe(weather: &[OWMWeather]) -> AppResult<(String, String)> {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .ok_or_else(|| AppError::Provider("Missing weather condition entry".to_string()))
}

/// Shift a unix timestamp into the location's wall-clock time
fn local_time(dt: i64, offset_seconds: i64) -> AppResult<NaiveDateTime> {
    dt.checked_add(offset_seconds)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.naive_utc())
        .ok_or_else(|| AppError::Provider(format!("Timestamp out of range: {}", dt)))
}

fn decimal(value: f64, field: &str) -> AppResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| AppError::Provider(format!("{} out of range: {}", field, value)))
}

fn to_kmh(mps: f64) -> AppResult<Decimal> {
    decimal(mps, "wind.speed")?
        .checked_mul(MPS_TO_KMH)
        .map(|kmh| kmh.round_dp(2))
        .ok_or_else(|| AppError::Provider(format!("wind.speed out of range: {}", mps)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CURRENT: &str = r#"{
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 12.5, "feels_like": 11.8, "temp_min": 11.0, "temp_max": 13.9, "pressure": 1008, "humidity": 82},
        "visibility": 8000,
        "wind": {"speed": 5.0, "deg": 220},
        "clouds": {"all": 90},
        "rain": {"1h": 0.4},
        "dt": 1714557600,
        "sys": {"country": "GB", "sunrise": 1714537000, "sunset": 1714591000},
        "timezone": 3600,
        "name": "London"
    }"#;

    const FORECAST: &str = r#"{
        "city": {"name": "London", "coord": {"lat": 51.51, "lon": -0.13}, "timezone": 3600},
        "list": [
            {
                "dt": 1714554000,
                "main": {"temp": 11.0, "feels_like": 10.2, "pressure": 1009, "humidity": 85},
                "weather": [{"description": "light rain", "icon": "10n"}],
                "clouds": {"all": 100},
                "wind": {"speed": 3.0},
                "pop": 0.6,
                "rain": {"3h": 1.25}
            },
            {
                "dt": 1714564800,
                "main": {"temp": 14.0, "feels_like": 13.1, "pressure": 1010, "humidity": 70},
                "weather": [{"description": "overcast clouds", "icon": "04d"}],
                "clouds": {"all": 95},
                "wind": {"speed": 4.5},
                "pop": 0.1
            }
        ]
    }"#;

    #[test]
    fn test_decode_current_converts_units() {
        let current = decode_current(CURRENT).unwrap();

        assert_eq!(current.wind_speed_kmh, Decimal::from(18));
        assert_eq!(current.visibility_km, Decimal::from(8));
        assert_eq!(current.precipitation_mm, Decimal::new(4, 1));
        assert_eq!(current.description, "light rain");
        assert_eq!(current.icon, "10d");
        assert_eq!(current.pressure_hpa, 1008);
        // 2024-05-01 10:00 UTC shifted by one hour
        assert_eq!(
            current.timestamp,
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_missing_visibility_uses_default() {
        let json = CURRENT.replace("\"visibility\": 8000,", "");
        let current = decode_current(&json).unwrap();
        assert_eq!(current.visibility_km, Decimal::from(10));
    }

    #[test]
    fn test_decode_forecast() {
        let points = decode_forecast(FORECAST).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].precipitation_mm, Decimal::new(125, 2));
        assert_eq!(points[1].precipitation_mm, Decimal::ZERO);
        assert_eq!(points[0].wind_speed_kmh, Decimal::new(108, 1));
        assert_eq!(points[1].description, "overcast clouds");
    }

    #[test]
    fn test_empty_weather_array_is_rejected() {
        let json = FORECAST.replace(r#"[{"description": "overcast clouds", "icon": "04d"}]"#, "[]");
        let err = decode_forecast(&json).unwrap_err();

        assert_eq!(err.code(), "PROVIDER_ERROR");
        assert!(err.to_string().contains("weather condition"));
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let json = CURRENT.replace(r#""temp": 12.5"#, r#""temp": 1e300"#);
        let err = decode_current(&json).unwrap_err();
        assert!(err.to_string().contains("main.temp"));
    }

    #[test]
    fn test_timestamp_offset_overflow_is_rejected() {
        let json = CURRENT.replace(r#""dt": 1714557600"#, &format!(r#""dt": {}"#, i64::MAX));
        assert!(decode_current(&json).is_err());
    }

    #[test]
    fn test_decode_forecast_rejects_garbage() {
        let err = decode_forecast(r#"{"list": 3}"#).unwrap_err();
        assert_eq!(err.code(), "PROVIDER_ERROR");
    }
}
