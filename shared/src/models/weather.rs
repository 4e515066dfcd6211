//! Weather data models

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};

/// One sub-daily forecast sample as delivered by the weather provider
///
/// Timestamps are local to the forecast location; every point of a run must
/// use the same convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationPoint {
    pub timestamp: NaiveDateTime,
    pub temperature_celsius: Decimal,
    pub feels_like_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_kmh: Decimal,
    /// Precipitation for the interval, 0 when the provider omits it
    #[serde(default)]
    pub precipitation_mm: Decimal,
    pub description: String,
    pub icon: String,
}

/// Current weather conditions ("now")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub timestamp: NaiveDateTime,
    pub temperature_celsius: Decimal,
    pub feels_like_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_kmh: Decimal,
    #[serde(default)]
    pub precipitation_mm: Decimal,
    pub description: String,
    pub icon: String,
    pub pressure_hpa: i32,
    pub visibility_km: Decimal,
}

/// One calendar day rolled up from its observation points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: Decimal,
    pub temp_max: Decimal,
    pub temp_avg: Decimal,
    pub humidity_avg: i32,
    pub total_rain: Decimal,
    pub wind_speed_max: Decimal,
    /// Condition of the sample closest to midday
    pub description: String,
    pub icon: String,
    pub sample_count: usize,
    /// Raw samples of the day in input order; empty when the summary came
    /// from somewhere that did not keep them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ObservationPoint>,
}

/// Parse a JSON array of observation points
///
/// Fails on the first malformed point instead of dropping it, since a
/// silently skipped sample would corrupt that day's min/max.
pub fn parse_observations(json: &str) -> ForecastResult<Vec<ObservationPoint>> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| ForecastError::MalformedPayload(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| ForecastError::MalformedObservation {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parse a JSON current-conditions snapshot
pub fn parse_current(json: &str) -> ForecastResult<CurrentConditions> {
    serde_json::from_str(json).map_err(|e| ForecastError::MalformedConditions(e.to_string()))
}

/// Parse a JSON array of daily summaries (e.g. produced by an earlier run)
pub fn parse_daily(json: &str) -> ForecastResult<Vec<DailySummary>> {
    serde_json::from_str(json).map_err(|e| ForecastError::MalformedPayload(e.to_string()))
}
