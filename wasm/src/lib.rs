//! WebAssembly module for the Weather Advisor
//!
//! Provides client-side computation for:
//! - Daily aggregation of forecast samples
//! - Persona recommendations
//! - Travel outlook classification
//!
//! Inputs and outputs cross the boundary as JSON strings.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::recommendation::outlook::{classify_outlook, OutlookInputs};
use shared::{
    aggregate, parse_current, parse_daily, parse_observations, ForecastError, Persona, RecommendationEngine,
    ThresholdConfig,
};

/// Aggregate a JSON list of observation points into daily summaries
#[wasm_bindgen]
pub fn aggregate_forecast(points_json: &str) -> Result<String, JsValue> {
    aggregate_json(points_json).map_err(to_js_error)
}

/// Build the recommendation bundle for `persona`
///
/// `thresholds_json` may be omitted to use the defaults; partial documents
/// keep defaults for missing fields.
#[wasm_bindgen]
pub fn recommend_json(
    persona: &str,
    current_json: &str,
    daily_json: &str,
    thresholds_json: Option<String>,
) -> Result<String, JsValue> {
    recommend_inner(persona, current_json, daily_json, thresholds_json.as_deref()).map_err(to_js_error)
}

/// Classify the travel outlook from raw numbers
///
/// Returns the same lowercase label the JSON bundles use.
#[wasm_bindgen]
pub fn classify_travel_outlook(
    temperature_c: f64,
    wind_kmh: f64,
    rain_mm: f64,
    visibility_km: f64,
) -> Result<String, JsValue> {
    classify_inner(temperature_c, wind_kmh, rain_mm, visibility_km).map_err(to_js_error)
}

/// Default thresholds as JSON, for building settings forms
#[wasm_bindgen]
pub fn default_thresholds_json() -> String {
    serde_json::to_string(&ThresholdConfig::default()).unwrap_or_default()
}

fn aggregate_json(points_json: &str) -> Result<String, String> {
    let points = parse_observations(points_json).map_err(|e| e.to_string())?;
    serde_json::to_string(&aggregate(&points)).map_err(|e| e.to_string())
}

fn recommend_inner(
    persona: &str,
    current_json: &str,
    daily_json: &str,
    thresholds_json: Option<&str>,
) -> Result<String, String> {
    let thresholds = match thresholds_json {
        Some(json) => serde_json::from_str::<ThresholdConfig>(json)
            .map_err(|e| format!("Invalid thresholds JSON: {}", e))?
            .validated()
            .map_err(|e: ForecastError| e.to_string())?,
        None => ThresholdConfig::default(),
    };

    let current = parse_current(current_json).map_err(|e| e.to_string())?;
    let daily = parse_daily(daily_json).map_err(|e| e.to_string())?;
    let persona: Persona = persona.parse().map_err(|e: ForecastError| e.to_string())?;

    let bundle = RecommendationEngine::new(thresholds.into()).recommend(persona, &current, &daily);
    serde_json::to_string(&bundle).map_err(|e| e.to_string())
}

fn classify_inner(temperature_c: f64, wind_kmh: f64, rain_mm: f64, visibility_km: f64) -> Result<String, String> {
    let inputs = OutlookInputs {
        temperature_celsius: finite_decimal(temperature_c, "temperature")?,
        wind_speed_kmh: finite_decimal(wind_kmh, "wind")?,
        precipitation_mm: finite_decimal(rain_mm, "rain")?,
        visibility_km: finite_decimal(visibility_km, "visibility")?,
    };
    let outlook = classify_outlook(&inputs);
    match serde_json::to_value(outlook).map_err(|e| e.to_string())? {
        serde_json::Value::String(label) => Ok(label),
        other => Err(format!("Unexpected outlook encoding: {}", other)),
    }
}

fn finite_decimal(value: f64, name: &str) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err(format!("{} must be a finite number", name));
    }
    Decimal::try_from(value).map_err(|_| format!("{} is out of range: {}", name, value))
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}
