//! Validation utilities for threshold configuration
//!
//! Thresholds come from config files and environment overrides, so nothing
//! guarantees the limits are consistent with each other. These checks run
//! once when a configuration is loaded or reloaded.

use rust_decimal::Decimal;

use crate::error::{ForecastError, ForecastResult};
use crate::models::{AgricultureThresholds, ThresholdConfig, TravelThresholds};

// ============================================================================
// Agriculture
// ============================================================================

pub fn validate_agriculture_thresholds(t: &AgricultureThresholds) -> Result<(), &'static str> {
    if t.frost_temp >= t.heat_stress {
        return Err("Frost temperature must be below heat stress temperature");
    }
    if t.mild_temp_min > t.mild_temp_max {
        return Err("Mild temperature range is inverted");
    }
    if !(0..=100).contains(&t.high_humidity) {
        return Err("High humidity must be between 0 and 100 percent");
    }
    if t.wind_speed_spray < Decimal::ZERO {
        return Err("Spraying wind limit cannot be negative");
    }
    if t.rain_threshold < Decimal::ZERO
        || t.dry_precipitation_max < Decimal::ZERO
        || t.forecast_rain_min < Decimal::ZERO
    {
        return Err("Rain thresholds cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Travel
// ============================================================================

pub fn validate_travel_thresholds(t: &TravelThresholds) -> Result<(), &'static str> {
    if !(t.extreme_cold < t.cold_weather && t.cold_weather < t.hot_weather && t.hot_weather < t.extreme_heat) {
        return Err("Temperature limits must increase from extreme cold to extreme heat");
    }
    if t.wind_warning > t.wind_danger {
        return Err("Wind warning must not exceed dangerous wind");
    }
    if t.wind_warning < Decimal::ZERO || t.trip_wind_max < Decimal::ZERO {
        return Err("Wind limits cannot be negative");
    }
    if t.rain_warning < Decimal::ZERO || t.trip_rain_total < Decimal::ZERO {
        return Err("Rain thresholds cannot be negative");
    }
    if t.trip_comfort_min > t.trip_comfort_max {
        return Err("Trip comfort range is inverted");
    }
    if t.low_visibility < Decimal::ZERO {
        return Err("Visibility limit cannot be negative");
    }
    Ok(())
}

/// Validate both personas' thresholds
pub fn validate_thresholds(config: &ThresholdConfig) -> Result<(), &'static str> {
    validate_agriculture_thresholds(&config.agriculture)?;
    validate_travel_thresholds(&config.travel)
}

impl ThresholdConfig {
    /// Return the configuration if it passes [`validate_thresholds`]
    pub fn validated(self) -> ForecastResult<Self> {
        validate_thresholds(&self).map_err(ForecastError::InvalidThresholds)?;
        Ok(self)
    }
}
