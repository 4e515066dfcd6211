//! Threshold configuration for the recommendation rules
//!
//! The configuration is read-only once handed to the engine. A reload replaces
//! the whole value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named limits for both personas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ThresholdConfig {
    pub agriculture: AgricultureThresholds,
    pub travel: TravelThresholds,
}

/// Limits used by the agriculture rule table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgricultureThresholds {
    /// Max wind (km/h) for pesticide/fertilizer spraying
    pub wind_speed_spray: Decimal,
    /// Daily rainfall (mm) that makes irrigation unnecessary
    pub rain_threshold: Decimal,
    /// Frost warning temperature (°C)
    pub frost_temp: Decimal,
    /// Crop heat stress temperature (°C)
    pub heat_stress: Decimal,
    /// Humidity (%) with elevated fungal disease risk
    pub high_humidity: i32,
    /// Current precipitation (mm) below which the field counts as dry
    pub dry_precipitation_max: Decimal,
    pub mild_temp_min: Decimal,
    pub mild_temp_max: Decimal,
    /// Days after today checked before recommending irrigation
    pub irrigation_lookahead_days: usize,
    /// Rain (mm) over the lookahead window that postpones irrigation
    pub forecast_rain_min: Decimal,
}

impl Default for AgricultureThresholds {
    fn default() -> Self {
        Self {
            wind_speed_spray: Decimal::from(20),
            rain_threshold: Decimal::from(10),
            frost_temp: Decimal::from(2),
            heat_stress: Decimal::from(35),
            high_humidity: 80,
            dry_precipitation_max: Decimal::from(1),
            mild_temp_min: Decimal::from(10),
            mild_temp_max: Decimal::from(30),
            irrigation_lookahead_days: 3,
            forecast_rain_min: Decimal::from(5),
        }
    }
}

/// Limits used by the travel rule table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TravelThresholds {
    /// °C at or below which warm clothing is needed
    pub cold_weather: Decimal,
    /// °C at or above which sun protection is needed
    pub hot_weather: Decimal,
    /// Daily rainfall (mm) above which rain gear is packed
    pub rain_warning: Decimal,
    /// km/h
    pub wind_warning: Decimal,
    /// km
    pub low_visibility: Decimal,
    // Danger tier
    pub extreme_cold: Decimal,
    pub extreme_heat: Decimal,
    pub wind_danger: Decimal,
    // Whole-trip summary
    pub trip_rain_total: Decimal,
    pub trip_wind_max: Decimal,
    /// Mean °C band for an excellent trip summary
    pub trip_comfort_min: Decimal,
    pub trip_comfort_max: Decimal,
}

impl Default for TravelThresholds {
    fn default() -> Self {
        Self {
            cold_weather: Decimal::from(10),
            hot_weather: Decimal::from(30),
            rain_warning: Decimal::from(5),
            wind_warning: Decimal::from(40),
            low_visibility: Decimal::from(1),
            extreme_cold: Decimal::from(-10),
            extreme_heat: Decimal::from(40),
            wind_danger: Decimal::from(60),
            trip_rain_total: Decimal::from(20),
            trip_wind_max: Decimal::from(50),
            trip_comfort_min: Decimal::from(15),
            trip_comfort_max: Decimal::from(28),
        }
    }
}

impl TravelThresholds {
    pub fn is_extreme_cold(&self, temperature: Decimal) -> bool {
        temperature <= self.extreme_cold
    }

    pub fn is_extreme_heat(&self, temperature: Decimal) -> bool {
        temperature >= self.extreme_heat
    }

    pub fn is_dangerous_wind(&self, wind_speed_kmh: Decimal) -> bool {
        wind_speed_kmh >= self.wind_danger
    }

    /// True when any danger-tier limit is hit
    pub fn hits_danger(&self, temperature: Decimal, wind_speed_kmh: Decimal, description: &str) -> bool {
        self.is_extreme_cold(temperature)
            || self.is_extreme_heat(temperature)
            || self.is_dangerous_wind(wind_speed_kmh)
            || is_stormy(description)
    }
}

/// Description mentions a storm or thunder
pub fn is_stormy(description: &str) -> bool {
    let description = description.to_lowercase();
    description.contains("storm") || description.contains("thunder")
}
