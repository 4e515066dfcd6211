//! Travel outlook scoring
//!
//! Each factor is rated into a band giving points (0-100) and a ceiling. The
//! weighted points are bucketed, and the result is capped by the lowest
//! ceiling, so one hazardous factor (e.g. fog) drags the outlook down no matter
//! how pleasant the rest is. Wind, precipitation and visibility bands are
//! ordered so that worsening the input never raises points or ceiling.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CurrentConditions, DailySummary};
use crate::types::Outlook;

const TEMPERATURE_WEIGHT: u32 = 25;
const WIND_WEIGHT: u32 = 25;
const PRECIPITATION_WEIGHT: u32 = 30;
const VISIBILITY_WEIGHT: u32 = 20;

/// Points and the best outlook a factor in this band allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub points: u32,
    pub ceiling: Outlook,
}

struct Band {
    bound: f64,
    rating: Rating,
}

const fn band(bound: f64, points: u32, ceiling: Outlook) -> Band {
    Band {
        bound,
        rating: Rating { points, ceiling },
    }
}

/// km/h, band applies while `value < bound`
const WIND_BANDS: &[Band] = &[
    band(15.0, 100, Outlook::Excellent),
    band(30.0, 75, Outlook::Excellent),
    band(45.0, 40, Outlook::Fair),
    band(60.0, 15, Outlook::Fair),
];
const WIND_WORST: Rating = Rating { points: 0, ceiling: Outlook::Poor };

/// mm, band applies while `value < bound`
const PRECIPITATION_BANDS: &[Band] = &[
    band(0.1, 100, Outlook::Excellent),
    band(2.5, 75, Outlook::Excellent),
    band(5.0, 50, Outlook::Good),
    band(10.0, 20, Outlook::Fair),
];
const PRECIPITATION_WORST: Rating = Rating { points: 0, ceiling: Outlook::Poor };

/// km, band applies while `value >= bound`
const VISIBILITY_BANDS: &[Band] = &[
    band(10.0, 100, Outlook::Excellent),
    band(5.0, 80, Outlook::Excellent),
    band(2.0, 50, Outlook::Good),
    band(1.0, 20, Outlook::Fair),
];
const VISIBILITY_WORST: Rating = Rating { points: 0, ceiling: Outlook::Poor };

/// Values the outlook is computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlookInputs {
    pub temperature_celsius: Decimal,
    pub wind_speed_kmh: Decimal,
    pub precipitation_mm: Decimal,
    pub visibility_km: Decimal,
}

impl OutlookInputs {
    /// Precipitation is the larger of the current interval and today's total
    pub fn from_conditions(current: &CurrentConditions, today: Option<&DailySummary>) -> Self {
        let today_rain = today.map(|d| d.total_rain).unwrap_or(Decimal::ZERO);
        Self {
            temperature_celsius: current.temperature_celsius,
            wind_speed_kmh: current.wind_speed_kmh,
            precipitation_mm: current.precipitation_mm.max(today_rain),
            visibility_km: current.visibility_km,
        }
    }
}

/// Full breakdown of an outlook decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlookScore {
    pub temperature: Rating,
    pub wind: Rating,
    pub precipitation: Rating,
    pub visibility: Rating,
    /// Weighted points, 0-100
    pub score: u32,
    pub outlook: Outlook,
}

pub fn score_outlook(inputs: &OutlookInputs) -> OutlookScore {
    let temperature = rate_temperature(to_f64(inputs.temperature_celsius));
    let wind = rate_below(to_f64(inputs.wind_speed_kmh), WIND_BANDS, WIND_WORST);
    let precipitation = rate_below(
        to_f64(inputs.precipitation_mm),
        PRECIPITATION_BANDS,
        PRECIPITATION_WORST,
    );
    let visibility = rate_at_least(to_f64(inputs.visibility_km), VISIBILITY_BANDS, VISIBILITY_WORST);

    let score = (temperature.points * TEMPERATURE_WEIGHT
        + wind.points * WIND_WEIGHT
        + precipitation.points * PRECIPITATION_WEIGHT
        + visibility.points * VISIBILITY_WEIGHT)
        / 100;

    let ceiling = [temperature, wind, precipitation, visibility]
        .iter()
        .map(|rating| rating.ceiling)
        .min()
        .unwrap_or(Outlook::Poor);

    OutlookScore {
        temperature,
        wind,
        precipitation,
        visibility,
        score,
        outlook: bucket(score).min(ceiling),
    }
}

pub fn classify_outlook(inputs: &OutlookInputs) -> Outlook {
    score_outlook(inputs).outlook
}

/// Score ranges: [80, 100] excellent, [60, 80) good, [40, 60) fair, [0, 40) poor
pub fn bucket(score: u32) -> Outlook {
    match score {
        80..=u32::MAX => Outlook::Excellent,
        60..=79 => Outlook::Good,
        40..=59 => Outlook::Fair,
        _ => Outlook::Poor,
    }
}

/// Comfort rating; not monotonic, both ends are uncomfortable
fn rate_temperature(celsius: f64) -> Rating {
    if (18.0..=26.0).contains(&celsius) {
        Rating { points: 100, ceiling: Outlook::Excellent }
    } else if (12.0..=30.0).contains(&celsius) {
        Rating { points: 75, ceiling: Outlook::Excellent }
    } else if (5.0..=35.0).contains(&celsius) {
        Rating { points: 40, ceiling: Outlook::Good }
    } else {
        Rating { points: 10, ceiling: Outlook::Fair }
    }
}

fn rate_below(value: f64, bands: &[Band], worst: Rating) -> Rating {
    bands
        .iter()
        .find(|b| value < b.bound)
        .map(|b| b.rating)
        .unwrap_or(worst)
}

fn rate_at_least(value: f64, bands: &[Band], worst: Rating) -> Rating {
    bands
        .iter()
        .find(|b| value >= b.bound)
        .map(|b| b.rating)
        .unwrap_or(worst)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
