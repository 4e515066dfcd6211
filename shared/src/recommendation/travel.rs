//! Travel rule table

use rust_decimal::Decimal;

use super::outlook::{classify_outlook, OutlookInputs};
use super::rules::{evaluate, Effect, Rule, RuleContext};
use crate::aggregation::saturating_sum;
use crate::models::{is_stormy, Alert, CurrentConditions, DailySummary, TravelAdvice, TravelThresholds};
use crate::types::{DaySegment, Severity};

const WARM_CLOTHING: &[&str] = &["Warm jacket", "Gloves", "Scarf", "Thermal wear"];
const SUN_PROTECTION: &[&str] = &["Sunscreen", "Hat", "Sunglasses", "Light clothing", "Water bottle"];
const LAYERS: &[&str] = &["Light jacket", "Comfortable clothing"];
const RAIN_GEAR: &[&str] = &["Umbrella", "Raincoat", "Waterproof bag"];

pub(crate) const TRAVEL_RULES: &[Rule<TravelThresholds>] = &[
    Rule {
        id: "cold",
        condition: |ctx| ctx.current.temperature_celsius <= ctx.thresholds.cold_weather,
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Info,
                    "Cold Weather",
                    format!("Temperature is {:.1}°C. Dress in warm layers.", ctx.current.temperature_celsius),
                )
            }),
            Effect::Recommend(|ctx| {
                format!("Cold weather ({:.1}°C). Pack warm clothing.", ctx.current.temperature_celsius)
            }),
            Effect::Pack(WARM_CLOTHING),
        ],
    },
    Rule {
        id: "extreme_cold",
        condition: |ctx| ctx.thresholds.is_extreme_cold(ctx.current.temperature_celsius),
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Danger,
                    "Extreme Cold",
                    format!(
                        "Temperature is {:.1}°C. Risk of frostbite and icy roads.",
                        ctx.current.temperature_celsius
                    ),
                )
            }),
            Effect::Recommend(|_| "Limit time outdoors and check road conditions before driving.".to_string()),
        ],
    },
    Rule {
        id: "hot",
        condition: |ctx| ctx.current.temperature_celsius >= ctx.thresholds.hot_weather,
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Warning,
                    "Heat Advisory",
                    format!(
                        "Temperature is {:.1}°C. Avoid strenuous activity at midday.",
                        ctx.current.temperature_celsius
                    ),
                )
            }),
            Effect::Recommend(|ctx| {
                format!(
                    "Hot weather ({:.1}°C). Stay hydrated and use sun protection.",
                    ctx.current.temperature_celsius
                )
            }),
            Effect::Pack(SUN_PROTECTION),
        ],
    },
    Rule {
        id: "extreme_heat",
        condition: |ctx| ctx.thresholds.is_extreme_heat(ctx.current.temperature_celsius),
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Danger,
                    "Extreme Heat",
                    format!(
                        "Temperature is {:.1}°C. High risk of heat exhaustion.",
                        ctx.current.temperature_celsius
                    ),
                )
            }),
            Effect::Recommend(|_| {
                "Visit outdoor attractions early morning or late evening to avoid heat.".to_string()
            }),
        ],
    },
    Rule {
        id: "mild",
        condition: |ctx| {
            let temp = ctx.current.temperature_celsius;
            temp > ctx.thresholds.cold_weather && temp < ctx.thresholds.hot_weather
        },
        effects: &[Effect::Pack(LAYERS)],
    },
    Rule {
        id: "rain_gear",
        condition: |ctx| ctx.daily.iter().any(|d| d.total_rain > ctx.thresholds.rain_warning),
        effects: &[Effect::Pack(RAIN_GEAR)],
    },
    Rule {
        id: "rain_today",
        condition: |ctx| {
            ctx.today_rain()
                .is_some_and(|rain| rain > ctx.thresholds.rain_warning)
                || ctx.current.description.to_lowercase().contains("rain")
        },
        effects: &[
            Effect::Alert(|ctx| {
                let message = match ctx.today_rain() {
                    Some(rain) if rain > ctx.thresholds.rain_warning => format!(
                        "{:.1}mm of rain expected today. Pack rain gear and plan indoor activities.",
                        rain
                    ),
                    _ => "Raining now. Pack rain gear and plan indoor activities.".to_string(),
                };
                Alert::new(Severity::Warning, "Rain Expected", message)
            }),
            Effect::Recommend(|_| "Consider indoor attractions or activities".to_string()),
        ],
    },
    Rule {
        id: "strong_wind",
        condition: |ctx| ctx.current.wind_speed_kmh >= ctx.thresholds.wind_warning,
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Warning,
                    "Strong Winds",
                    format!("Wind speed {:.1} km/h. Be cautious outdoors.", ctx.current.wind_speed_kmh),
                )
            }),
            Effect::Recommend(|_| "Avoid outdoor activities in exposed areas".to_string()),
        ],
    },
    Rule {
        id: "dangerous_wind",
        condition: |ctx| ctx.thresholds.is_dangerous_wind(ctx.current.wind_speed_kmh),
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Danger,
                    "Dangerous Winds",
                    format!(
                        "Wind speed {:.1} km/h. Flights, ferries and mountain roads may be disrupted.",
                        ctx.current.wind_speed_kmh
                    ),
                )
            }),
            Effect::Recommend(|_| "Check transport schedules before setting out.".to_string()),
        ],
    },
    Rule {
        id: "poor_visibility",
        condition: |ctx| {
            let description = ctx.current.description.to_lowercase();
            ctx.current.visibility_km < ctx.thresholds.low_visibility
                || description.contains("fog")
                || description.contains("mist")
        },
        effects: &[
            Effect::Alert(|ctx| {
                Alert::new(
                    Severity::Warning,
                    "Poor Visibility",
                    format!("Visibility is {:.1} km. Drive carefully.", ctx.current.visibility_km),
                )
            }),
            Effect::Recommend(|_| "Exercise caution while driving. Allow extra travel time.".to_string()),
        ],
    },
    Rule {
        id: "storm",
        condition: |ctx| is_stormy(&ctx.current.description),
        effects: &[
            Effect::Alert(|_| {
                Alert::new(
                    Severity::Danger,
                    "Storm Warning",
                    "Severe weather expected. Stay indoors if possible.",
                )
            }),
            Effect::Recommend(|_| "Postpone outdoor plans. Seek shelter.".to_string()),
        ],
    },
    Rule {
        id: "clear_skies",
        condition: |ctx| {
            let description = ctx.current.description.to_lowercase();
            description.contains("clear") || description.contains("sun")
        },
        effects: &[Effect::Recommend(|_| {
            "Perfect weather for sightseeing and outdoor activities!".to_string()
        })],
    },
];

/// One-line summary over the whole forecast window
fn trip_summary(daily: &[DailySummary], thresholds: &TravelThresholds) -> Option<String> {
    if daily.is_empty() {
        return None;
    }

    let total_rain = saturating_sum(daily.iter().map(|d| d.total_rain));
    let max_wind = daily
        .iter()
        .map(|d| d.wind_speed_max)
        .max()
        .unwrap_or(Decimal::ZERO);
    let avg_temp = saturating_sum(daily.iter().map(|d| d.temp_avg)) / Decimal::from(daily.len());

    let summary = if total_rain > thresholds.trip_rain_total || max_wind > thresholds.trip_wind_max {
        "Challenging weather ahead. Consider rescheduling outdoor activities."
    } else if total_rain < thresholds.rain_warning
        && avg_temp >= thresholds.trip_comfort_min
        && avg_temp <= thresholds.trip_comfort_max
    {
        "Excellent weather forecast for the next few days!"
    } else {
        "Fair weather expected. Pack accordingly."
    };

    Some(summary.to_string())
}

/// Segments of today whose samples stay clear of every danger-tier limit
///
/// Empty when today's raw samples are not available.
fn best_times(today: Option<&DailySummary>, thresholds: &TravelThresholds) -> Vec<String> {
    let Some(today) = today else {
        return Vec::new();
    };

    DaySegment::ALL
        .iter()
        .filter_map(|segment| {
            let points: Vec<_> = today
                .details
                .iter()
                .filter(|p| segment.contains(&p.timestamp))
                .collect();

            let first = points.first()?;
            let safe = points.iter().all(|p| {
                !thresholds.hits_danger(p.temperature_celsius, p.wind_speed_kmh, &p.description)
            });
            if !safe {
                return None;
            }

            let mut low = first.temperature_celsius;
            let mut high = first.temperature_celsius;
            let mut wind = first.wind_speed_kmh;
            for p in &points {
                low = low.min(p.temperature_celsius);
                high = high.max(p.temperature_celsius);
                wind = wind.max(p.wind_speed_kmh);
            }

            Some(format!(
                "{}: {:.1}-{:.1}°C, wind up to {:.1} km/h, {}",
                segment, low, high, wind, first.description
            ))
        })
        .collect()
}

/// Build the travel bundle
pub fn advise(current: &CurrentConditions, daily: &[DailySummary], thresholds: &TravelThresholds) -> TravelAdvice {
    let ctx = RuleContext::new(current, daily, thresholds);
    let outcome = evaluate(TRAVEL_RULES, &ctx);

    let mut recommendations = outcome.recommendations;
    recommendations.extend(trip_summary(daily, thresholds));

    TravelAdvice {
        alerts: outcome.alerts,
        recommendations,
        packing_list: outcome.packing,
        outlook: classify_outlook(&OutlookInputs::from_conditions(current, ctx.today())),
        best_times: best_times(ctx.today(), thresholds),
    }
}
