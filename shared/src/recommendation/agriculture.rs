//! Agriculture rule table

use rust_decimal::Decimal;

use super::rules::{evaluate, Effect, Rule, RuleContext};
use crate::aggregation::saturating_sum;
use crate::models::{AgricultureAdvice, AgricultureThresholds, Alert, CurrentConditions, DailySummary, FarmActivity};
use crate::types::{Season, Severity};

type Ctx<'a> = RuleContext<'a, AgricultureThresholds>;

pub(crate) const AGRICULTURE_RULES: &[Rule<AgricultureThresholds>] = &[
    Rule {
        id: "high_wind",
        condition: |ctx| ctx.current.wind_speed_kmh >= ctx.thresholds.wind_speed_spray,
        effects: &[
            Effect::Alert(high_wind_alert),
            Effect::Task("Postpone spraying operations until wind subsides"),
        ],
    },
    Rule {
        id: "calm_wind",
        condition: |ctx| ctx.current.wind_speed_kmh < ctx.thresholds.wind_speed_spray,
        effects: &[Effect::Task("Good conditions for spraying operations")],
    },
    Rule {
        id: "frost",
        condition: |ctx| ctx.current.temperature_celsius <= ctx.thresholds.frost_temp,
        effects: &[
            Effect::Alert(frost_alert),
            Effect::Recommend(|_| {
                "Protect sensitive crops from frost with covers, mulch or overnight irrigation.".to_string()
            }),
            Effect::Task("Cover sensitive crops or use frost protection methods"),
        ],
    },
    Rule {
        id: "heat_stress",
        condition: |ctx| ctx.current.temperature_celsius >= ctx.thresholds.heat_stress,
        effects: &[
            Effect::Alert(heat_stress_alert),
            Effect::Recommend(|_| {
                "Provide shade for sensitive crops and irrigate in the early morning or evening.".to_string()
            }),
            Effect::Task("Increase irrigation frequency"),
        ],
    },
    Rule {
        id: "heavy_rain",
        condition: |ctx| {
            ctx.today_rain()
                .is_some_and(|rain| rain >= ctx.thresholds.rain_threshold)
        },
        effects: &[
            Effect::Recommend(|ctx| {
                format!(
                    "Heavy rainfall expected today ({:.1}mm). Skip irrigation.",
                    ctx.today_rain().unwrap_or_default()
                )
            }),
            Effect::Task("Skip irrigation today - sufficient rainfall"),
        ],
    },
    Rule {
        id: "light_rain",
        condition: |ctx| {
            ctx.today_rain()
                .is_some_and(|rain| rain > Decimal::ZERO && rain < ctx.thresholds.rain_threshold)
        },
        effects: &[Effect::Recommend(|ctx| {
            format!(
                "Light rainfall ({:.1}mm) expected. Monitor soil moisture.",
                ctx.today_rain().unwrap_or_default()
            )
        })],
    },
    Rule {
        id: "rain_ahead",
        condition: |ctx| dry_today(ctx) && upcoming_rain(ctx) >= ctx.thresholds.forecast_rain_min,
        effects: &[Effect::Recommend(|ctx| {
            format!(
                "Rain expected in the next {} days ({:.1}mm). Plan irrigation accordingly.",
                ctx.thresholds.irrigation_lookahead_days,
                upcoming_rain(ctx)
            )
        })],
    },
    Rule {
        id: "irrigate",
        condition: |ctx| dry_today(ctx) && upcoming_rain(ctx) < ctx.thresholds.forecast_rain_min,
        effects: &[
            Effect::Recommend(|ctx| {
                format!(
                    "No significant rain expected in the next {} days. Irrigate as scheduled.",
                    ctx.thresholds.irrigation_lookahead_days
                )
            }),
            Effect::Task("Regular irrigation recommended"),
        ],
    },
    Rule {
        id: "disease_risk",
        condition: |ctx| ctx.current.humidity_percent >= ctx.thresholds.high_humidity,
        effects: &[
            Effect::Alert(disease_risk_alert),
            Effect::Recommend(|_| {
                "Monitor crops for signs of fungal infection and improve ventilation in greenhouses.".to_string()
            }),
            Effect::Task("Apply preventive fungicide if needed"),
        ],
    },
];

fn high_wind_alert(ctx: &Ctx<'_>) -> Alert {
    Alert::new(
        Severity::Warning,
        "High Wind",
        format!(
            "Wind speed is {:.1} km/h. Avoid pesticide/fertilizer spraying.",
            ctx.current.wind_speed_kmh
        ),
    )
}

fn frost_alert(ctx: &Ctx<'_>) -> Alert {
    Alert::new(
        Severity::Danger,
        "Frost Warning",
        format!(
            "Temperature is {:.1}°C. Protect sensitive crops from frost damage.",
            ctx.current.temperature_celsius
        ),
    )
}

fn heat_stress_alert(ctx: &Ctx<'_>) -> Alert {
    Alert::new(
        Severity::Warning,
        "Heat Stress",
        format!(
            "High temperature {:.1}°C may stress crops. Ensure adequate irrigation.",
            ctx.current.temperature_celsius
        ),
    )
}

fn disease_risk_alert(ctx: &Ctx<'_>) -> Alert {
    Alert::new(
        Severity::Warning,
        "Disease Risk",
        format!(
            "Humidity at {}%. Increased risk of fungal diseases.",
            ctx.current.humidity_percent
        ),
    )
}

/// Today exists and has no rain at all
fn dry_today(ctx: &Ctx<'_>) -> bool {
    ctx.today_rain().is_some_and(|rain| rain.is_zero())
}

/// Rain summed over the lookahead days following today
fn upcoming_rain(ctx: &Ctx<'_>) -> Decimal {
    saturating_sum(
        ctx.daily
            .iter()
            .skip(1)
            .take(ctx.thresholds.irrigation_lookahead_days)
            .map(|d| d.total_rain),
    )
}

/// Field state derived from the current snapshot
#[derive(Debug, Clone, Copy)]
struct FieldConditions {
    dry: bool,
    mild: bool,
    calm: bool,
    frost: bool,
}

impl FieldConditions {
    fn assess(current: &CurrentConditions, thresholds: &AgricultureThresholds) -> Self {
        let temp = current.temperature_celsius;
        Self {
            dry: current.precipitation_mm < thresholds.dry_precipitation_max,
            mild: temp >= thresholds.mild_temp_min && temp <= thresholds.mild_temp_max,
            calm: current.wind_speed_kmh < thresholds.wind_speed_spray,
            frost: temp <= thresholds.frost_temp,
        }
    }
}

/// Fixed activity catalog, each entry kept while its predicate holds
const ACTIVITY_CATALOG: &[(FarmActivity, fn(&FieldConditions) -> bool)] = &[
    (FarmActivity::Spraying, |c| c.calm && c.dry && !c.frost),
    (FarmActivity::Harvesting, |c| c.dry && c.mild),
    (FarmActivity::FieldPreparation, |c| c.dry && !c.frost),
    (FarmActivity::Planting, |c| c.dry && c.mild),
    (FarmActivity::EquipmentMaintenance, |_| true),
    (FarmActivity::StorageManagement, |_| true),
    (FarmActivity::PlanningAndPaperwork, |c| !c.dry),
];

fn suitable_activities(current: &CurrentConditions, thresholds: &AgricultureThresholds) -> Vec<FarmActivity> {
    let conditions = FieldConditions::assess(current, thresholds);
    ACTIVITY_CATALOG
        .iter()
        .filter(|(_, allowed)| allowed(&conditions))
        .map(|(activity, _)| *activity)
        .collect()
}

/// Seasonal crop calendar
pub fn crop_advice(season: Season) -> &'static [&'static str] {
    match season {
        Season::Spring => &[
            "Good time for planting summer crops like corn, cotton, and vegetables",
            "Prepare soil with organic matter",
            "Monitor for late frost warnings",
        ],
        Season::Summer => &[
            "Focus on irrigation management",
            "Monitor for heat stress in crops",
            "Good time for harvesting wheat and early crops",
        ],
        Season::Autumn => &[
            "Plant winter crops like wheat, barley",
            "Harvest summer crops",
            "Prepare fields for winter",
        ],
        Season::Winter => &[
            "Protect crops from frost",
            "Plan for spring planting",
            "Maintain irrigation systems",
        ],
    }
}

/// Build the agriculture bundle
pub fn advise(
    current: &CurrentConditions,
    daily: &[DailySummary],
    thresholds: &AgricultureThresholds,
) -> AgricultureAdvice {
    let outcome = evaluate(AGRICULTURE_RULES, &RuleContext::new(current, daily, thresholds));

    let crop_advice: Vec<String> = crop_advice(Season::from_timestamp(&current.timestamp))
        .iter()
        .map(|advice| (*advice).to_string())
        .collect();

    let mut recommendations = outcome.recommendations;
    recommendations.extend(crop_advice.iter().cloned());

    AgricultureAdvice {
        alerts: outcome.alerts,
        recommendations,
        tasks: outcome.tasks,
        suitable_activities: suitable_activities(current, thresholds),
        crop_advice,
    }
}
