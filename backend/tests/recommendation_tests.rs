//! Tests for persona recommendations and the travel outlook
//! Verifies rule scenarios, outlook monotonicity, empty-forecast safety and
//! idempotence

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::recommendation::outlook::{classify_outlook, OutlookInputs};
use shared::{
    aggregate, recommend, CurrentConditions, DailySummary, FarmActivity, ObservationPoint, Outlook, Persona,
    RecommendationEngine, Severity, ThresholdConfig,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

const RAIN_GEAR: [&str; 3] = ["Umbrella", "Raincoat", "Waterproof bag"];

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn current(temp: &str, wind: &str, humidity: i32, visibility: &str, description: &str) -> CurrentConditions {
    CurrentConditions {
        timestamp: noon(),
        temperature_celsius: dec(temp),
        feels_like_celsius: dec(temp),
        humidity_percent: humidity,
        wind_speed_kmh: dec(wind),
        precipitation_mm: Decimal::ZERO,
        description: description.to_string(),
        icon: "01d".to_string(),
        pressure_hpa: 1013,
        visibility_km: dec(visibility),
    }
}

/// A day built from four samples sharing one rain amount
fn day_with_rain(day: u32, rain_per_sample: &str) -> Vec<ObservationPoint> {
    [6, 9, 12, 15]
        .iter()
        .map(|hour| ObservationPoint {
            timestamp: NaiveDate::from_ymd_opt(2024, 4, day)
                .unwrap()
                .and_hms_opt(*hour, 0, 0)
                .unwrap(),
            temperature_celsius: dec("18"),
            feels_like_celsius: dec("18"),
            humidity_percent: 70,
            wind_speed_kmh: dec("12"),
            precipitation_mm: dec(rain_per_sample),
            description: "moderate rain".to_string(),
            icon: "10d".to_string(),
        })
        .collect()
}

// =============================================================================
// Agriculture Scenarios
// =============================================================================

mod agriculture_scenarios {
    use super::*;

    #[test]
    fn test_frost_gives_single_danger_alert() {
        let now = current("1.5", "8", 60, "10", "clear sky");
        let bundle = recommend(Persona::Agriculture, &now, &[], &ThresholdConfig::default());

        let dangers: Vec<_> = bundle
            .alerts()
            .iter()
            .filter(|a| a.severity == Severity::Danger)
            .collect();
        assert_eq!(dangers.len(), 1);
        assert_eq!(dangers[0].title, "Frost Warning");
    }

    #[test]
    fn test_high_wind_blocks_spraying() {
        let now = current("20", "25", 60, "10", "clear sky");
        let bundle = recommend(Persona::Agriculture, &now, &[], &ThresholdConfig::default());
        let advice = bundle.as_agriculture().unwrap();

        assert!(!advice.suitable_activities.contains(&FarmActivity::Spraying));
        assert!(advice.alerts.iter().any(|a| a.severity == Severity::Warning));
        assert!(advice
            .tasks
            .contains(&"Postpone spraying operations until wind subsides".to_string()));
    }

    #[test]
    fn test_calm_dry_mild_day_allows_fieldwork() {
        let now = current("20", "10", 60, "10", "clear sky");
        let bundle = recommend(Persona::Agriculture, &now, &[], &ThresholdConfig::default());
        let advice = bundle.as_agriculture().unwrap();

        assert!(advice.alerts.is_empty());
        assert!(advice.suitable_activities.contains(&FarmActivity::Spraying));
        assert!(advice.suitable_activities.contains(&FarmActivity::Harvesting));
        assert!(!advice.suitable_activities.contains(&FarmActivity::PlanningAndPaperwork));
    }

    #[test]
    fn test_heavy_rain_today_skips_irrigation() {
        let daily = aggregate(&day_with_rain(10, "3"));
        let now = current("18", "10", 60, "10", "moderate rain");
        let bundle = recommend(Persona::Agriculture, &now, &daily, &ThresholdConfig::default());

        assert!(bundle.as_agriculture().unwrap().tasks.contains(&"Skip irrigation today - sufficient rainfall".to_string()));
    }

    #[test]
    fn test_rain_equal_to_threshold_skips_irrigation() {
        let daily = aggregate(&day_with_rain(10, "2.5"));
        let config = ThresholdConfig::default();
        assert_eq!(daily[0].total_rain, config.agriculture.rain_threshold);

        let now = current("18", "10", 60, "10", "clear sky");
        let bundle = recommend(Persona::Agriculture, &now, &daily, &config);

        assert!(bundle
            .as_agriculture()
            .unwrap()
            .tasks
            .contains(&"Skip irrigation today - sufficient rainfall".to_string()));
        assert!(!bundle.recommendations().iter().any(|r| r.starts_with("Light rainfall")));
    }

    #[test]
    fn test_rain_ahead_postpones_irrigation() {
        let mut points = day_with_rain(10, "0");
        points.extend(day_with_rain(11, "2"));
        let daily = aggregate(&points);

        let now = current("18", "10", 60, "10", "clear sky");
        let bundle = recommend(Persona::Agriculture, &now, &daily, &ThresholdConfig::default());

        assert!(bundle
            .recommendations()
            .iter()
            .any(|r| r.starts_with("Rain expected in the next 3 days")));
        assert!(!bundle
            .as_agriculture()
            .unwrap()
            .tasks
            .contains(&"Regular irrigation recommended".to_string()));
    }
}

// =============================================================================
// Travel Scenarios
// =============================================================================

mod travel_scenarios {
    use super::*;

    #[test]
    fn test_rainy_today_packs_rain_gear_and_caps_outlook() {
        let daily = aggregate(&day_with_rain(10, "3"));
        assert_eq!(daily[0].total_rain, dec("12"));

        let now = current("20", "10", 70, "10", "moderate rain");
        let bundle = recommend(Persona::Travel, &now, &daily, &ThresholdConfig::default());
        let advice = bundle.as_travel().unwrap();

        assert!(advice.packing_list.iter().any(|item| RAIN_GEAR.contains(&item.as_str())));
        assert!(advice.outlook <= Outlook::Fair);
        assert!(advice.alerts.iter().any(|a| a.title == "Rain Expected"));
    }

    #[test]
    fn test_low_visibility_dominates_outlook() {
        let now = current("22", "8", 50, "0.5", "clear sky");
        let bundle = recommend(Persona::Travel, &now, &[], &ThresholdConfig::default());

        assert_eq!(bundle.as_travel().unwrap().outlook, Outlook::Poor);
    }

    #[test]
    fn test_best_times_from_today_samples() {
        let daily = aggregate(&day_with_rain(10, "0"));
        let now = current("18", "12", 70, "10", "few clouds");
        let bundle = recommend(Persona::Travel, &now, &daily, &ThresholdConfig::default());
        let best = &bundle.as_travel().unwrap().best_times;

        assert_eq!(best.len(), 2);
        assert!(best[0].starts_with("Morning"));
        assert!(best[1].starts_with("Afternoon"));
    }

    #[test]
    fn test_rain_near_decimal_max_is_evaluated_literally() {
        let near_max = (Decimal::MAX - Decimal::ONE).to_string();
        let mut points = day_with_rain(10, "0");
        points.extend(day_with_rain(11, "0"));
        for p in points.iter_mut().filter(|p| p.timestamp.hour() == 12) {
            p.precipitation_mm = dec(&near_max);
        }
        let daily = aggregate(&points);

        let now = current("20", "10", 70, "10", "moderate rain");
        let bundle = recommend(Persona::Travel, &now, &daily, &ThresholdConfig::default());
        let advice = bundle.as_travel().unwrap();

        assert_eq!(advice.outlook, Outlook::Poor);
        assert!(advice.packing_list.iter().any(|item| RAIN_GEAR.contains(&item.as_str())));
        assert_eq!(
            advice.recommendations.last().map(String::as_str),
            Some("Challenging weather ahead. Consider rescheduling outdoor activities.")
        );
    }

    #[test]
    fn test_summaries_without_details_have_no_best_times() {
        let mut daily: Vec<DailySummary> = aggregate(&day_with_rain(10, "0"));
        daily[0].details.clear();

        let now = current("18", "12", 70, "10", "few clouds");
        let bundle = recommend(Persona::Travel, &now, &daily, &ThresholdConfig::default());

        assert!(bundle.as_travel().unwrap().best_times.is_empty());
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn tenths(range: std::ops::RangeInclusive<i64>) -> impl Strategy<Value = Decimal> {
        range.prop_map(|n| Decimal::new(n, 1))
    }

    fn inputs_strategy() -> impl Strategy<Value = OutlookInputs> {
        (
            tenths(-300..=450),
            tenths(0..=1000),
            tenths(0..=300),
            tenths(0..=200),
        )
            .prop_map(|(temperature, wind, rain, visibility)| OutlookInputs {
                temperature_celsius: temperature,
                wind_speed_kmh: wind,
                precipitation_mm: rain,
                visibility_km: visibility,
            })
    }

    fn current_strategy() -> impl Strategy<Value = CurrentConditions> {
        (
            tenths(-300..=450),
            tenths(0..=1000),
            0i32..=100,
            tenths(0..=200),
            prop::sample::select(vec!["clear sky", "mist", "thunderstorm", "light rain", "overcast clouds"]),
        )
            .prop_map(|(temp, wind, humidity, visibility, description)| CurrentConditions {
                timestamp: noon(),
                temperature_celsius: temp,
                feels_like_celsius: temp,
                humidity_percent: humidity,
                wind_speed_kmh: wind,
                precipitation_mm: Decimal::ZERO,
                description: description.to_string(),
                icon: "01d".to_string(),
                pressure_hpa: 1013,
                visibility_km: visibility,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// More wind never improves the outlook
        #[test]
        fn prop_outlook_monotonic_in_wind(base in inputs_strategy(), extra in tenths(0..=500)) {
            let worse = OutlookInputs { wind_speed_kmh: base.wind_speed_kmh + extra, ..base };
            prop_assert!(classify_outlook(&worse) <= classify_outlook(&base));
        }

        /// More precipitation never improves the outlook
        #[test]
        fn prop_outlook_monotonic_in_precipitation(base in inputs_strategy(), extra in tenths(0..=200)) {
            let worse = OutlookInputs { precipitation_mm: base.precipitation_mm + extra, ..base };
            prop_assert!(classify_outlook(&worse) <= classify_outlook(&base));
        }

        /// Less visibility never improves the outlook
        #[test]
        fn prop_outlook_monotonic_in_visibility(base in inputs_strategy(), loss in tenths(0..=200)) {
            let worse = OutlookInputs { visibility_km: base.visibility_km - loss, ..base };
            prop_assert!(classify_outlook(&worse) <= classify_outlook(&base));
        }

        /// An empty forecast never yields rain-dependent packing items
        #[test]
        fn prop_empty_daily_has_no_rain_gear(now in current_strategy()) {
            let config = ThresholdConfig::default();
            let bundle = recommend(Persona::Travel, &now, &[], &config);
            let advice = bundle.as_travel().unwrap();

            prop_assert!(advice.packing_list.iter().all(|item| !RAIN_GEAR.contains(&item.as_str())));
            prop_assert!(advice.best_times.is_empty());

            // Agriculture copes with the same input
            let farm = recommend(Persona::Agriculture, &now, &[], &config);
            prop_assert!(farm.as_agriculture().is_some());
        }

        /// Identical inputs give byte-identical bundles
        #[test]
        fn prop_recommend_is_idempotent(now in current_strategy(), rain in prop::sample::select(vec!["0", "0.5", "4"])) {
            let daily = aggregate(&day_with_rain(10, rain));
            let engine = RecommendationEngine::default();

            for persona in [Persona::Agriculture, Persona::Travel] {
                let first = serde_json::to_string(&engine.recommend(persona, &now, &daily)).unwrap();
                let second = serde_json::to_string(&engine.recommend(persona, &now, &daily)).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
