//! Daily rollup of sub-daily forecast samples

use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;

use crate::models::{DailySummary, ObservationPoint};

const MIDDAY_SECONDS: i64 = 12 * 60 * 60;

/// Collapse observation points into one summary per calendar date
///
/// Days appear in first-seen order. The input is trusted to be chronological
/// and is not re-sorted; a partial final day is summarized from whatever
/// samples it has.
pub fn aggregate(points: &[ObservationPoint]) -> Vec<DailySummary> {
    let mut groups: Vec<(NaiveDate, Vec<&ObservationPoint>)> = Vec::new();

    for point in points {
        let date = point.timestamp.date();
        match groups.iter_mut().find(|(day, _)| *day == date) {
            Some((_, items)) => items.push(point),
            None => groups.push((date, vec![point])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(date, items)| summarize_day(date, &items))
        .collect()
}

/// Summarize one day; `None` only for an empty group
fn summarize_day(date: NaiveDate, items: &[&ObservationPoint]) -> Option<DailySummary> {
    let (first, rest) = items.split_first()?;

    let mut temp_min = first.temperature_celsius;
    let mut temp_max = first.temperature_celsius;
    let mut wind_speed_max = first.wind_speed_kmh;
    for item in rest {
        temp_min = temp_min.min(item.temperature_celsius);
        temp_max = temp_max.max(item.temperature_celsius);
        wind_speed_max = wind_speed_max.max(item.wind_speed_kmh);
    }

    let count = items.len();
    let total_rain = saturating_sum(items.iter().map(|i| i.precipitation_mm));
    let temp_sum = saturating_sum(items.iter().map(|i| i.temperature_celsius));
    let humidity_sum: i64 = items.iter().map(|i| i64::from(i.humidity_percent)).sum();

    let representative = items
        .iter()
        .min_by_key(|i| (distance_from_midday(i), i.timestamp))
        .unwrap_or(first);

    Some(DailySummary {
        date,
        temp_min,
        temp_max,
        temp_avg: (temp_sum / Decimal::from(count)).round_dp(2),
        humidity_avg: (humidity_sum / count as i64) as i32,
        total_rain,
        wind_speed_max,
        description: representative.description.clone(),
        icon: representative.icon.clone(),
        sample_count: count,
        details: items.iter().map(|i| (*i).clone()).collect(),
    })
}

/// Sum that clamps at `Decimal::MAX` / `Decimal::MIN` instead of overflowing
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

fn distance_from_midday(point: &ObservationPoint) -> i64 {
    (i64::from(point.timestamp.num_seconds_from_midnight()) - MIDDAY_SECONDS).abs()
}
