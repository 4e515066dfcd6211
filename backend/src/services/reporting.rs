//! Tabular export of daily summaries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::DailySummary;

use crate::error::{AppError, AppResult};

/// One CSV row per day; raw samples are left out
#[derive(Debug, Serialize)]
pub struct DailyRow<'a> {
    pub date: NaiveDate,
    pub temp_min: Decimal,
    pub temp_max: Decimal,
    pub temp_avg: Decimal,
    pub humidity_avg: i32,
    pub total_rain: Decimal,
    pub wind_speed_max: Decimal,
    pub description: &'a str,
    pub icon: &'a str,
    pub sample_count: usize,
}

impl<'a> From<&'a DailySummary> for DailyRow<'a> {
    fn from(day: &'a DailySummary) -> Self {
        Self {
            date: day.date,
            temp_min: day.temp_min,
            temp_max: day.temp_max,
            temp_avg: day.temp_avg,
            humidity_avg: day.humidity_avg,
            total_rain: day.total_rain,
            wind_speed_max: day.wind_speed_max,
            description: &day.description,
            icon: &day.icon,
            sample_count: day.sample_count,
        }
    }
}

/// Export daily summaries as CSV
pub fn export_to_csv(daily: &[DailySummary]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for day in daily {
        wtr.serialize(DailyRow::from(day))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: u32, rain: i64) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 5, date).unwrap(),
            temp_min: Decimal::new(105, 1),
            temp_max: Decimal::from(21),
            temp_avg: Decimal::new(1575, 2),
            humidity_avg: 64,
            total_rain: Decimal::new(rain, 1),
            wind_speed_max: Decimal::from(18),
            description: "light rain".to_string(),
            icon: "10d".to_string(),
            sample_count: 8,
            details: Vec::new(),
        }
    }

    #[test]
    fn test_export_header_and_rows() {
        let csv = export_to_csv(&[day(1, 32), day(2, 0)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,temp_min,temp_max,temp_avg,humidity_avg,total_rain,wind_speed_max,description,icon,sample_count"
        );
        assert_eq!(lines[1], "2024-05-01,10.5,21,15.75,64,3.2,18,light rain,10d,8");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export_to_csv(&[]).unwrap(), "");
    }
}
