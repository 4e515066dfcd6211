//! Common types used across the advisor

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ForecastError;

/// Consumer mode selecting the rule table and output shape
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Agriculture,
    Travel,
}

impl Persona {
    pub fn code(&self) -> &'static str {
        match self {
            Persona::Agriculture => "agriculture",
            Persona::Travel => "travel",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Persona {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agriculture" => Ok(Persona::Agriculture),
            "travel" => Ok(Persona::Travel),
            _ => Err(ForecastError::UnknownPersona(s.to_string())),
        }
    }
}

/// Alert severity, fixed by the rule that emits the alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// Qualitative travel outlook
///
/// Variants are declared worst first so that `Ord` ranks `Poor < Excellent`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl std::fmt::Display for Outlook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outlook::Poor => write!(f, "Poor"),
            Outlook::Fair => write!(f, "Fair"),
            Outlook::Good => write!(f, "Good"),
            Outlook::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Part of the day used when suggesting travel times
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DaySegment {
    Morning,
    Afternoon,
    Evening,
}

impl DaySegment {
    pub const ALL: [DaySegment; 3] = [DaySegment::Morning, DaySegment::Afternoon, DaySegment::Evening];

    /// Hour range covered by the segment, start inclusive and end exclusive
    pub fn hours(&self) -> (u32, u32) {
        match self {
            DaySegment::Morning => (6, 12),
            DaySegment::Afternoon => (12, 18),
            DaySegment::Evening => (18, 24),
        }
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        let (start, end) = self.hours();
        (start..end).contains(&timestamp.hour())
    }
}

impl std::fmt::Display for DaySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (start, end) = self.hours();
        let name = match self {
            DaySegment::Morning => "Morning",
            DaySegment::Afternoon => "Afternoon",
            DaySegment::Evening => "Evening",
        };
        write!(f, "{} ({:02}:00-{:02}:00)", name, start, end)
    }
}

/// Meteorological season (northern hemisphere)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        match timestamp.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}
