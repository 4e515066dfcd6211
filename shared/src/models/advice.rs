//! Recommendation output models

use serde::{Deserialize, Serialize};

use crate::types::{Outlook, Persona, Severity};

/// A severity-tagged alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Field work that may be suitable under the current conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FarmActivity {
    Spraying,
    Harvesting,
    FieldPreparation,
    Planting,
    EquipmentMaintenance,
    StorageManagement,
    PlanningAndPaperwork,
}

impl std::fmt::Display for FarmActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FarmActivity::Spraying => write!(f, "Pesticide/fertilizer application"),
            FarmActivity::Harvesting => write!(f, "Harvesting"),
            FarmActivity::FieldPreparation => write!(f, "Field preparation"),
            FarmActivity::Planting => write!(f, "Planting"),
            FarmActivity::EquipmentMaintenance => write!(f, "Equipment maintenance"),
            FarmActivity::StorageManagement => write!(f, "Storage management"),
            FarmActivity::PlanningAndPaperwork => write!(f, "Planning and paperwork"),
        }
    }
}

/// Recommendations for agricultural operators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgricultureAdvice {
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
    pub tasks: Vec<String>,
    pub suitable_activities: Vec<FarmActivity>,
    pub crop_advice: Vec<String>,
}

/// Recommendations for travelers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelAdvice {
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
    /// Accumulated in rule order, may repeat items
    pub packing_list: Vec<String>,
    pub outlook: Outlook,
    pub best_times: Vec<String>,
}

impl TravelAdvice {
    /// Packing items in first-occurrence order without repeats
    pub fn distinct_packing_items(&self) -> Vec<&str> {
        let mut items: Vec<&str> = Vec::with_capacity(self.packing_list.len());
        for item in &self.packing_list {
            if !items.contains(&item.as_str()) {
                items.push(item);
            }
        }
        items
    }
}

/// Output of the recommendation engine for one persona
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "persona", rename_all = "snake_case")]
pub enum RecommendationBundle {
    Agriculture(AgricultureAdvice),
    Travel(TravelAdvice),
}

impl RecommendationBundle {
    pub fn persona(&self) -> Persona {
        match self {
            RecommendationBundle::Agriculture(_) => Persona::Agriculture,
            RecommendationBundle::Travel(_) => Persona::Travel,
        }
    }

    /// Alerts in rule evaluation order
    pub fn alerts(&self) -> &[Alert] {
        match self {
            RecommendationBundle::Agriculture(advice) => &advice.alerts,
            RecommendationBundle::Travel(advice) => &advice.alerts,
        }
    }

    pub fn recommendations(&self) -> &[String] {
        match self {
            RecommendationBundle::Agriculture(advice) => &advice.recommendations,
            RecommendationBundle::Travel(advice) => &advice.recommendations,
        }
    }

    pub fn as_agriculture(&self) -> Option<&AgricultureAdvice> {
        match self {
            RecommendationBundle::Agriculture(advice) => Some(advice),
            RecommendationBundle::Travel(_) => None,
        }
    }

    pub fn as_travel(&self) -> Option<&TravelAdvice> {
        match self {
            RecommendationBundle::Travel(advice) => Some(advice),
            RecommendationBundle::Agriculture(_) => None,
        }
    }
}
