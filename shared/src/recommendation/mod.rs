//! Persona-specific recommendation engine
//!
//! The engine is a pure function of current conditions, the daily summaries
//! and the thresholds it was built with. It holds no mutable state, so one
//! instance can be shared between threads.

pub mod agriculture;
pub mod outlook;
pub mod rules;
pub mod travel;

use std::sync::Arc;

use crate::error::ForecastResult;
use crate::models::{CurrentConditions, DailySummary, RecommendationBundle, ThresholdConfig};
use crate::types::Persona;

/// Produce the bundle for one persona
pub fn recommend(
    persona: Persona,
    current: &CurrentConditions,
    daily: &[DailySummary],
    thresholds: &ThresholdConfig,
) -> RecommendationBundle {
    match persona {
        Persona::Agriculture => {
            RecommendationBundle::Agriculture(agriculture::advise(current, daily, &thresholds.agriculture))
        }
        Persona::Travel => RecommendationBundle::Travel(travel::advise(current, daily, &thresholds.travel)),
    }
}

/// Recommendation engine bound to a threshold snapshot
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    thresholds: Arc<ThresholdConfig>,
}

impl RecommendationEngine {
    pub fn new(thresholds: Arc<ThresholdConfig>) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn recommend(
        &self,
        persona: Persona,
        current: &CurrentConditions,
        daily: &[DailySummary],
    ) -> RecommendationBundle {
        recommend(persona, current, daily, &self.thresholds)
    }

    /// Same as [`Self::recommend`] with the persona given by name
    pub fn recommend_for(
        &self,
        persona: &str,
        current: &CurrentConditions,
        daily: &[DailySummary],
    ) -> ForecastResult<RecommendationBundle> {
        let persona: Persona = persona.parse()?;
        Ok(self.recommend(persona, current, daily))
    }
}
