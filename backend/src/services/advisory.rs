//! Advisory service: aggregation plus persona recommendations
//!
//! Thresholds live behind an `ArcSwap` so a reload replaces them atomically.
//! Each call takes one snapshot and uses it for the whole evaluation, so a
//! concurrent reload never mixes old and new limits within a bundle.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use serde_json::Value;
use shared::{
    aggregate, CurrentConditions, DailySummary, ObservationPoint, Persona, RecommendationBundle,
    RecommendationEngine, ThresholdConfig,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Daily summaries together with the bundle derived from them
#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    pub daily: Vec<DailySummary>,
    pub bundle: RecommendationBundle,
}

#[derive(Debug, Clone)]
pub struct AdvisoryService {
    thresholds: Arc<ArcSwap<ThresholdConfig>>,
    max_days: usize,
}

impl AdvisoryService {
    pub fn new(thresholds: ThresholdConfig, max_days: usize) -> Self {
        Self {
            thresholds: Arc::new(ArcSwap::from_pointee(thresholds)),
            max_days,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thresholds.clone(), config.forecast.max_days)
    }

    /// Current threshold snapshot
    pub fn thresholds(&self) -> Arc<ThresholdConfig> {
        self.thresholds.load_full()
    }

    /// Aggregate observation points, keeping at most `max_days` days
    pub fn summarize(&self, points: &[ObservationPoint]) -> Vec<DailySummary> {
        let mut daily = aggregate(points);
        if daily.len() > self.max_days {
            tracing::debug!(
                days = daily.len(),
                max_days = self.max_days,
                "Dropping days beyond forecast window"
            );
            daily.truncate(self.max_days);
        }
        daily
    }

    pub fn advise(
        &self,
        persona: Persona,
        current: &CurrentConditions,
        points: &[ObservationPoint],
    ) -> Advisory {
        let daily = self.summarize(points);
        let engine = RecommendationEngine::new(self.thresholds());
        let bundle = engine.recommend(persona, current, &daily);

        tracing::debug!(
            persona = %persona,
            days = daily.len(),
            alerts = bundle.alerts().len(),
            recommendations = bundle.recommendations().len(),
            "Recommendation bundle built"
        );

        Advisory { daily, bundle }
    }

    /// Same as [`Self::advise`] with the persona given by name
    pub fn advise_for(
        &self,
        persona: &str,
        current: &CurrentConditions,
        points: &[ObservationPoint],
    ) -> AppResult<Advisory> {
        let persona: Persona = persona.parse()?;
        Ok(self.advise(persona, current, points))
    }

    /// Validate and atomically install new thresholds
    ///
    /// On failure the previous thresholds stay in place.
    pub fn reload_thresholds(&self, thresholds: ThresholdConfig) -> AppResult<()> {
        if let Err(msg) = shared::validate_thresholds(&thresholds) {
            tracing::warn!(reason = msg, "Rejected threshold reload, keeping previous thresholds");
            return Err(AppError::InvalidThresholds(msg));
        }

        self.thresholds.store(Arc::new(thresholds));
        tracing::info!("Thresholds reloaded");
        Ok(())
    }

    /// Overlay a JSON threshold document on the current thresholds and reload
    ///
    /// Fields missing from `json` keep their current values.
    pub fn reload_thresholds_from_json(&self, json: &str) -> AppResult<()> {
        let patch: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(self.thresholds().as_ref())?;
        overlay(&mut merged, patch);
        self.reload_thresholds(serde_json::from_value(merged)?)
    }
}

fn overlay(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                overlay(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}
