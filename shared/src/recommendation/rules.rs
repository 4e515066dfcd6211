//! Rule tables as data
//!
//! Every persona keeps an ordered list of [`Rule`] records. Each rule is a
//! predicate plus the effects it appends when the predicate holds. Rules never
//! short-circuit each other: all of them are evaluated once per call, in table
//! order, and output lists are append-only.

use rust_decimal::Decimal;

use crate::models::{Alert, CurrentConditions, DailySummary};

/// Inputs visible to a rule
#[derive(Debug)]
pub struct RuleContext<'a, T> {
    pub current: &'a CurrentConditions,
    pub daily: &'a [DailySummary],
    pub thresholds: &'a T,
}

impl<'a, T> RuleContext<'a, T> {
    pub fn new(current: &'a CurrentConditions, daily: &'a [DailySummary], thresholds: &'a T) -> Self {
        Self {
            current,
            daily,
            thresholds,
        }
    }

    /// The first summary is "today"
    pub fn today(&self) -> Option<&'a DailySummary> {
        self.daily.first()
    }

    pub fn today_rain(&self) -> Option<Decimal> {
        self.today().map(|d| d.total_rain)
    }
}

/// Something a fired rule contributes to the bundle
pub enum Effect<T> {
    Alert(fn(&RuleContext<'_, T>) -> Alert),
    Recommend(fn(&RuleContext<'_, T>) -> String),
    Task(&'static str),
    Pack(&'static [&'static str]),
}

/// A named predicate with its effects
pub struct Rule<T: 'static> {
    pub id: &'static str,
    pub condition: fn(&RuleContext<'_, T>) -> bool,
    pub effects: &'static [Effect<T>],
}

/// Accumulated effects of one table evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    pub fired: Vec<&'static str>,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
    pub tasks: Vec<String>,
    pub packing: Vec<String>,
}

/// Evaluate every rule of the table against the context
pub fn evaluate<T: 'static>(rules: &[Rule<T>], ctx: &RuleContext<'_, T>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for rule in rules {
        if !(rule.condition)(ctx) {
            continue;
        }

        outcome.fired.push(rule.id);
        for effect in rule.effects {
            match effect {
                Effect::Alert(build) => outcome.alerts.push(build(ctx)),
                Effect::Recommend(build) => outcome.recommendations.push(build(ctx)),
                Effect::Task(task) => outcome.tasks.push((*task).to_string()),
                Effect::Pack(items) => outcome
                    .packing
                    .extend(items.iter().map(|item| (*item).to_string())),
            }
        }
    }

    outcome
}
