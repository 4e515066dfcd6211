//! Domain models for the Weather Advisor

mod advice;
mod thresholds;
mod weather;

pub use advice::*;
pub use thresholds::*;
pub use weather::*;
