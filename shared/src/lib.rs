//! Shared types and forecast logic for the Weather Advisor
//!
//! This crate contains the pure aggregation and recommendation core used by
//! the command-line backend and by the browser (via WASM). Nothing in here
//! performs I/O.

pub mod aggregation;
pub mod error;
pub mod models;
pub mod recommendation;
pub mod types;
pub mod validation;

pub use aggregation::*;
pub use error::*;
pub use models::*;
pub use recommendation::{recommend, RecommendationEngine};
pub use types::*;
pub use validation::*;
