//! Services for the Weather Advisor CLI

pub mod advisory;
pub mod reporting;

pub use advisory::AdvisoryService;
