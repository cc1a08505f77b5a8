//! Reports for Tally

pub mod insights;

pub use insights::{CategoryTotal, InsightsReport, MonthTotal};
