pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CabinAnalysis, StatisticsRecord, StatisticsSummary, TemporalAnalysis};
pub use services::{StatisticsReport, StatisticsService};
