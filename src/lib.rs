//! Toll-road revenue and traffic reporting library
//!
//! The report domains (cash collection, lane transits, tag sales, the
//! statistical report and the billing listing) share one temporal
//! aggregation engine in `modules::analytics`.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::analytics;
pub use modules::billing;
pub use modules::collections;
pub use modules::statistics;
pub use modules::tag_sales;
pub use modules::transits;
