pub mod statistics_schema;

pub use statistics_schema::{StatisticsSource, STATISTICS_VIEW};
