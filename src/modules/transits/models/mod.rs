pub mod transit_record;
pub mod transit_summary;

pub use transit_record::TransitRecord;
pub use transit_summary::{DailyHours, HourCount, TransitSummary};
