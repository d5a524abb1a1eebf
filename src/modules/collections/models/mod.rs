pub mod collection_record;
pub mod collection_summary;

pub use collection_record::CollectionRecord;
pub use collection_summary::{CollectionSummary, DailyCollection};
