pub mod collection_report;

pub use collection_report::{CollectionReport, CollectionService};
