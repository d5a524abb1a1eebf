pub mod transit_report;

pub use transit_report::{transit_predicates, TransitReport, TransitService};
