pub mod transit_schema;

pub use transit_schema::{TransitSource, TRANSITS_VIEW};
