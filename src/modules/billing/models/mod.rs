pub mod billing_record;
pub mod billing_summary;

pub use billing_record::BillingRecord;
pub use billing_summary::{BillingSummary, KindTotal};
