pub mod billing_schema;

pub use billing_schema::{BillingSource, BILLING_VIEW};
