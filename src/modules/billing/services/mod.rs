pub mod billing_report;

pub use billing_report::{fold_billing, BillingReport, BillingService};
