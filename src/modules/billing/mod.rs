pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{BillingRecord, BillingSummary};
pub use services::{BillingReport, BillingService};
