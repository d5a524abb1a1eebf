pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{TransitRecord, TransitSummary};
pub use services::{TransitReport, TransitService};
