pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CollectionRecord, CollectionSummary};
pub use services::{CollectionReport, CollectionService};
