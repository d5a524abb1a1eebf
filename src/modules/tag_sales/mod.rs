pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{TagSaleRecord, TagSalesSummary};
pub use services::{TagSalesReport, TagSalesService};
