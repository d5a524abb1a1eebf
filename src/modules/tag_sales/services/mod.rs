pub mod tag_sales_report;

pub use tag_sales_report::{TagSalesReport, TagSalesService};
