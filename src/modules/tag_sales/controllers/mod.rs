mod tag_sales_controller;

pub use tag_sales_controller::{configure_tag_sales_routes, get_tag_sales};
