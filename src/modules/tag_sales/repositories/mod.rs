pub mod tag_sale_schema;

pub use tag_sale_schema::{TagSaleSource, TAG_SALES_VIEW};
