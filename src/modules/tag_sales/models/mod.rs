pub mod tag_sale_record;
pub mod tag_sales_summary;

pub use tag_sale_record::TagSaleRecord;
pub use tag_sales_summary::TagSalesSummary;
