pub mod mysql_row_source;
pub mod row_source;

pub use mysql_row_source::{MySqlRowSource, TableSchema};
pub use row_source::RowSource;
