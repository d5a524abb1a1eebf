pub mod collection_schema;

pub use collection_schema::{CollectionSource, COLLECTIONS_VIEW};
