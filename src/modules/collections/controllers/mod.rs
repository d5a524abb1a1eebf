mod collection_controller;

pub use collection_controller::{configure_collection_routes, get_collections};
