mod transit_controller;

pub use transit_controller::{configure_transit_routes, get_transits};
