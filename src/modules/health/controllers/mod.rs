mod health_controller;

pub use health_controller::{configure_health_routes, health_check, readiness_check};
