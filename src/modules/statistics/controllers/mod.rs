mod statistics_controller;

pub use statistics_controller::{
    configure_statistics_routes, get_cabin_analysis, get_statistics, get_temporal_analysis,
};
