pub mod statistics_report;

pub use statistics_report::{
    fold_cabins, fold_overview, fold_temporal, CabinRows, StatisticsReport, StatisticsService,
    TemporalRows,
};
