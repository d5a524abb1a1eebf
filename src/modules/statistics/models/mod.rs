pub mod cabin_analysis;
pub mod payment_class;
pub mod statistics_record;
pub mod statistics_summary;
pub mod temporal_analysis;

pub use cabin_analysis::{CabinAnalysis, CabinCount, CabinPayment, CabinShare, CabinShift, DailyCabin};
pub use payment_class::{payment_classes, PaymentClass, CASH, TAG_TYPES};
pub use statistics_record::StatisticsRecord;
pub use statistics_summary::{
    CategoryRevenue, CategorySplit, ExemptType, MonthlyRevenue, StatisticsSummary, TagTypeTotal,
};
pub use temporal_analysis::{Analysis, DayCount, HeatCell, PeakHour, TemporalAnalysis, WeekdayAverage};
