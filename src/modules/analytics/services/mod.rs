pub mod aggregation;
pub mod comparison;
pub mod filter_normalizer;
pub mod orchestrator;
pub mod pagination;
pub mod range_resolver;

pub use comparison::ComparisonPeriodCalculator;
pub use filter_normalizer::FilterNormalizer;
pub use orchestrator::{PreparedReport, ReportDomain, ReportOrchestrator};
pub use pagination::PaginationGuard;
pub use range_resolver::RangeResolver;
