pub mod filter;
pub mod location;
pub mod policy;
pub mod query;
pub mod range;
pub mod report;

pub use filter::{CalendarSpan, FilterSpecification, NormalizedSpec, Page, WindowSource};
pub use location::{Plaza, PLAZAS};
pub use policy::DomainPolicy;
pub use query::{
    Field, GroupKey, GroupedQuery, GroupedRow, KeyValue, Measure, Operator, Predicate,
    PredicateValue, RowQuery, Scope,
};
pub use range::{DateBounds, RangeSelector, RangeToken, TimeWindow};
pub use report::{
    Aggregates, ComparisonResult, Direction, PeriodRows, ReportOutcome, RowComparison,
};
