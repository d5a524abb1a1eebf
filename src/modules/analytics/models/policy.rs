use chrono::{DateTime, Utc};

use super::range::RangeToken;

/// Per-domain knobs the generic engine is parameterised with
#[derive(Debug, Clone)]
pub struct DomainPolicy {
    pub name: &'static str,
    /// Window applied when the request carries no date filter at all
    pub default_range: RangeToken,
    pub default_take: i64,
    pub max_take: i64,
    /// Cap on explicit custom ranges, checked only when both bounds are given
    pub max_span_days: Option<i64>,
    /// Earliest instant the report may look at
    pub floor: Option<DateTime<Utc>>,
    pub supports_comparison: bool,
    /// Raw mode also returns aggregates computed alongside the rows
    pub rows_with_aggregates: bool,
    /// Symbolic plaza names are resolved to numeric ids
    pub resolves_plaza_ids: bool,
    /// The view carries a week number, so `semana` is a real filter
    pub has_week_column: bool,
    /// Raw rows are returned unless the caller sends `includeData=false`
    pub rows_by_default: bool,
    /// Size of top/bottom rankings
    pub ranking_size: usize,
}

impl DomainPolicy {
    pub fn new(name: &'static str, default_range: RangeToken) -> Self {
        Self {
            name,
            default_range,
            default_take: 200,
            max_take: 10_000,
            max_span_days: None,
            floor: None,
            supports_comparison: true,
            rows_with_aggregates: false,
            resolves_plaza_ids: false,
            has_week_column: false,
            rows_by_default: false,
            ranking_size: 5,
        }
    }

    pub fn with_max_take(mut self, max_take: i64) -> Self {
        self.max_take = max_take;
        self
    }

    pub fn with_max_span_days(mut self, days: i64) -> Self {
        self.max_span_days = Some(days);
        self
    }

    pub fn with_floor(mut self, floor: DateTime<Utc>) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn without_comparison(mut self) -> Self {
        self.supports_comparison = false;
        self
    }

    pub fn with_rows_and_aggregates(mut self) -> Self {
        self.rows_with_aggregates = true;
        self
    }

    pub fn resolving_plaza_ids(mut self) -> Self {
        self.resolves_plaza_ids = true;
        self
    }

    pub fn with_week_column(mut self) -> Self {
        self.has_week_column = true;
        self
    }

    pub fn listing_rows_by_default(mut self) -> Self {
        self.rows_by_default = true;
        self
    }
}
