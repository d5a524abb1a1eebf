use rust_decimal::Decimal;
use serde::Serialize;

/// Period-over-period movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn glyph(&self) -> &'static str {
        match self {
            Direction::Up => "↗",
            Direction::Down => "↘",
            Direction::Flat => "↔",
        }
    }

    pub fn qualifier(&self) -> &'static str {
        match self {
            Direction::Up => "more",
            Direction::Down => "less",
            Direction::Flat => "same",
        }
    }
}

/// Trend descriptor comparing a period total with the previous period's
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub current_total: Decimal,
    pub previous_total: Decimal,
    /// `None` exactly when the previous total is zero; a JSON number on the wire
    #[serde(rename = "changePercent", with = "rust_decimal::serde::float_option")]
    pub percent_change: Option<Decimal>,
    #[serde(rename = "arrow")]
    pub direction: Direction,
    #[serde(rename = "footer")]
    pub summary: String,
}

/// Domain aggregate plus the optional trend against the previous period
#[derive(Debug, Clone, Serialize)]
pub struct Aggregates<A> {
    #[serde(flatten)]
    pub summary: A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonResult>,
}

impl<A> Aggregates<A> {
    pub fn new(summary: A) -> Self {
        Self {
            summary,
            comparison: None,
        }
    }

    pub fn with_comparison(mut self, comparison: ComparisonResult) -> Self {
        self.comparison = Some(comparison);
        self
    }
}

/// One period's page of raw rows and the total folded from that page
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRows<R> {
    pub data: Vec<R>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowComparison<R> {
    #[serde(rename = "actual")]
    pub current: PeriodRows<R>,
    #[serde(rename = "anterior")]
    pub previous: PeriodRows<R>,
    #[serde(flatten)]
    pub result: ComparisonResult,
}

/// Caller-facing shape of a report computation
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportOutcome<R, A> {
    /// `{ data, aggregates }`; `data` is empty unless the domain returns
    /// rows alongside its aggregates
    Aggregated {
        data: Vec<R>,
        aggregates: Aggregates<A>,
    },
    /// Bare page of raw rows
    Rows(Vec<R>),
    /// Raw pages for both periods with the trend between them
    Compared(RowComparison<R>),
}

impl<R, A> ReportOutcome<R, A> {
    pub fn aggregates(&self) -> Option<&Aggregates<A>> {
        match self {
            ReportOutcome::Aggregated { aggregates, .. } => Some(aggregates),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<&[R]> {
        match self {
            ReportOutcome::Aggregated { data, .. } => Some(data),
            ReportOutcome::Rows(rows) => Some(rows),
            ReportOutcome::Compared(_) => None,
        }
    }
}
