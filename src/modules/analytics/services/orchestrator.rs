use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::Result;
use crate::modules::analytics::models::{
    Aggregates, DateBounds, DomainPolicy, FilterSpecification, GroupedQuery, Measure,
    NormalizedSpec, PeriodRows, Predicate, ReportOutcome, RowComparison, RowQuery, Scope,
    TimeWindow,
};
use crate::modules::analytics::repositories::RowSource;

use super::aggregation;
use super::comparison::ComparisonPeriodCalculator;
use super::filter_normalizer::FilterNormalizer;

/// What a report domain plugs into the shared engine
#[async_trait]
pub trait ReportDomain: Send + Sync {
    type Record: Serialize + Send + Sync + 'static;
    type Summary: Serialize + Send + 'static;

    fn policy(&self) -> &DomainPolicy;

    /// Row source the domain's raw records and trend totals come from
    fn rows(&self) -> Arc<dyn RowSource<Self::Record>>;

    /// Domain predicates derived from the normalized filters
    fn predicates(&self, spec: &NormalizedSpec) -> Result<Vec<Predicate>>;

    /// Measure summed for period totals
    fn trend_measure(&self) -> Measure {
        Measure::Amount
    }

    /// Monetary value a raw record contributes to a page total
    fn record_total(&self, record: &Self::Record) -> Decimal;

    /// Domain aggregate over one scope
    async fn summarize(&self, scope: &Scope, spec: &NormalizedSpec) -> Result<Self::Summary>;
}

/// Normalized request bound to a domain: the current scope and, when a
/// comparison was asked for and can be derived, the previous one
#[derive(Debug, Clone)]
pub struct PreparedReport {
    pub spec: NormalizedSpec,
    pub scope: Scope,
    pub previous: Option<Scope>,
}

impl PreparedReport {
    pub fn window(&self) -> Option<TimeWindow> {
        self.scope.bounds.window()
    }
}

/// Composes normalisation, windowing, fetching and aggregation for one domain
pub struct ReportOrchestrator<D: ReportDomain> {
    domain: D,
}

impl<D: ReportDomain> ReportOrchestrator<D> {
    pub fn new(domain: D) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Normalize filters and derive the scopes a computation runs against
    pub fn prepare(&self, filters: FilterSpecification, now: DateTime<Utc>) -> Result<PreparedReport> {
        let spec = FilterNormalizer::new(self.domain.policy()).normalize(filters, now)?;
        let scope = Scope::new(spec.bounds, self.domain.predicates(&spec)?);

        let previous = if spec.compare {
            let window =
                ComparisonPeriodCalculator::previous_for_source(&spec.bounds, spec.window_source)?;
            if window.is_none() {
                warn!(
                    domain = self.domain.policy().name,
                    "Comparison requested without a closed window, skipped"
                );
            }
            window.map(|window| scope.with_bounds(DateBounds::from(window)))
        } else {
            None
        };

        Ok(PreparedReport {
            spec,
            scope,
            previous,
        })
    }

    /// Run one report computation.
    ///
    /// | includeData | compare | result |
    /// |---|---|---|
    /// | no | no | aggregates of the current window |
    /// | yes | no | page of rows (with aggregates when the domain asks) |
    /// | no | yes | aggregates plus trend from both windows' totals |
    /// | yes | yes | pages for both windows, trend folded from the pages |
    pub async fn run(
        &self,
        filters: FilterSpecification,
        now: DateTime<Utc>,
    ) -> Result<ReportOutcome<D::Record, D::Summary>> {
        let prepared = self.prepare(filters, now)?;
        let policy = self.domain.policy();

        info!(
            domain = policy.name,
            include_data = prepared.spec.include_data,
            compare = prepared.previous.is_some(),
            "Running report"
        );

        match (prepared.spec.include_data, prepared.previous.as_ref()) {
            (false, None) => {
                let summary = self.domain.summarize(&prepared.scope, &prepared.spec).await?;
                Ok(ReportOutcome::Aggregated {
                    data: Vec::new(),
                    aggregates: Aggregates::new(summary),
                })
            }
            (true, None) => {
                let query = RowQuery {
                    scope: prepared.scope.clone(),
                    page: prepared.spec.page,
                };
                if !policy.rows_with_aggregates {
                    let rows = self.domain.rows().fetch_rows(&query).await?;
                    return Ok(ReportOutcome::Rows(rows));
                }

                let source = self.domain.rows();
                let (rows, summary) = tokio::try_join!(
                    source.fetch_rows(&query),
                    self.domain.summarize(&prepared.scope, &prepared.spec),
                )?;
                Ok(ReportOutcome::Aggregated {
                    data: rows,
                    aggregates: Aggregates::new(summary),
                })
            }
            (false, Some(previous)) => {
                let (summary, current_total, previous_total) = tokio::try_join!(
                    self.domain.summarize(&prepared.scope, &prepared.spec),
                    self.period_total(&prepared.scope),
                    self.period_total(previous),
                )?;
                let comparison = aggregation::trend(current_total, previous_total);
                Ok(ReportOutcome::Aggregated {
                    data: Vec::new(),
                    aggregates: Aggregates::new(summary).with_comparison(comparison),
                })
            }
            (true, Some(previous)) => {
                let source = self.domain.rows();
                let page = prepared.spec.page;
                let current_query = RowQuery {
                    scope: prepared.scope.clone(),
                    page,
                };
                let previous_query = RowQuery {
                    scope: previous.clone(),
                    page,
                };
                let (current_rows, previous_rows) = tokio::try_join!(
                    source.fetch_rows(&current_query),
                    source.fetch_rows(&previous_query),
                )?;

                // Totals come from the returned pages, not the full periods
                let take = usize::try_from(page.take).unwrap_or(usize::MAX);
                if current_rows.len() >= take || previous_rows.len() >= take {
                    debug!(
                        domain = policy.name,
                        take = page.take,
                        "Comparison page is full; totals cover the page only"
                    );
                }

                let current = self.page_rows(current_rows);
                let previous = self.page_rows(previous_rows);
                let result = aggregation::trend(current.total, previous.total);
                Ok(ReportOutcome::Compared(RowComparison {
                    current,
                    previous,
                    result,
                }))
            }
        }
    }

    /// Ungrouped sum of the domain's trend measure
    pub async fn period_total(&self, scope: &Scope) -> Result<Decimal> {
        let query = GroupedQuery::new(scope.clone()).measures([self.domain.trend_measure()]);
        let rows = self.domain.rows().fetch_grouped(&query).await?;
        Ok(rows.iter().map(|row| row.measure(0)).sum())
    }

    fn page_rows(&self, data: Vec<D::Record>) -> PeriodRows<D::Record> {
        let total = data.iter().map(|record| self.domain.record_total(record)).sum();
        PeriodRows { data, total }
    }
}
