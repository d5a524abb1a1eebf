use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::debug;

use crate::core::{calendar, AppError, Result};
use crate::modules::analytics::models::location::plaza_id_for;
use crate::modules::analytics::models::{
    CalendarSpan, DateBounds, DomainPolicy, FilterSpecification, NormalizedSpec, RangeSelector, WindowSource,
};

use super::pagination::PaginationGuard;
use super::range_resolver::RangeResolver;

/// Turns a loose `FilterSpecification` into a `NormalizedSpec` under one
/// domain's policy.
///
/// Window precedence, highest first: explicit dates, month/year, range
/// token, the domain default. The default only applies when no date-shaping
/// filter was supplied at all. On views with a week column a lone week filter
/// counts as one and leaves the window open; elsewhere it is ignored.
pub struct FilterNormalizer<'a> {
    policy: &'a DomainPolicy,
}

impl<'a> FilterNormalizer<'a> {
    pub fn new(policy: &'a DomainPolicy) -> Self {
        Self { policy }
    }

    pub fn normalize(
        &self,
        mut filters: FilterSpecification,
        now: DateTime<Utc>,
    ) -> Result<NormalizedSpec> {
        // Aliases only fill canonical fields that are absent
        if filters.start_date.is_none() {
            filters.start_date = filters.since.take();
        }
        if filters.end_date.is_none() {
            filters.end_date = filters.through.take();
        }

        let selector = self.parse_selector(filters.range.as_deref())?;
        let plaza_id = self.resolve_plaza(&filters)?;

        let (mut bounds, window_source) = self.resolve_window(&filters, selector, now)?;

        if let Some(floor) = self.policy.floor {
            let from = bounds.from.map_or(floor, |from| from.max(floor));
            bounds.from = Some(from);
        }

        let page = PaginationGuard::clamp(
            filters.take,
            filters.skip,
            self.policy.default_take,
            self.policy.max_take,
        );

        let spec = NormalizedSpec {
            bounds,
            window_source,
            compare: selector.map(|s| s.compare).unwrap_or(false),
            selector,
            plaza_id,
            page,
            include_data: filters.include_data.unwrap_or(self.policy.rows_by_default),
            filters,
        };

        debug!(
            domain = self.policy.name,
            source = ?spec.window_source,
            from = ?spec.bounds.from,
            until = ?spec.bounds.until,
            compare = spec.compare,
            take = spec.page.take,
            skip = spec.page.skip,
            "Normalized report filters"
        );

        Ok(spec)
    }

    fn parse_selector(&self, raw: Option<&str>) -> Result<Option<RangeSelector>> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };

        let selector: RangeSelector = raw.parse()?;
        if selector.compare && !self.policy.supports_comparison {
            return Err(AppError::unknown_range(raw));
        }
        Ok(Some(selector))
    }

    fn resolve_plaza(&self, filters: &FilterSpecification) -> Result<Option<i64>> {
        if filters.plaza_id.is_some() || !self.policy.resolves_plaza_ids {
            return Ok(filters.plaza_id);
        }
        filters.plaza_name.as_deref().map(plaza_id_for).transpose()
    }

    fn resolve_window(
        &self,
        filters: &FilterSpecification,
        selector: Option<RangeSelector>,
        now: DateTime<Utc>,
    ) -> Result<(DateBounds, WindowSource)> {
        let from = filters
            .start_date
            .as_deref()
            .map(calendar::parse_instant)
            .transpose()?;
        let until = filters
            .end_date
            .as_deref()
            .map(calendar::parse_instant)
            .transpose()?;

        if from.is_some() || until.is_some() {
            if let (Some(from), Some(until)) = (from, until) {
                if from > until {
                    return Err(AppError::validation(
                        "Start date must not be after end date",
                    ));
                }
                self.check_span(until - from)?;
            }
            return Ok((DateBounds::new(from, until), WindowSource::Explicit));
        }

        if let Some(month) = filters.month {
            let year = filters.year.unwrap_or_else(|| now.year());
            let bounds = DateBounds::new(
                Some(calendar::start_of_month(year, month)?),
                Some(calendar::end_of_month(year, month)?),
            );
            return Ok((bounds, WindowSource::Calendar(CalendarSpan::Month)));
        }

        if let Some(year) = filters.year {
            let (from, until) = calendar::year_bounds(year)?;
            return Ok((
                DateBounds::new(Some(from), Some(until)),
                WindowSource::Calendar(CalendarSpan::Year),
            ));
        }

        if let Some(selector) = selector {
            let window = RangeResolver::resolve(selector.token, now)?;
            return Ok((window.into(), WindowSource::Token(selector.token)));
        }

        if !filters.has_date_filter(self.policy.has_week_column) {
            let token = self.policy.default_range;
            let window = RangeResolver::resolve(token, now)?;
            return Ok((window.into(), WindowSource::Default(token)));
        }

        Ok((DateBounds::default(), WindowSource::Unbounded))
    }

    fn check_span(&self, span: Duration) -> Result<()> {
        let Some(max_days) = self.policy.max_span_days else {
            return Ok(());
        };
        if span <= Duration::days(max_days) {
            return Ok(());
        }

        let whole = span.num_days();
        let days = if span > Duration::days(whole) { whole + 1 } else { whole };
        Err(AppError::RangeTooWide { days, max_days })
    }
}
