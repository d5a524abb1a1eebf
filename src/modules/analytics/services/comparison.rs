use chrono::Datelike;
use tracing::debug;

use crate::core::{calendar, Result};
use crate::modules::analytics::models::{
    CalendarSpan, DateBounds, RangeToken, TimeWindow, WindowSource,
};

/// Derives the window immediately preceding a current window
pub struct ComparisonPeriodCalculator;

impl ComparisonPeriodCalculator {
    /// Previous window of a resolved current window.
    ///
    /// `lastMonth` steps back one whole calendar month. Every other window,
    /// named or custom, is shifted by its own duration so that the previous
    /// window ends one tick before the current one starts.
    pub fn previous(current: &TimeWindow, base: Option<RangeToken>) -> Result<TimeWindow> {
        if base == Some(RangeToken::LastMonth) {
            let (year, month) =
                calendar::previous_month(current.from.year(), current.from.month());
            return TimeWindow::new(
                calendar::start_of_month(year, month)?,
                calendar::end_of_month(year, month)?,
            );
        }

        let duration = current.duration();
        let until = current.from - calendar::tick();
        TimeWindow::new(until - duration, until)
    }

    /// Previous window for possibly half-open bounds; `None` skips comparison
    pub fn previous_for_bounds(
        bounds: &DateBounds,
        base: Option<RangeToken>,
    ) -> Result<Option<TimeWindow>> {
        let Some(current) = bounds.window() else {
            debug!("Current window is not closed, comparison skipped");
            return Ok(None);
        };
        Self::previous(&current, base).map(Some)
    }

    /// Previous window aligned to how the current one was selected.
    ///
    /// A `mes` window compares against the prior calendar month and an
    /// `anio` window against the prior calendar year, whatever token rode
    /// along to request the comparison.
    pub fn previous_for_source(
        bounds: &DateBounds,
        source: WindowSource,
    ) -> Result<Option<TimeWindow>> {
        match source {
            WindowSource::Calendar(CalendarSpan::Month) => {
                Self::previous_for_bounds(bounds, Some(RangeToken::LastMonth))
            }
            WindowSource::Calendar(CalendarSpan::Year) => {
                let Some(current) = bounds.window() else {
                    return Ok(None);
                };
                let (from, until) = calendar::year_bounds(current.from.year() - 1)?;
                TimeWindow::new(from, until).map(Some)
            }
            WindowSource::Token(token) | WindowSource::Default(token) => {
                Self::previous_for_bounds(bounds, Some(token))
            }
            WindowSource::Explicit | WindowSource::Unbounded => {
                Self::previous_for_bounds(bounds, None)
            }
        }
    }
}
