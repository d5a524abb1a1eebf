use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::debug;

use crate::core::{calendar, Result};
use crate::modules::analytics::models::{RangeSelector, RangeToken, TimeWindow};

/// Maps a named range token to an absolute window anchored at `now`
pub struct RangeResolver;

impl RangeResolver {
    /// Resolve a base token.
    ///
    /// * rolling tokens: `[now - N days, now]`
    /// * `currentMonth`: `[first instant of this month, now]`
    /// * `lastMonth`: the whole previous calendar month, ending at 23:59:59.999
    pub fn resolve(token: RangeToken, now: DateTime<Utc>) -> Result<TimeWindow> {
        let window = match token {
            RangeToken::Last7d | RangeToken::Last15d | RangeToken::Last90d => {
                let days = token.rolling_days().unwrap_or_default();
                TimeWindow::new(now - Duration::days(days), now)?
            }
            RangeToken::CurrentMonth => {
                TimeWindow::new(calendar::start_of_month(now.year(), now.month())?, now)?
            }
            RangeToken::LastMonth => {
                let (year, month) = calendar::previous_month(now.year(), now.month());
                TimeWindow::new(
                    calendar::start_of_month(year, month)?,
                    calendar::end_of_month(year, month)?,
                )?
            }
        };

        debug!(
            token = %token,
            from = %window.from.to_rfc3339(),
            until = %window.until.to_rfc3339(),
            "Resolved range token"
        );

        Ok(window)
    }

    /// Parse a raw token (compare suffix allowed) and resolve its base
    pub fn resolve_str(raw: &str, now: DateTime<Utc>) -> Result<(RangeSelector, TimeWindow)> {
        let selector: RangeSelector = raw.parse()?;
        let window = Self::resolve(selector.token, now)?;
        Ok((selector, window))
    }
}
