use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

const COMPARE_SUFFIXES: [&str; 2] = ["Previous", "Anterior"];

/// Closed set of relative time windows a report can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeToken {
    Last7d,
    Last15d,
    Last90d,
    CurrentMonth,
    LastMonth,
}

impl RangeToken {
    pub const ALL: [RangeToken; 5] = [
        RangeToken::Last7d,
        RangeToken::Last15d,
        RangeToken::Last90d,
        RangeToken::CurrentMonth,
        RangeToken::LastMonth,
    ];

    /// Nominal length in days for rolling windows, `None` for calendar months
    pub fn rolling_days(&self) -> Option<i64> {
        match self {
            RangeToken::Last7d => Some(7),
            RangeToken::Last15d => Some(15),
            RangeToken::Last90d => Some(90),
            RangeToken::CurrentMonth | RangeToken::LastMonth => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::Last7d => "last7d",
            RangeToken::Last15d => "last15d",
            RangeToken::Last90d => "last90d",
            RangeToken::CurrentMonth => "currentMonth",
            RangeToken::LastMonth => "lastMonth",
        }
    }

    fn parse_base(value: &str) -> Option<Self> {
        match value {
            "last7d" | "ultimos7d" => Some(RangeToken::Last7d),
            "last15d" | "ultimos15d" => Some(RangeToken::Last15d),
            "last90d" | "ultimos90d" => Some(RangeToken::Last90d),
            "currentMonth" | "mesActual" => Some(RangeToken::CurrentMonth),
            "lastMonth" | "ultimoMes" => Some(RangeToken::LastMonth),
            _ => None,
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeToken {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_base(s.trim()).ok_or_else(|| AppError::unknown_range(s))
    }
}

/// A range token plus the orthogonal "also compute the prior period" marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelector {
    pub token: RangeToken,
    pub compare: bool,
}

impl RangeSelector {
    pub fn new(token: RangeToken, compare: bool) -> Self {
        Self { token, compare }
    }
}

impl FromStr for RangeSelector {
    type Err = AppError;

    /// Accepts `last7d`, `lastMonthPrevious`, and the legacy
    /// `ultimos7d` / `ultimoMesAnterior` spellings.
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let (base, compare) = COMPARE_SUFFIXES
            .iter()
            .find_map(|suffix| raw.strip_suffix(suffix).map(|base| (base, true)))
            .unwrap_or((raw, false));

        RangeToken::parse_base(base)
            .map(|token| RangeSelector { token, compare })
            .ok_or_else(|| AppError::unknown_range(s))
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.compare {
            write!(f, "{}Previous", self.token)
        } else {
            write!(f, "{}", self.token)
        }
    }
}

/// Absolute window, both ends inclusive, UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self> {
        if from > until {
            return Err(AppError::validation(format!(
                "Window start ({}) must not be after its end ({})",
                from.to_rfc3339(),
                until.to_rfc3339()
            )));
        }
        Ok(Self { from, until })
    }

    pub fn duration(&self) -> Duration {
        self.until - self.from
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.until
    }
}

/// Possibly half-open window used for predicates.
/// Only a closed window (both ends known) can be compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateBounds {
    pub fn new(from: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Self {
        Self { from, until }
    }

    pub fn window(&self) -> Option<TimeWindow> {
        match (self.from, self.until) {
            (Some(from), Some(until)) if from <= until => Some(TimeWindow { from, until }),
            _ => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.until.is_none()
    }
}

impl From<TimeWindow> for DateBounds {
    fn from(window: TimeWindow) -> Self {
        Self {
            from: Some(window.from),
            until: Some(window.until),
        }
    }
}
