use rust_decimal::Decimal;
use serde::Serialize;

/// `{ aggregates }` envelope of the statistics analyses
#[derive(Debug, Clone, Serialize)]
pub struct Analysis<T> {
    pub aggregates: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakHour {
    /// `HH:00`
    pub hour: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayAverage {
    /// `Sun` .. `Sat`
    pub day: String,
    pub average: Decimal,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub day: String,
    pub hour: String,
    pub count: i64,
}

/// Transit volume over time: per day, per hour and per weekday × hour
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalAnalysis {
    pub total_transits: i64,
    /// Mean over days that have data
    pub daily_average: Decimal,
    pub peak_day: Option<DayCount>,
    pub peak_hour: Option<PeakHour>,
    pub daily_trend: Vec<DayCount>,
    pub weekday_averages: Vec<WeekdayAverage>,
    pub heatmap: Vec<HeatCell>,
    pub top_days: Vec<DayCount>,
    pub bottom_days: Vec<DayCount>,
}
