use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourCount {
    /// `HH:00`
    pub hour: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyHours {
    pub date: String,
    pub hours: Vec<HourCount>,
}

/// Transit aggregate: hourly profile of the window and per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitSummary {
    pub total_transits: i64,
    pub hourly: Vec<HourCount>,
    pub daily_hourly: Vec<DailyHours>,
}
