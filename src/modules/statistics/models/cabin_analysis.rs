use rust_decimal::Decimal;
use serde::Serialize;

use super::payment_class::PaymentClass;
use super::temporal_analysis::PeakHour;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabinCount {
    pub cabin: i64,
    pub vehicles: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CabinShare {
    pub cabin: i64,
    pub vehicles: i64,
    /// Percentage of all vehicles in the window
    pub share: Decimal,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCabin {
    pub date: String,
    pub cabin: i64,
    pub vehicles: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabinPayment {
    pub cabin: i64,
    pub class: PaymentClass,
    pub vehicles: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabinShift {
    pub cabin: i64,
    pub shift: i64,
    pub transits: i64,
}

/// Lane-level breakdown of vehicles, revenue and payment classes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinAnalysis {
    pub total_vehicles: i64,
    pub daily_average: Decimal,
    pub top_cabin: Option<CabinCount>,
    pub bottom_cabin: Option<CabinCount>,
    pub peak_hour: Option<PeakHour>,
    /// Descending by vehicles
    pub cabins: Vec<CabinShare>,
    pub daily_trend: Vec<DailyCabin>,
    pub payment_by_cabin: Vec<CabinPayment>,
    pub shifts: Vec<CabinShift>,
    pub top_cabins: Vec<CabinCount>,
    pub bottom_cabins: Vec<CabinCount>,
}
