use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Deposits of one calendar day, keyed by plaza name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCollection {
    pub date: String,
    pub plazas: BTreeMap<String, Decimal>,
}

/// Collection aggregate: per-day and per-plaza deposits of the known plazas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub daily_totals: Vec<DailyCollection>,
    pub plaza_totals: BTreeMap<String, Decimal>,
    pub grand_total: Decimal,
}
