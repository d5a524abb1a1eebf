use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Tag sales aggregate over one window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSalesSummary {
    /// Sales value of each known plaza, keyed by plaza name
    pub plaza_totals: BTreeMap<String, Decimal>,
    /// Sales value of the known plazas
    pub grand_total: Decimal,
    /// Tags sold across every plaza in the view
    pub tag_count: i64,
}
