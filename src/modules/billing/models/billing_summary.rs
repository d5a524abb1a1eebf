use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindTotal {
    pub kind: String,
    pub documents: i64,
    pub amount: Decimal,
}

/// Billing totals over one window, for `includeData=false` requests
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub document_count: i64,
    pub total_amount: Decimal,
    /// Largest amount first
    pub by_kind: Vec<KindTotal>,
}
