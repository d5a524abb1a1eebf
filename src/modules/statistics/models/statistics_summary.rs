use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    /// `CAT 1` .. `CAT 6`
    pub category: String,
    pub value: Decimal,
}

/// Cash versus non-cash vehicles of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySplit {
    pub category: String,
    pub cash: i64,
    pub other: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTypeTotal {
    pub kind: String,
    pub vehicles: i64,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExemptType {
    pub kind: String,
    pub vehicles: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// `Mon YYYY`
    pub month: String,
    pub value: Decimal,
}

/// Statistical overview of the category/value view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Cash plus the paying tag tiers (`RFID 0 %`, `RFID 50 %`)
    pub revenue_total: Decimal,
    pub cash_vehicles: i64,
    pub exempt_vehicles: i64,
    /// `RFID 100 %` passages, counted apart from other tag tiers
    pub full_discount_vehicles: i64,
    /// Share of exempt and full-discount passages over all counted passages
    pub exempt_percentage: Decimal,
    pub cash_revenue_by_category: Vec<CategoryRevenue>,
    pub cash_vs_other_by_category: Vec<CategorySplit>,
    pub tag_types: Vec<TagTypeTotal>,
    /// Descending by vehicles
    pub exempt_types: Vec<ExemptType>,
    pub monthly_cash_revenue: Vec<MonthlyRevenue>,
}
