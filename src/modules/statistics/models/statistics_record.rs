use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Daily vehicles and revenue per lane, payment form and category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRecord {
    #[sqlx(rename = "FECHA")]
    pub date: Option<NaiveDate>,
    #[sqlx(rename = "ID_CONCESION")]
    pub concession_id: Option<i32>,
    #[sqlx(rename = "ID_PEAJE")]
    pub plaza_id: Option<i32>,
    #[sqlx(rename = "CABINA")]
    pub cabin: Option<i32>,
    #[sqlx(rename = "FORMA_DE_PAGO")]
    pub payment_method: Option<String>,
    #[sqlx(rename = "MES")]
    pub month: Option<i32>,
    #[sqlx(rename = "AÑO")]
    pub year: Option<i32>,
    #[sqlx(rename = "CAT1")]
    pub cat1: Option<i32>,
    #[sqlx(rename = "CAT2")]
    pub cat2: Option<i32>,
    #[sqlx(rename = "CAT3")]
    pub cat3: Option<i32>,
    #[sqlx(rename = "CAT4")]
    pub cat4: Option<i32>,
    #[sqlx(rename = "CAT5")]
    pub cat5: Option<i32>,
    #[sqlx(rename = "CAT6")]
    pub cat6: Option<i32>,
    #[sqlx(rename = "VALOR_1")]
    pub value1: Option<Decimal>,
    #[sqlx(rename = "VALOR_2")]
    pub value2: Option<Decimal>,
    #[sqlx(rename = "VALOR_3")]
    pub value3: Option<Decimal>,
    #[sqlx(rename = "VALOR_4")]
    pub value4: Option<Decimal>,
    #[sqlx(rename = "VALOR_5")]
    pub value5: Option<Decimal>,
    #[sqlx(rename = "VALOR_6")]
    pub value6: Option<Decimal>,
}

impl StatisticsRecord {
    /// Vehicles across the six categories
    pub fn vehicles(&self) -> i64 {
        [self.cat1, self.cat2, self.cat3, self.cat4, self.cat5, self.cat6]
            .into_iter()
            .map(|count| i64::from(count.unwrap_or(0)))
            .sum()
    }

    /// Revenue across the six categories
    pub fn revenue(&self) -> Decimal {
        [
            self.value1,
            self.value2,
            self.value3,
            self.value4,
            self.value5,
            self.value6,
        ]
        .into_iter()
        .map(|value| value.unwrap_or(Decimal::ZERO))
        .sum()
    }
}
