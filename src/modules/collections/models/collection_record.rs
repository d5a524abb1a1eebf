use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One cash deposit row of the collection view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    #[sqlx(rename = "FECHA_HORARIO")]
    pub collected_at: Option<NaiveDateTime>,
    #[sqlx(rename = "NOMBRE_PEAJE")]
    pub plaza_name: Option<String>,
    #[sqlx(rename = "TURNO")]
    pub shift: Option<i32>,
    /// Month name as the view stores it (e.g. "May")
    #[sqlx(rename = "mes")]
    pub month_name: Option<String>,
    #[sqlx(rename = "YEAR")]
    pub year: Option<i32>,
    #[sqlx(rename = "NUM_SEMANA")]
    pub week: Option<i32>,
    #[sqlx(rename = "TOTAL_DEPOSITADO")]
    pub total_deposited: Option<Decimal>,
}

impl CollectionRecord {
    /// Deposited amount; a missing value counts as zero
    pub fn amount(&self) -> Decimal {
        self.total_deposited.unwrap_or(Decimal::ZERO)
    }
}
