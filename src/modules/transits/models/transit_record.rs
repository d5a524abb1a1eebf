use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One vehicle passage through a lane
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransitRecord {
    #[sqlx(rename = "FECHA")]
    pub date: Option<NaiveDate>,
    /// `HH:MM:SS` as recorded by the lane controller
    #[sqlx(rename = "HORA")]
    pub time: Option<String>,
    #[sqlx(rename = "PEAJE")]
    pub plaza: Option<String>,
    #[sqlx(rename = "CABINA")]
    pub cabin: Option<i32>,
    #[sqlx(rename = "TURNO")]
    pub shift: Option<i32>,
    #[sqlx(rename = "No_FACTURA")]
    pub receipt_number: Option<String>,
    #[sqlx(rename = "NUMERO_PARTE")]
    pub part_number: Option<String>,
    #[sqlx(rename = "NOMBRE_CAJERO")]
    pub cashier: Option<String>,
    #[sqlx(rename = "PLACA")]
    pub plate: Option<String>,
    #[sqlx(rename = "CATEGORIA")]
    pub category: Option<String>,
    #[sqlx(rename = "TIPO_1")]
    pub type1: Option<String>,
    #[sqlx(rename = "TIPO_2")]
    pub type2: Option<String>,
    #[sqlx(rename = "SEMANA")]
    pub week: Option<i32>,
    #[sqlx(rename = "MES")]
    pub month_name: Option<String>,
    #[sqlx(rename = "ANIO")]
    pub year: Option<i32>,
    #[sqlx(rename = "COSTO")]
    pub cost: Option<Decimal>,
}

impl TransitRecord {
    pub fn amount(&self) -> Decimal {
        self.cost.unwrap_or(Decimal::ZERO)
    }
}
