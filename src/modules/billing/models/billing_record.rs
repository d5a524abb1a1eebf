use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One issued invoice or credit document
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    #[sqlx(rename = "FECHA_FACTURA")]
    pub invoiced_at: Option<NaiveDateTime>,
    #[sqlx(rename = "NUM_FACTURA")]
    pub invoice_number: Option<String>,
    #[sqlx(rename = "TIPO")]
    pub kind: Option<String>,
    /// Tax id of the billed party
    #[sqlx(rename = "NUMERO_DOCUMENTO")]
    pub document_number: Option<String>,
    #[sqlx(rename = "RAZON_SOCIAL")]
    pub business_name: Option<String>,
    #[sqlx(rename = "NOMBRE_PEAJE")]
    pub plaza_name: Option<String>,
    #[sqlx(rename = "PLACA")]
    pub plate: Option<String>,
    #[sqlx(rename = "YEAR")]
    pub year: Option<i32>,
    #[sqlx(rename = "TOTAL")]
    pub total: Option<Decimal>,
}

impl BillingRecord {
    pub fn amount(&self) -> Decimal {
        self.total.unwrap_or(Decimal::ZERO)
    }
}
