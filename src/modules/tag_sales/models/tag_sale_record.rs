use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One electronic tag sale invoice line
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TagSaleRecord {
    #[sqlx(rename = "ID_CONCESION")]
    pub concession_id: Option<i32>,
    #[sqlx(rename = "ID_PEAJE")]
    pub plaza_id: Option<i32>,
    #[sqlx(rename = "FECHA_FACTURA")]
    pub invoiced_at: Option<NaiveDateTime>,
    #[sqlx(rename = "CLIENTE")]
    pub customer: Option<String>,
    #[sqlx(rename = "NUM_DOCUMENTO_CLIENTE")]
    pub customer_document: Option<String>,
    #[sqlx(rename = "NUMERO_FACTURA")]
    pub invoice_number: Option<String>,
    #[sqlx(rename = "NOTA_CREDITO")]
    pub credit_note: Option<String>,
    #[sqlx(rename = "FORMA_PAGO")]
    pub payment_method: Option<String>,
    #[sqlx(rename = "VALOR")]
    pub value: Option<Decimal>,
}

impl TagSaleRecord {
    pub fn amount(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ZERO)
    }
}
