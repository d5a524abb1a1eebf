use crate::modules::analytics::models::{Field, Measure};
use crate::modules::analytics::repositories::{MySqlRowSource, TableSchema};
use crate::modules::billing::models::BillingRecord;

/// Issued billing documents
pub static BILLING_VIEW: TableSchema = TableSchema {
    table: "FACTURACION_COSAD",
    timestamp: "FECHA_FACTURA",
    hour: None,
    fields: &[
        (Field::InvoiceNumber, "NUM_FACTURA"),
        (Field::DocumentNumber, "NUMERO_DOCUMENTO"),
        (Field::BusinessName, "RAZON_SOCIAL"),
        (Field::PlazaName, "NOMBRE_PEAJE"),
        (Field::Plate, "PLACA"),
        (Field::Kind, "TIPO"),
        (Field::Year, "YEAR"),
    ],
    measures: &[(Measure::Amount, "COALESCE(TOTAL, 0)")],
    order_by: "FECHA_FACTURA DESC",
};

pub type BillingSource = MySqlRowSource<BillingRecord>;
