use crate::modules::analytics::models::{Field, Measure};
use crate::modules::analytics::repositories::{MySqlRowSource, TableSchema};
use crate::modules::tag_sales::models::TagSaleRecord;

pub static TAG_SALES_VIEW: TableSchema = TableSchema {
    table: "VW_VENTAS_TAG",
    timestamp: "FECHA_FACTURA",
    hour: None,
    fields: &[
        (Field::ConcessionId, "ID_CONCESION"),
        (Field::PlazaId, "ID_PEAJE"),
        (Field::Customer, "CLIENTE"),
        (Field::CustomerDocument, "NUM_DOCUMENTO_CLIENTE"),
        (Field::InvoiceNumber, "NUMERO_FACTURA"),
        (Field::CreditNote, "NOTA_CREDITO"),
        (Field::PaymentMethod, "FORMA_PAGO"),
    ],
    measures: &[(Measure::Amount, "COALESCE(VALOR, 0)")],
    order_by: "FECHA_FACTURA DESC",
};

pub type TagSaleSource = MySqlRowSource<TagSaleRecord>;
