use crate::modules::analytics::models::{Field, Measure};
use crate::modules::analytics::repositories::{MySqlRowSource, TableSchema};
use crate::modules::transits::models::TransitRecord;

/// Lane transit view; also the source of the statistics temporal analyses
pub static TRANSITS_VIEW: TableSchema = TableSchema {
    table: "VISTA_TRANSITOS",
    timestamp: "FECHA",
    hour: Some("HORA"),
    fields: &[
        (Field::PlazaName, "PEAJE"),
        (Field::Cabin, "CABINA"),
        (Field::Shift, "TURNO"),
        (Field::ReceiptNumber, "No_FACTURA"),
        (Field::PartNumber, "NUMERO_PARTE"),
        (Field::Cashier, "NOMBRE_CAJERO"),
        (Field::Plate, "PLACA"),
        (Field::Category, "CATEGORIA"),
        (Field::Type1, "TIPO_1"),
        (Field::Type2, "TIPO_2"),
        (Field::Week, "SEMANA"),
    ],
    measures: &[(Measure::Amount, "COALESCE(COSTO, 0)")],
    order_by: "FECHA DESC, HORA DESC",
};

pub type TransitSource = MySqlRowSource<TransitRecord>;
