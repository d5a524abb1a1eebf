use crate::modules::analytics::models::{Field, Measure};
use crate::modules::analytics::repositories::{MySqlRowSource, TableSchema};
use crate::modules::collections::models::CollectionRecord;

/// Cash collection view
pub static COLLECTIONS_VIEW: TableSchema = TableSchema {
    table: "VW_RECAUDA_COSAD",
    timestamp: "FECHA_HORARIO",
    hour: None,
    fields: &[
        (Field::PlazaName, "NOMBRE_PEAJE"),
        (Field::Shift, "TURNO"),
        (Field::Week, "NUM_SEMANA"),
    ],
    measures: &[(Measure::Amount, "COALESCE(TOTAL_DEPOSITADO, 0)")],
    order_by: "FECHA_HORARIO DESC",
};

pub type CollectionSource = MySqlRowSource<CollectionRecord>;
