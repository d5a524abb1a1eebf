use crate::modules::analytics::models::{Field, Measure};
use crate::modules::analytics::repositories::{MySqlRowSource, TableSchema};
use crate::modules::statistics::models::StatisticsRecord;

/// Daily category/value view; one row per date, lane and payment form
pub static STATISTICS_VIEW: TableSchema = TableSchema {
    table: "VW_REPORTE_ESTADISTICO_CATVALOR",
    timestamp: "FECHA",
    hour: None,
    fields: &[
        (Field::ConcessionId, "ID_CONCESION"),
        (Field::PlazaId, "ID_PEAJE"),
        (Field::Cabin, "CABINA"),
        (Field::PaymentMethod, "FORMA_DE_PAGO"),
    ],
    measures: &[
        (
            Measure::Vehicles,
            "COALESCE(CAT1, 0) + COALESCE(CAT2, 0) + COALESCE(CAT3, 0) \
             + COALESCE(CAT4, 0) + COALESCE(CAT5, 0) + COALESCE(CAT6, 0)",
        ),
        (
            Measure::Revenue,
            "COALESCE(VALOR_1, 0) + COALESCE(VALOR_2, 0) + COALESCE(VALOR_3, 0) \
             + COALESCE(VALOR_4, 0) + COALESCE(VALOR_5, 0) + COALESCE(VALOR_6, 0)",
        ),
        (Measure::CategoryVehicles(1), "COALESCE(CAT1, 0)"),
        (Measure::CategoryVehicles(2), "COALESCE(CAT2, 0)"),
        (Measure::CategoryVehicles(3), "COALESCE(CAT3, 0)"),
        (Measure::CategoryVehicles(4), "COALESCE(CAT4, 0)"),
        (Measure::CategoryVehicles(5), "COALESCE(CAT5, 0)"),
        (Measure::CategoryVehicles(6), "COALESCE(CAT6, 0)"),
        (Measure::CategoryRevenue(1), "COALESCE(VALOR_1, 0)"),
        (Measure::CategoryRevenue(2), "COALESCE(VALOR_2, 0)"),
        (Measure::CategoryRevenue(3), "COALESCE(VALOR_3, 0)"),
        (Measure::CategoryRevenue(4), "COALESCE(VALOR_4, 0)"),
        (Measure::CategoryRevenue(5), "COALESCE(VALOR_5, 0)"),
        (Measure::CategoryRevenue(6), "COALESCE(VALOR_6, 0)"),
    ],
    order_by: "FECHA DESC, CABINA",
};

pub type StatisticsSource = MySqlRowSource<StatisticsRecord>;
