use serde::{Deserialize, Serialize};

use super::range::{DateBounds, RangeSelector, RangeToken};

/// Loose filter set as it arrives from a report request.
///
/// Wire names follow the query strings existing dashboards already send.
/// Nothing here is trusted yet; `FilterNormalizer` turns it into a
/// `NormalizedSpec`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSpecification {
    #[serde(default, rename = "fechaInicio", alias = "startDate")]
    pub start_date: Option<String>,
    /// Alias of `start_date`; ignored when `start_date` is present
    #[serde(default, rename = "desde")]
    pub since: Option<String>,
    #[serde(default, rename = "fechaFin", alias = "endDate")]
    pub end_date: Option<String>,
    /// Alias of `end_date`; ignored when `end_date` is present
    #[serde(default, rename = "hasta")]
    pub through: Option<String>,
    #[serde(default, rename = "rango")]
    pub range: Option<String>,
    #[serde(default, rename = "mes")]
    pub month: Option<u32>,
    #[serde(default, rename = "anio")]
    pub year: Option<i32>,
    #[serde(default, rename = "semana", alias = "numSemana")]
    pub week: Option<u32>,

    #[serde(default, rename = "idConcesion")]
    pub concession_id: Option<i64>,
    #[serde(default, rename = "idPeaje")]
    pub plaza_id: Option<i64>,
    #[serde(default, rename = "nombrePeaje")]
    pub plaza_name: Option<String>,
    #[serde(default, rename = "peajeNombre")]
    pub plaza_exact: Option<String>,
    #[serde(default, rename = "peaje")]
    pub plaza: Option<String>,

    #[serde(default, rename = "cabina")]
    pub cabin: Option<i64>,
    #[serde(default, rename = "turno")]
    pub shift: Option<i64>,
    #[serde(default, rename = "formaPago", alias = "formaDePago")]
    pub payment_method: Option<String>,
    #[serde(default, rename = "categoria")]
    pub category: Option<String>,
    #[serde(default, rename = "tipo1")]
    pub type1: Option<String>,
    #[serde(default, rename = "tipo2")]
    pub type2: Option<String>,

    #[serde(default, rename = "cliente")]
    pub customer: Option<String>,
    #[serde(default, rename = "numeroDocumentoCliente")]
    pub customer_document: Option<String>,
    #[serde(default, rename = "numeroFactura")]
    pub invoice_number: Option<String>,
    #[serde(default, rename = "noFactura")]
    pub receipt_number: Option<String>,
    #[serde(default, rename = "notaCredito")]
    pub credit_note: Option<String>,
    #[serde(default, rename = "numeroParte")]
    pub part_number: Option<String>,
    #[serde(default, rename = "nombreCajero")]
    pub cashier: Option<String>,
    #[serde(default, rename = "placa")]
    pub plate: Option<String>,
    #[serde(default, rename = "numeroDocumento")]
    pub document_number: Option<String>,
    #[serde(default, rename = "razonSocial")]
    pub business_name: Option<String>,
    #[serde(default, rename = "tipo")]
    pub kind: Option<String>,

    #[serde(default)]
    pub take: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default, rename = "includeData")]
    pub include_data: Option<bool>,
}

impl FilterSpecification {
    /// True when the caller supplied any date-shaping filter.
    ///
    /// A week number only shapes the period where the queried view has a
    /// week column; elsewhere it is ignored and the default window holds.
    pub fn has_date_filter(&self, counts_week: bool) -> bool {
        self.start_date.is_some()
            || self.end_date.is_some()
            || self.since.is_some()
            || self.through.is_some()
            || self.month.is_some()
            || self.year.is_some()
            || (counts_week && self.week.is_some())
            || self.range.is_some()
    }
}

/// Where the final window of a normalized filter set came from,
/// highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "token")]
pub enum WindowSource {
    Explicit,
    Calendar(CalendarSpan),
    Token(RangeToken),
    Default(RangeToken),
    /// A week filter alone suppresses the default window on week-keyed views
    Unbounded,
}

/// Calendar period a `mes`/`anio` filter selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarSpan {
    Month,
    Year,
}

/// Effective page of a raw-row fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub take: i64,
    pub skip: i64,
}

/// Strongly typed result of filter normalisation
#[derive(Debug, Clone)]
pub struct NormalizedSpec {
    /// Window every current-period fetch is bounded by
    pub bounds: DateBounds,
    pub window_source: WindowSource,
    pub selector: Option<RangeSelector>,
    /// Comparison requested through a compare range token
    pub compare: bool,
    /// Numeric plaza id, given or resolved from a symbolic name
    pub plaza_id: Option<i64>,
    pub page: Page,
    pub include_data: bool,
    /// Filters with aliases folded into their canonical fields
    pub filters: FilterSpecification,
}
