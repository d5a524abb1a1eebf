//! Semantic fetch requests handed to a row source.
//!
//! The engine only speaks in fields, operators, grouping keys and measures;
//! each row source decides how they map onto its storage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::filter::Page;
use super::range::DateBounds;

/// Filterable attribute of a report record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ConcessionId,
    PlazaId,
    PlazaName,
    Cabin,
    Shift,
    Week,
    PaymentMethod,
    Category,
    Type1,
    Type2,
    Customer,
    CustomerDocument,
    InvoiceNumber,
    ReceiptNumber,
    CreditNote,
    PartNumber,
    Cashier,
    Plate,
    DocumentNumber,
    BusinessName,
    /// Document kind of a billing record
    Kind,
    /// Stored calendar year of the record
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    Contains,
    /// Inclusive lower bound
    AtLeast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateValue {
    Int(i64),
    Text(String),
}

/// `(field, operator, value)` fragment; all predicates of a scope are AND-ed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: Field,
    pub operator: Operator,
    pub value: PredicateValue,
}

impl Predicate {
    pub fn equals_int(field: Field, value: i64) -> Self {
        Self {
            field,
            operator: Operator::Equals,
            value: PredicateValue::Int(value),
        }
    }

    pub fn equals_text(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: Operator::Equals,
            value: PredicateValue::Text(value.into()),
        }
    }

    pub fn contains(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: Operator::Contains,
            value: PredicateValue::Text(value.into()),
        }
    }

    pub fn at_least(field: Field, value: i64) -> Self {
        Self {
            field,
            operator: Operator::AtLeast,
            value: PredicateValue::Int(value),
        }
    }
}

/// Window plus predicates; the unit every fetch is bounded by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub bounds: DateBounds,
    pub predicates: Vec<Predicate>,
}

impl Scope {
    pub fn new(bounds: DateBounds, predicates: Vec<Predicate>) -> Self {
        Self { bounds, predicates }
    }

    /// Same predicates, different window
    pub fn with_bounds(&self, bounds: DateBounds) -> Self {
        Self {
            bounds,
            predicates: self.predicates.clone(),
        }
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}

/// Dimension a grouped fetch is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Calendar date of the record timestamp
    Date,
    /// Hour of day, 0..=23
    Hour,
    /// Day of week, 1 = Sunday .. 7 = Saturday
    Weekday,
    Year,
    Month,
    PlazaId,
    PlazaName,
    Cabin,
    Shift,
    PaymentMethod,
    Kind,
}

/// Numeric column a grouped fetch reduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Count,
    /// Monetary amount of the record (deposit, cost, sale value)
    Amount,
    /// Vehicles across all categories
    Vehicles,
    /// Revenue across all categories
    Revenue,
    /// Vehicles of one category, 1..=6
    CategoryVehicles(u8),
    /// Revenue of one category, 1..=6
    CategoryRevenue(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub scope: Scope,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedQuery {
    pub scope: Scope,
    pub group_by: Vec<GroupKey>,
    pub measures: Vec<Measure>,
}

impl GroupedQuery {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            group_by: Vec::new(),
            measures: Vec::new(),
        }
    }

    pub fn group_by(mut self, keys: impl IntoIterator<Item = GroupKey>) -> Self {
        self.group_by.extend(keys);
        self
    }

    pub fn measures(mut self, measures: impl IntoIterator<Item = Measure>) -> Self {
        self.measures.extend(measures);
        self
    }
}

/// One grouping key value as returned by the row source
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Null,
    Int(i64),
    Date(NaiveDate),
    Text(String),
}

impl KeyValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            KeyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            KeyValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            KeyValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Row of a grouped fetch: key values in `group_by` order, measures in
/// `measures` order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    pub keys: Vec<KeyValue>,
    pub measures: Vec<Decimal>,
}

impl GroupedRow {
    pub fn new(keys: Vec<KeyValue>, measures: Vec<Decimal>) -> Self {
        Self { keys, measures }
    }

    pub fn key(&self, index: usize) -> &KeyValue {
        self.keys.get(index).unwrap_or(&KeyValue::Null)
    }

    /// Missing measures read as zero, like a NULL sum
    pub fn measure(&self, index: usize) -> Decimal {
        self.measures.get(index).copied().unwrap_or(Decimal::ZERO)
    }
}
