use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder, Row};
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::analytics::models::{
    Field, GroupKey, GroupedQuery, GroupedRow, KeyValue, Measure, Operator, PredicateValue,
    RowQuery, Scope,
};

use super::row_source::RowSource;

/// How a grouping key value decodes from a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Date,
    Int,
    Text,
}

fn key_kind(key: GroupKey) -> KeyKind {
    match key {
        GroupKey::Date => KeyKind::Date,
        GroupKey::PlazaName | GroupKey::PaymentMethod | GroupKey::Kind => KeyKind::Text,
        GroupKey::Hour
        | GroupKey::Weekday
        | GroupKey::Year
        | GroupKey::Month
        | GroupKey::PlazaId
        | GroupKey::Cabin
        | GroupKey::Shift => KeyKind::Int,
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Mapping from engine vocabulary onto one reporting view
#[derive(Debug)]
pub struct TableSchema {
    pub table: &'static str,
    /// Column every window bound applies to
    pub timestamp: &'static str,
    /// `HH:MM[:SS]` text column, when the view has one
    pub hour: Option<&'static str>,
    pub fields: &'static [(Field, &'static str)],
    /// Row-level expression summed for each measure (`Count` needs none)
    pub measures: &'static [(Measure, &'static str)],
    pub order_by: &'static str,
}

impl TableSchema {
    pub fn column(&self, field: Field) -> Result<&'static str> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, column)| *column)
            .ok_or_else(|| {
                AppError::internal(format!("{} has no column for {:?}", self.table, field))
            })
    }

    fn measure_expr(&self, measure: Measure) -> Result<String> {
        if measure == Measure::Count {
            return Ok("CAST(COUNT(*) AS DECIMAL(20,2))".to_string());
        }
        self.measures
            .iter()
            .find(|(candidate, _)| *candidate == measure)
            .map(|(_, expr)| format!("CAST(COALESCE(SUM({}), 0) AS DECIMAL(20,2))", expr))
            .ok_or_else(|| {
                AppError::internal(format!("{} has no expression for {:?}", self.table, measure))
            })
    }

    fn hour_column(&self) -> Result<&'static str> {
        self.hour
            .ok_or_else(|| AppError::internal(format!("{} has no hour column", self.table)))
    }

    fn key_expr(&self, key: GroupKey) -> Result<String> {
        let ts = self.timestamp;
        let expr = match key {
            GroupKey::Date => format!("CAST({} AS DATE)", ts),
            GroupKey::Hour => format!("CAST(LEFT({}, 2) AS SIGNED)", self.hour_column()?),
            GroupKey::Weekday => format!("CAST(DAYOFWEEK({}) AS SIGNED)", ts),
            GroupKey::Year => format!("CAST(YEAR({}) AS SIGNED)", ts),
            GroupKey::Month => format!("CAST(MONTH({}) AS SIGNED)", ts),
            GroupKey::PlazaId => format!("CAST({} AS SIGNED)", self.column(Field::PlazaId)?),
            GroupKey::Cabin => format!("CAST({} AS SIGNED)", self.column(Field::Cabin)?),
            GroupKey::Shift => format!("CAST({} AS SIGNED)", self.column(Field::Shift)?),
            GroupKey::PlazaName => self.column(Field::PlazaName)?.to_string(),
            GroupKey::PaymentMethod => self.column(Field::PaymentMethod)?.to_string(),
            GroupKey::Kind => self.column(Field::Kind)?.to_string(),
        };
        Ok(expr)
    }

    fn push_scope(
        &self,
        builder: &mut QueryBuilder<'static, MySql>,
        scope: &Scope,
        needs_hour: bool,
    ) -> Result<()> {
        let mut separator = " WHERE ";

        if let Some(from) = scope.bounds.from {
            builder.push(separator).push(self.timestamp).push(" >= ").push_bind(from);
            separator = " AND ";
        }
        if let Some(until) = scope.bounds.until {
            builder.push(separator).push(self.timestamp).push(" <= ").push_bind(until);
            separator = " AND ";
        }

        for predicate in &scope.predicates {
            let column = self.column(predicate.field)?;
            builder.push(separator).push(column);
            separator = " AND ";

            match (predicate.operator, &predicate.value) {
                (Operator::Equals, PredicateValue::Int(value)) => {
                    builder.push(" = ").push_bind(*value);
                }
                (Operator::Equals, PredicateValue::Text(value)) => {
                    builder.push(" = ").push_bind(value.clone());
                }
                (Operator::Contains, PredicateValue::Text(value)) => {
                    builder.push(" LIKE ").push_bind(escape_like(value));
                }
                (Operator::Contains, PredicateValue::Int(value)) => {
                    builder.push(" LIKE ").push_bind(escape_like(&value.to_string()));
                }
                (Operator::AtLeast, PredicateValue::Int(value)) => {
                    builder.push(" >= ").push_bind(*value);
                }
                (Operator::AtLeast, PredicateValue::Text(value)) => {
                    builder.push(" >= ").push_bind(value.clone());
                }
            }
        }

        if needs_hour {
            let hour = self.hour_column()?;
            builder
                .push(separator)
                .push(hour)
                .push(" REGEXP '^[0-2][0-9]'");
        }

        Ok(())
    }

    /// Paged raw-row statement, newest first
    pub fn rows_statement(&self, query: &RowQuery) -> Result<QueryBuilder<'static, MySql>> {
        let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", self.table));
        self.push_scope(&mut builder, &query.scope, false)?;
        builder
            .push(" ORDER BY ")
            .push(self.order_by)
            .push(" LIMIT ")
            .push_bind(query.page.take)
            .push(" OFFSET ")
            .push_bind(query.page.skip);
        Ok(builder)
    }

    /// Grouped statement; keys alias to `k0..`, measures to `m0..`
    pub fn grouped_statement(&self, query: &GroupedQuery) -> Result<QueryBuilder<'static, MySql>> {
        let keys = query
            .group_by
            .iter()
            .map(|key| self.key_expr(*key))
            .collect::<Result<Vec<_>>>()?;
        let measures = query
            .measures
            .iter()
            .map(|measure| self.measure_expr(*measure))
            .collect::<Result<Vec<_>>>()?;

        let columns: Vec<String> = keys
            .iter()
            .enumerate()
            .map(|(i, expr)| format!("{} AS k{}", expr, i))
            .chain(
                measures
                    .iter()
                    .enumerate()
                    .map(|(i, expr)| format!("{} AS m{}", expr, i)),
            )
            .collect();

        let mut builder = QueryBuilder::new(format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            self.table
        ));
        self.push_scope(
            &mut builder,
            &query.scope,
            query.group_by.contains(&GroupKey::Hour),
        )?;

        if !keys.is_empty() {
            let list = keys.join(", ");
            builder.push(" GROUP BY ").push(&list).push(" ORDER BY ").push(&list);
        }

        Ok(builder)
    }
}

fn decode_grouped(row: &MySqlRow, query: &GroupedQuery) -> Result<GroupedRow> {
    let mut keys = Vec::with_capacity(query.group_by.len());
    for (i, key) in query.group_by.iter().enumerate() {
        let alias = format!("k{}", i);
        let value = match key_kind(*key) {
            KeyKind::Date => row
                .try_get::<Option<NaiveDate>, _>(alias.as_str())?
                .map(KeyValue::Date),
            KeyKind::Int => row
                .try_get::<Option<i64>, _>(alias.as_str())?
                .map(KeyValue::Int),
            KeyKind::Text => row
                .try_get::<Option<String>, _>(alias.as_str())?
                .map(|text| KeyValue::Text(text.trim().to_string())),
        };
        keys.push(value.unwrap_or(KeyValue::Null));
    }

    let mut measures = Vec::with_capacity(query.measures.len());
    for i in 0..query.measures.len() {
        let alias = format!("m{}", i);
        measures.push(
            row.try_get::<Option<Decimal>, _>(alias.as_str())?
                .unwrap_or(Decimal::ZERO),
        );
    }

    Ok(GroupedRow::new(keys, measures))
}

/// `RowSource` backed by one MySQL reporting view
pub struct MySqlRowSource<R> {
    pool: MySqlPool,
    schema: &'static TableSchema,
    _record: PhantomData<fn() -> R>,
}

impl<R> MySqlRowSource<R> {
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `schema` - View the source reads from
    pub fn new(pool: MySqlPool, schema: &'static TableSchema) -> Self {
        Self {
            pool,
            schema,
            _record: PhantomData,
        }
    }

    pub fn schema(&self) -> &'static TableSchema {
        self.schema
    }
}

#[async_trait]
impl<R> RowSource<R> for MySqlRowSource<R>
where
    R: for<'r> FromRow<'r, MySqlRow> + Send + Unpin + 'static,
{
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<R>> {
        let mut builder = self.schema.rows_statement(query)?;
        debug!(table = self.schema.table, sql = builder.sql(), "Fetching rows");

        let rows = builder.build_query_as::<R>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn fetch_grouped(&self, query: &GroupedQuery) -> Result<Vec<GroupedRow>> {
        let mut builder = self.schema.grouped_statement(query)?;
        debug!(table = self.schema.table, sql = builder.sql(), "Fetching grouped rows");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(|row| decode_grouped(row, query)).collect()
    }
}
