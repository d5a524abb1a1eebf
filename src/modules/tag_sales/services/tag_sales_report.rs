use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::analytics::models::location::plaza_by_id;
use crate::modules::analytics::models::{
    DomainPolicy, Field, GroupKey, GroupedQuery, GroupedRow, Measure, NormalizedSpec, Predicate,
    RangeToken, Scope, PLAZAS,
};
use crate::modules::analytics::repositories::RowSource;
use crate::modules::analytics::services::aggregation;
use crate::modules::analytics::services::{ReportDomain, ReportOrchestrator};
use crate::modules::tag_sales::models::{TagSaleRecord, TagSalesSummary};

/// Electronic tag sales report
pub struct TagSalesReport {
    policy: DomainPolicy,
    source: Arc<dyn RowSource<TagSaleRecord>>,
}

pub type TagSalesService = ReportOrchestrator<TagSalesReport>;

impl TagSalesReport {
    pub fn new(source: Arc<dyn RowSource<TagSaleRecord>>) -> Self {
        Self {
            policy: Self::default_policy(),
            source,
        }
    }

    /// Last 90 days by default; the view is keyed by plaza id
    pub fn default_policy() -> DomainPolicy {
        DomainPolicy::new("tag_sales", RangeToken::Last90d).resolving_plaza_ids()
    }
}

/// Fold `(plaza id) -> (value, count)` rows
pub fn fold_tag_sales(rows: &[GroupedRow]) -> TagSalesSummary {
    let mut plaza_totals: BTreeMap<String, Decimal> = PLAZAS
        .iter()
        .map(|plaza| (plaza.name.to_string(), Decimal::ZERO))
        .collect();

    let mut tag_count = 0;
    for row in rows {
        tag_count += aggregation::count_of(row.measure(1));
        if let Some(plaza) = row.key(0).as_int().and_then(plaza_by_id) {
            *plaza_totals.entry(plaza.name.to_string()).or_default() += row.measure(0);
        }
    }

    TagSalesSummary {
        grand_total: plaza_totals.values().copied().sum(),
        plaza_totals,
        tag_count,
    }
}

#[async_trait]
impl ReportDomain for TagSalesReport {
    type Record = TagSaleRecord;
    type Summary = TagSalesSummary;

    fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    fn rows(&self) -> Arc<dyn RowSource<TagSaleRecord>> {
        Arc::clone(&self.source)
    }

    fn predicates(&self, spec: &NormalizedSpec) -> Result<Vec<Predicate>> {
        let filters = &spec.filters;
        let mut predicates = Vec::new();

        if let Some(concession) = filters.concession_id {
            predicates.push(Predicate::equals_int(Field::ConcessionId, concession));
        }
        if let Some(plaza_id) = spec.plaza_id {
            predicates.push(Predicate::equals_int(Field::PlazaId, plaza_id));
        }

        let text_filters = [
            (Field::Customer, filters.customer.as_deref()),
            (Field::CustomerDocument, filters.customer_document.as_deref()),
            (Field::InvoiceNumber, filters.invoice_number.as_deref()),
            (Field::CreditNote, filters.credit_note.as_deref()),
            (Field::PaymentMethod, filters.payment_method.as_deref()),
        ];
        for (field, value) in text_filters {
            if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
                predicates.push(Predicate::contains(field, value));
            }
        }

        Ok(predicates)
    }

    fn record_total(&self, record: &TagSaleRecord) -> Decimal {
        record.amount()
    }

    async fn summarize(&self, scope: &Scope, _spec: &NormalizedSpec) -> Result<TagSalesSummary> {
        let query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::PlazaId])
            .measures([Measure::Amount, Measure::Count]);
        let rows = self.source.fetch_grouped(&query).await?;
        Ok(fold_tag_sales(&rows))
    }
}
