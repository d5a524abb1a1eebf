use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::analytics::models::{
    DomainPolicy, Field, GroupKey, GroupedQuery, GroupedRow, Measure, NormalizedSpec, Predicate,
    RangeToken, Scope,
};
use crate::modules::analytics::repositories::RowSource;
use crate::modules::analytics::services::aggregation;
use crate::modules::analytics::services::{ReportDomain, ReportOrchestrator};
use crate::modules::billing::models::{BillingRecord, BillingSummary, KindTotal};

/// Documents older than this year are only listed when a year is asked for
pub const FIRST_LISTED_YEAR: i64 = 2025;

/// Billing document listing
pub struct BillingReport {
    policy: DomainPolicy,
    source: Arc<dyn RowSource<BillingRecord>>,
}

pub type BillingService = ReportOrchestrator<BillingReport>;

impl BillingReport {
    pub fn new(source: Arc<dyn RowSource<BillingRecord>>) -> Self {
        Self {
            policy: Self::default_policy(),
            source,
        }
    }

    /// Last calendar month of documents, listed as rows unless
    /// `includeData=false` asks for totals
    pub fn default_policy() -> DomainPolicy {
        DomainPolicy::new("billing", RangeToken::LastMonth)
            .without_comparison()
            .listing_rows_by_default()
    }
}

/// Fold `(kind) -> (amount, count)` rows
pub fn fold_billing(rows: &[GroupedRow]) -> BillingSummary {
    let mut kinds: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let kind = row.key(0).as_text().unwrap_or_default().trim().to_string();
        let slot = kinds.entry(kind).or_default();
        slot.0 += row.measure(0);
        slot.1 += row.measure(1);
    }

    let mut by_kind: Vec<KindTotal> = kinds
        .into_iter()
        .map(|(kind, (amount, documents))| KindTotal {
            kind,
            documents: aggregation::count_of(documents),
            amount,
        })
        .collect();
    by_kind.sort_by(|a, b| b.amount.cmp(&a.amount));

    BillingSummary {
        document_count: by_kind.iter().map(|kind| kind.documents).sum(),
        total_amount: by_kind.iter().map(|kind| kind.amount).sum(),
        by_kind,
    }
}

#[async_trait]
impl ReportDomain for BillingReport {
    type Record = BillingRecord;
    type Summary = BillingSummary;

    fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    fn rows(&self) -> Arc<dyn RowSource<BillingRecord>> {
        Arc::clone(&self.source)
    }

    fn predicates(&self, spec: &NormalizedSpec) -> Result<Vec<Predicate>> {
        let filters = &spec.filters;
        let mut predicates = Vec::new();

        let text_filters = [
            (Field::DocumentNumber, filters.document_number.as_deref()),
            (Field::InvoiceNumber, filters.invoice_number.as_deref()),
            (Field::BusinessName, filters.business_name.as_deref()),
            (Field::PlazaName, filters.plaza_name.as_deref()),
            (Field::Plate, filters.plate.as_deref()),
        ];
        for (field, value) in text_filters {
            if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
                predicates.push(Predicate::contains(field, value));
            }
        }

        if let Some(kind) = filters.kind.as_deref().map(str::trim).filter(|kind| !kind.is_empty()) {
            predicates.push(Predicate::equals_text(Field::Kind, kind));
        }

        // An explicit year already bounds the window
        if filters.year.is_none() {
            predicates.push(Predicate::at_least(Field::Year, FIRST_LISTED_YEAR));
        }

        Ok(predicates)
    }

    fn record_total(&self, record: &BillingRecord) -> Decimal {
        record.amount()
    }

    async fn summarize(&self, scope: &Scope, _spec: &NormalizedSpec) -> Result<BillingSummary> {
        let query = GroupedQuery::new(scope.clone())
            .group_by([GroupKey::Kind])
            .measures([Measure::Amount, Measure::Count]);
        let rows = self.source.fetch_grouped(&query).await?;
        Ok(fold_billing(&rows))
    }
}
