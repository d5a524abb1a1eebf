use async_trait::async_trait;

use crate::core::Result;
use crate::modules::analytics::models::{GroupedQuery, GroupedRow, RowQuery};

/// Fetch collaborator of one report domain.
///
/// Implementations receive only semantic predicates, grouping keys and
/// measures; how those become a statement is their own business.
#[async_trait]
pub trait RowSource<R>: Send + Sync {
    /// Raw records inside the scope, newest first, one page
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<R>>;

    /// Pre-grouped measures inside the scope, ascending by key
    async fn fetch_grouped(&self, query: &GroupedQuery) -> Result<Vec<GroupedRow>>;
}
