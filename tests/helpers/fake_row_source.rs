use std::sync::Mutex;

use async_trait::async_trait;
use toll_analytics::analytics::models::{GroupedQuery, GroupedRow, RowQuery};
use toll_analytics::analytics::repositories::RowSource;
use toll_analytics::core::{AppError, Result};

type RowFn<R> = Box<dyn Fn(&RowQuery) -> Vec<R> + Send + Sync>;
type GroupedFn = Box<dyn Fn(&GroupedQuery) -> Vec<GroupedRow> + Send + Sync>;

/// In-memory row source: answers from closures and records every query
pub struct FakeRowSource<R> {
    rows: RowFn<R>,
    grouped: GroupedFn,
    failing: bool,
    row_queries: Mutex<Vec<RowQuery>>,
    grouped_queries: Mutex<Vec<GroupedQuery>>,
}

impl<R: Send + Sync + 'static> FakeRowSource<R> {
    pub fn new() -> Self {
        Self {
            rows: Box::new(|_| Vec::new()),
            grouped: Box::new(|_| Vec::new()),
            failing: false,
            row_queries: Mutex::new(Vec::new()),
            grouped_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, rows: impl Fn(&RowQuery) -> Vec<R> + Send + Sync + 'static) -> Self {
        self.rows = Box::new(rows);
        self
    }

    pub fn with_grouped(
        mut self,
        grouped: impl Fn(&GroupedQuery) -> Vec<GroupedRow> + Send + Sync + 'static,
    ) -> Self {
        self.grouped = Box::new(grouped);
        self
    }

    /// Every fetch fails like a dropped connection
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn row_queries(&self) -> Vec<RowQuery> {
        self.row_queries.lock().unwrap().clone()
    }

    pub fn grouped_queries(&self) -> Vec<GroupedQuery> {
        self.grouped_queries.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.row_queries.lock().unwrap().len() + self.grouped_queries.lock().unwrap().len()
    }
}

#[async_trait]
impl<R: Send + Sync + 'static> RowSource<R> for FakeRowSource<R> {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<R>> {
        self.row_queries.lock().unwrap().push(query.clone());
        if self.failing {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok((self.rows)(query))
    }

    async fn fetch_grouped(&self, query: &GroupedQuery) -> Result<Vec<GroupedRow>> {
        self.grouped_queries.lock().unwrap().push(query.clone());
        if self.failing {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok((self.grouped)(query))
    }
}
