use crate::modules::analytics::models::Page;

/// Clamps requested page size and offset to a domain's bounds
pub struct PaginationGuard;

impl PaginationGuard {
    /// `take` falls back to `default_take` when absent and is bounded to
    /// `1..=max_take`; `skip` falls back to 0 and is floored at 0.
    pub fn clamp(take: Option<i64>, skip: Option<i64>, default_take: i64, max_take: i64) -> Page {
        let max_take = max_take.max(1);
        let take = take.unwrap_or(default_take).clamp(1, max_take);
        let skip = skip.unwrap_or(0).max(0);
        Page { take, skip }
    }
}
