// Property tests for page clamping

use proptest::prelude::*;
use toll_analytics::analytics::services::PaginationGuard;

proptest! {
    #[test]
    fn prop_page_is_always_in_bounds(
        take in prop::option::of(any::<i64>()),
        skip in prop::option::of(any::<i64>()),
        default_take in 1i64..1_000,
        max_take in -10i64..100_000,
    ) {
        let page = PaginationGuard::clamp(take, skip, default_take, max_take);

        prop_assert!(page.skip >= 0);
        prop_assert!(page.take > 0);
        prop_assert!(page.take <= max_take.max(1));
    }

    #[test]
    fn prop_in_range_values_pass_through(
        take in 1i64..10_000,
        skip in 0i64..1_000_000,
    ) {
        let page = PaginationGuard::clamp(Some(take), Some(skip), 200, 10_000);
        prop_assert_eq!(page.take, take);
        prop_assert_eq!(page.skip, skip);
    }
}

#[test]
fn test_statistics_cap() {
    let page = PaginationGuard::clamp(Some(1_000_000), Some(-5), 200, 30_000);
    assert_eq!(page.take, 30_000);
    assert_eq!(page.skip, 0);
}
