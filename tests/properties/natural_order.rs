//! Property tests for natural name ordering.

use std::cmp::Ordering;

use proptest::prelude::*;

use croptree::selection::{ordinal_cmp, SortOrder};

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 \\-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Swapping the operands reverses the result.
    #[test]
    fn property_ordinal_cmp_is_antisymmetric(a in name(), b in name()) {
        prop_assert_eq!(ordinal_cmp(&a, &b), ordinal_cmp(&b, &a).reverse());
    }

    /// PROPERTY: Only identical names compare equal.
    #[test]
    fn property_equal_only_when_identical(a in name(), b in name()) {
        prop_assert_eq!(ordinal_cmp(&a, &b) == Ordering::Equal, a == b);
    }

    /// PROPERTY: A shared prefix followed by numbers orders by numeric value.
    #[test]
    fn property_numbers_order_by_value(prefix in "[A-Za-z ]{0,8}", x in any::<u32>(), y in any::<u32>()) {
        let a = format!("{prefix}{x}");
        let b = format!("{prefix}{y}");
        prop_assert_eq!(ordinal_cmp(&a, &b), x.cmp(&y));
    }

    /// PROPERTY: Descending is ascending with the operands swapped.
    #[test]
    fn property_descending_mirrors_ascending(a in name(), b in name()) {
        prop_assert_eq!(
            SortOrder::Descending.compare(&a, &b),
            SortOrder::Ascending.compare(&b, &a)
        );
    }
}
