//! Unit tests for the integer identifier newtypes
//!
//! Covers parsing, conversion, ordering, and serde behavior.

use core_kernel::{CategoryId, OrderId, ProductId};
use proptest::prelude::*;

mod category_id_tests {
    use super::*;

    #[test]
    fn test_value_round_trips_through_i32() {
        let id = CategoryId::from(8);
        let raw: i32 = id.into();
        assert_eq!(raw, 8);
        assert_eq!(id.value(), 8);
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(CategoryId::entity(), "Category");
    }

    #[test]
    fn test_from_str_trims_whitespace() {
        let parsed: CategoryId = " 3 ".parse().unwrap();
        assert_eq!(parsed, CategoryId::new(3));
    }

    #[test]
    fn test_from_str_rejects_text() {
        assert!("beverages".parse::<CategoryId>().is_err());
    }
}

mod product_id_tests {
    use super::*;

    #[test]
    fn test_ordering_follows_value() {
        let mut ids = vec![ProductId::new(11), ProductId::new(2), ProductId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![ProductId::new(2), ProductId::new(7), ProductId::new(11)]);
    }

    #[test]
    fn test_deserializes_from_number() {
        let id: ProductId = serde_json::from_str("77").unwrap();
        assert_eq!(id, ProductId::new(77));
    }
}

mod order_id_tests {
    use super::*;

    #[test]
    fn test_entity_name() {
        assert_eq!(OrderId::entity(), "Order");
    }

    #[test]
    fn test_display_matches_raw_value() {
        assert_eq!(OrderId::new(10248).to_string(), "10248");
    }
}

proptest! {
    #[test]
    fn prop_display_then_parse_is_identity(raw in any::<i32>()) {
        let id = OrderId::new(raw);
        let parsed: OrderId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    #[test]
    fn prop_next_is_strictly_greater(raw in i32::MIN..i32::MAX) {
        let id = CategoryId::new(raw);
        prop_assert!(id.next().is_some_and(|next| next > id));
    }
}
