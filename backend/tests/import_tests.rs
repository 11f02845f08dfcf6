//! Spreadsheet import coercion tests
//!
//! The importer is lenient about quantity cells and strict about cost cells;
//! these tests pin both contracts down over arbitrary input.

use proptest::prelude::*;
use shared::validation::{coerce_quantity, is_blank_name, parse_cost};

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_quantity_decimal_notation_truncates() {
        assert_eq!(coerce_quantity("4.9"), 4);
        assert_eq!(coerce_quantity("-1.5"), -1);
    }

    #[test]
    fn test_quantity_garbage_coerces_to_zero() {
        assert_eq!(coerce_quantity("muitos"), 0);
        assert_eq!(coerce_quantity(""), 0);
    }

    #[test]
    fn test_cost_rejects_garbage() {
        assert!(parse_cost("caro").is_err());
        assert_eq!(parse_cost(" 0.75 ").unwrap(), 0.75);
    }

    #[test]
    fn test_blank_names_skip_rows() {
        assert!(is_blank_name(""));
        assert!(is_blank_name(" \t "));
        assert!(!is_blank_name("Broca"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Quantity coercion never fails, whatever the cell holds.
        #[test]
        fn prop_quantity_coercion_total(cell in ".*") {
            let _ = coerce_quantity(&cell);
        }

        /// Numeric cells round-trip through coercion by truncation.
        #[test]
        fn prop_numeric_quantity_truncated(n in -10_000i64..10_000, frac in 0u32..100) {
            let cell = format!("{}.{:02}", n, frac);
            let parsed = cell.parse::<f64>().unwrap();
            prop_assert_eq!(coerce_quantity(&cell), parsed.trunc() as i64);
        }

        /// Whatever coercion accepts as a cost, it preserves exactly.
        #[test]
        fn prop_valid_costs_preserved(cost in 0.0f64..100_000.0) {
            let cell = format!("{}", cost);
            prop_assert_eq!(parse_cost(&cell).unwrap(), cost);
        }

        /// Padding whitespace never changes the outcome.
        #[test]
        fn prop_whitespace_insensitive(n in 0i64..10_000) {
            let padded = format!("  {}  ", n);
            prop_assert_eq!(coerce_quantity(&padded), n);
            prop_assert_eq!(parse_cost(&padded).unwrap(), n as f64);
        }
    }
}
