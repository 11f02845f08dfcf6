//! Stock ledger invariant tests
//!
//! Database-free checks of the movement arithmetic: the materialized stock of
//! an item must always equal its bootstrap quantity plus the net ledger
//! balance, and no sequence of accepted movements may drive it negative.

use proptest::prelude::*;
use shared::types::MovementKind;

/// Apply one movement to a stock level the way the backend does: entradas
/// always land, saídas only when covered.
fn apply_movement(stock: i64, kind: MovementKind, quantidade: i64) -> Result<i64, &'static str> {
    if quantidade < 1 {
        return Err("quantidade must be at least 1");
    }
    match kind {
        MovementKind::Entrada => Ok(stock + quantidade),
        MovementKind::Saida => {
            if stock >= quantidade {
                Ok(stock - quantidade)
            } else {
                Err("insufficient stock")
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_entrada_adds() {
        assert_eq!(apply_movement(10, MovementKind::Entrada, 4).unwrap(), 14);
    }

    #[test]
    fn test_saida_subtracts_when_covered() {
        assert_eq!(apply_movement(10, MovementKind::Saida, 10).unwrap(), 0);
    }

    #[test]
    fn test_overdraft_rejected() {
        assert!(apply_movement(5, MovementKind::Saida, 6).is_err());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(apply_movement(5, MovementKind::Entrada, 0).is_err());
        assert!(apply_movement(5, MovementKind::Saida, -1).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    fn kind_strategy() -> impl Strategy<Value = MovementKind> {
        prop_oneof![Just(MovementKind::Entrada), Just(MovementKind::Saida)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Accepted movements never leave the stock negative.
        #[test]
        fn prop_stock_never_negative(
            bootstrap in 0i64..1000,
            movements in prop::collection::vec((kind_strategy(), 1i64..100), 0..30)
        ) {
            let mut stock = bootstrap;
            for (kind, quantidade) in movements {
                if let Ok(next) = apply_movement(stock, kind, quantidade) {
                    stock = next;
                }
                prop_assert!(stock >= 0);
            }
        }

        /// Stock equals bootstrap plus the net balance of accepted movements.
        #[test]
        fn prop_stock_matches_ledger_delta(
            bootstrap in 0i64..1000,
            movements in prop::collection::vec((kind_strategy(), 1i64..100), 0..30)
        ) {
            let mut stock = bootstrap;
            let mut delta = 0i64;
            for (kind, quantidade) in movements {
                if let Ok(next) = apply_movement(stock, kind, quantidade) {
                    stock = next;
                    delta += match kind {
                        MovementKind::Entrada => quantidade,
                        MovementKind::Saida => -quantidade,
                    };
                }
            }
            prop_assert_eq!(stock, bootstrap + delta);
        }

        /// A rejected saída leaves the stock untouched.
        #[test]
        fn prop_rejected_saida_has_no_effect(
            stock in 0i64..100,
            extra in 1i64..100
        ) {
            let result = apply_movement(stock, MovementKind::Saida, stock + extra);
            prop_assert!(result.is_err());
        }
    }
}
