//! Stock ledger rule.
//!
//! Inbound movements add to stock, outbound movements subtract from it and
//! are refused when the product does not hold enough units. The rule runs
//! exactly once per movement, when the movement is first recorded.

use thiserror::Error;

use stockroom_core::DomainError;

use crate::MovementKind;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    #[error("quantity must be greater than zero (got {0})")]
    InvalidQuantity(i64),

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("stock level overflow")]
    Overflow,
}

impl From<LedgerError> for DomainError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::InvalidQuantity(_) => DomainError::field("cantidad", value.to_string()),
            LedgerError::InsufficientStock { .. } | LedgerError::Overflow => {
                DomainError::invariant(value.to_string())
            }
        }
    }
}

/// Compute the stock level after applying a movement of `quantity` units.
pub fn apply(stock: i64, kind: MovementKind, quantity: i64) -> Result<i64, LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::InvalidQuantity(quantity));
    }

    match kind {
        MovementKind::Inbound => stock.checked_add(quantity).ok_or(LedgerError::Overflow),
        MovementKind::Outbound => {
            if stock < quantity {
                return Err(LedgerError::InsufficientStock {
                    available: stock,
                    requested: quantity,
                });
            }
            Ok(stock - quantity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laptop_scenario() {
        let stock = 0;
        let stock = apply(stock, MovementKind::Inbound, 10).unwrap();
        assert_eq!(stock, 10);
        let stock = apply(stock, MovementKind::Outbound, 4).unwrap();
        assert_eq!(stock, 6);
        assert_eq!(
            apply(stock, MovementKind::Outbound, 100),
            Err(LedgerError::InsufficientStock { available: 6, requested: 100 })
        );
    }

    #[test]
    fn outbound_may_empty_the_shelf() {
        assert_eq!(apply(7, MovementKind::Outbound, 7), Ok(0));
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        assert_eq!(apply(5, MovementKind::Inbound, 0), Err(LedgerError::InvalidQuantity(0)));
        assert_eq!(apply(5, MovementKind::Outbound, -2), Err(LedgerError::InvalidQuantity(-2)));
    }

    #[test]
    fn inbound_overflow_is_an_error() {
        assert_eq!(apply(i64::MAX, MovementKind::Inbound, 1), Err(LedgerError::Overflow));
    }

    #[test]
    fn invalid_quantity_maps_to_field_error() {
        match DomainError::from(LedgerError::InvalidQuantity(0)) {
            DomainError::InvalidFields(f) => assert!(f.get("cantidad").is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: inbound adds exactly the quantity.
            #[test]
            fn inbound_adds_quantity(stock in 0i64..1_000_000, qty in 1i64..1_000_000) {
                prop_assert_eq!(apply(stock, MovementKind::Inbound, qty), Ok(stock + qty));
            }

            /// Property: outbound beyond the available stock is rejected.
            #[test]
            fn outbound_beyond_stock_is_rejected(stock in 0i64..1_000_000, extra in 1i64..1_000_000) {
                let qty = stock + extra;
                prop_assert_eq!(
                    apply(stock, MovementKind::Outbound, qty),
                    Err(LedgerError::InsufficientStock { available: stock, requested: qty })
                );
            }

            /// Property: outbound within the available stock subtracts exactly.
            #[test]
            fn outbound_within_stock_subtracts(qty in 1i64..1_000_000, spare in 0i64..1_000_000) {
                let stock = qty + spare;
                prop_assert_eq!(apply(stock, MovementKind::Outbound, qty), Ok(spare));
            }

            /// Property: no sequence of accepted movements drives stock negative.
            #[test]
            fn stock_never_goes_negative(
                moves in proptest::collection::vec((any::<bool>(), 1i64..50), 0..64)
            ) {
                let mut stock = 0i64;
                for (inbound, qty) in moves {
                    let kind = if inbound { MovementKind::Inbound } else { MovementKind::Outbound };
                    if let Ok(next) = apply(stock, kind, qty) {
                        stock = next;
                    }
                    prop_assert!(stock >= 0);
                }
            }
        }
    }
}
