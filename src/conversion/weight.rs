//! The conversion cost algebra.
//!
//! Weights order conversion routes during overload resolution. A weight
//! is either a finite lexicographic cost vector or the distinguished
//! [`Weight::INFINITE`] top element meaning "conversion impossible".
//! Addition composes costs along a route; the total order decides
//! tournaments.
//!
//! Invariants the rest of the crate leans on:
//!
//! - the order is total and transitive, with `INFINITE` maximal;
//! - `w.is_possible()` iff `w < INFINITE`;
//! - addition is commutative and monotone, and `INFINITE` absorbs.

use std::ops::Add;

/// Finite cost bands, most significant first.
///
/// One user-defined conversion outranks any number of upcasts, one
/// upcast outranks any number of promotions, and `epsilon` separates
/// barely-non-exact matches from true exact matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost {
    /// User-defined conversions taken along the route.
    pub user: u16,
    /// Class-hierarchy upcasts taken along the route.
    pub upcast: u16,
    /// Primitive promotions taken along the route.
    pub promotion: u16,
    /// Tie-breaking residue for near-exact steps.
    pub epsilon: u16,
}

impl Cost {
    fn saturating_add(self, other: Cost) -> Cost {
        Cost {
            user: self.user.saturating_add(other.user),
            upcast: self.upcast.saturating_add(other.upcast),
            promotion: self.promotion.saturating_add(other.promotion),
            epsilon: self.epsilon.saturating_add(other.epsilon),
        }
    }
}

/// Ordered conversion cost with an impossible top element.
///
/// The derived ordering compares finite costs lexicographically by band
/// and places [`Weight::Infinite`] above every finite weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weight {
    /// A performable conversion with the given cost.
    Finite(Cost),
    /// Conversion impossible; the maximum of the order.
    Infinite,
}

impl Weight {
    /// The zero weight: an exact match, or the identity route.
    pub const ZERO: Weight = Weight::Finite(Cost {
        user: 0,
        upcast: 0,
        promotion: 0,
        epsilon: 0,
    });

    /// The impossible weight.
    pub const INFINITE: Weight = Weight::Infinite;

    /// A finite weight with the given cost bands.
    pub fn finite(cost: Cost) -> Weight {
        Weight::Finite(cost)
    }

    /// One tie-breaking epsilon step.
    pub fn epsilon() -> Weight {
        Weight::Finite(Cost {
            epsilon: 1,
            ..Cost::default()
        })
    }

    /// One primitive promotion step.
    pub fn promotion() -> Weight {
        Weight::Finite(Cost {
            promotion: 1,
            ..Cost::default()
        })
    }

    /// One class-hierarchy upcast step.
    pub fn upcast() -> Weight {
        Weight::Finite(Cost {
            upcast: 1,
            ..Cost::default()
        })
    }

    /// One user-defined conversion step.
    pub fn user_defined() -> Weight {
        Weight::Finite(Cost {
            user: 1,
            ..Cost::default()
        })
    }

    /// Whether the conversion this weight describes can be performed.
    pub fn is_possible(self) -> bool {
        self < Weight::INFINITE
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::ZERO
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        match (self, rhs) {
            (Weight::Finite(a), Weight::Finite(b)) => Weight::Finite(a.saturating_add(b)),
            _ => Weight::Infinite,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arb_cost() -> impl Strategy<Value = Cost> {
        (any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>()).prop_map(
            |(user, upcast, promotion, epsilon)| Cost {
                user,
                upcast,
                promotion,
                epsilon,
            },
        )
    }

    fn arb_weight() -> impl Strategy<Value = Weight> {
        prop_oneof![
            9 => arb_cost().prop_map(Weight::Finite),
            1 => Just(Weight::Infinite),
        ]
    }

    #[test]
    fn test_infinite_is_maximum() {
        assert!(Weight::ZERO < Weight::INFINITE);
        assert!(Weight::user_defined() < Weight::INFINITE);
        assert!(!Weight::INFINITE.is_possible());
        assert!(Weight::ZERO.is_possible());
    }

    #[test]
    fn test_bands_order_lexicographically() {
        // A single user-defined step is heavier than any pile of
        // promotions.
        let promotions = Weight::promotion() + Weight::promotion() + Weight::promotion();
        assert!(promotions < Weight::user_defined());
        assert!(Weight::promotion() < Weight::upcast());
        assert!(Weight::epsilon() < Weight::promotion());
        assert!(Weight::ZERO < Weight::epsilon());
    }

    #[test]
    fn test_zero_is_additive_identity() {
        let w = Weight::upcast() + Weight::promotion();
        assert_eq!(w + Weight::ZERO, w);
        assert_eq!(Weight::ZERO + w, w);
    }

    #[test]
    fn test_infinite_absorbs() {
        assert_eq!(Weight::INFINITE + Weight::ZERO, Weight::INFINITE);
        assert_eq!(Weight::promotion() + Weight::INFINITE, Weight::INFINITE);
    }

    proptest! {
        #[test]
        fn prop_addition_commutes(a in arb_weight(), b in arb_weight()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn prop_addition_is_monotone(a in arb_weight(), b in arb_weight()) {
            prop_assert!(a <= a + b);
            prop_assert!(b <= a + b);
        }

        #[test]
        fn prop_order_is_total(a in arb_weight(), b in arb_weight()) {
            let forward = a.cmp(&b);
            prop_assert_eq!(forward.reverse(), b.cmp(&a));
        }

        #[test]
        fn prop_possible_iff_below_infinite(a in arb_weight()) {
            prop_assert_eq!(a.is_possible(), a < Weight::INFINITE);
        }
    }
}
