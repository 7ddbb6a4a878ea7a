//! The ambiguity lattice.
//!
//! Weight-vector comparison is deliberately weaker than a total order.
//! Scanning the positions of two same-arity candidates in parallel
//! yields one of four outcomes: the suggestion is strictly better
//! somewhere and worse nowhere, strictly worse somewhere and better
//! nowhere, everywhere equal, or each side wins at least one position.

use crate::conversion::{ConversionRoute, Weight};
use crate::insight::Insight;

/// Outcome of weighing a suggested candidate against the current
/// champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadRank {
    /// The suggestion is cheaper at some position and dearer at none.
    Better,
    /// The champion is cheaper at some position and the suggestion
    /// dearer at none.
    Worse,
    /// Every position weighs the same.
    Equivalent,
    /// Each side wins at least one position; no way to decide.
    Ambiguous,
}

/// Compare the champion's known weights against a suggested candidate's
/// routes, re-evaluating each route under the call's insights.
///
/// Zero arity compares [`OverloadRank::Better`]: a matching nullary
/// candidate always dominates.
pub fn compare_alternatives(
    known: &[Weight],
    suggested: &[ConversionRoute],
    insights: &[Insight],
) -> OverloadRank {
    debug_assert_eq!(known.len(), suggested.len());
    debug_assert_eq!(known.len(), insights.len());

    if known.is_empty() {
        return OverloadRank::Better;
    }

    // Walk both vectors in parallel looking for witnesses on either
    // side.
    let mut worse_witness = false; // a position where the champion is strictly cheaper
    let mut better_witness = false; // a position where the suggestion is strictly cheaper

    for ((known_weight, route), insight) in known.iter().zip(suggested).zip(insights) {
        let suggested_weight = route.total_weight(*insight);
        if *known_weight < suggested_weight {
            worse_witness = true;
        } else if suggested_weight < *known_weight {
            better_witness = true;
        }
    }

    match (better_witness, worse_witness) {
        (true, false) => OverloadRank::Better,
        (false, true) => OverloadRank::Worse,
        (false, false) => OverloadRank::Equivalent,
        (true, true) => OverloadRank::Ambiguous,
    }
}

/// Re-derive a champion's stored weight vector from its freshly
/// computed routes.
///
/// The stored weights must reflect the champion's actual per-position
/// costs under the call's insights, not the running minimum it just
/// defeated; later comparisons classify against these.
pub fn remember_weights(routes: &[ConversionRoute], insights: &[Insight]) -> Vec<Weight> {
    routes
        .iter()
        .zip(insights)
        .map(|(route, insight)| route.total_weight(*insight))
        .collect()
}

/// Whether every position of a weight vector is possible.
pub fn conversion_possible(weights: &[Weight]) -> bool {
    weights.iter().all(|weight| weight.is_possible())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::conversion::{Conversion, FnConversion};
    use crate::types::TypeDescriptor;

    use super::*;

    /// A single-edge route with a fixed weight, for exercising the
    /// lattice without a conversion table.
    fn route(weight: Weight) -> ConversionRoute {
        let a = TypeDescriptor::new("a");
        let b = TypeDescriptor::new("b");
        let edge: Rc<dyn Conversion> = Rc::new(FnConversion::new(&a, &b, weight, |value, _| {
            value.clone()
        }));
        ConversionRoute::from_edges(vec![edge])
    }

    fn none(n: usize) -> Vec<Insight> {
        vec![Insight::NONE; n]
    }

    #[test]
    fn test_zero_arity_is_better() {
        assert_eq!(compare_alternatives(&[], &[], &[]), OverloadRank::Better);
    }

    #[test]
    fn test_strictly_cheaper_everywhere_is_better() {
        let known = vec![Weight::upcast(), Weight::upcast()];
        let suggested = vec![route(Weight::promotion()), route(Weight::promotion())];
        assert_eq!(
            compare_alternatives(&known, &suggested, &none(2)),
            OverloadRank::Better
        );
    }

    #[test]
    fn test_strictly_dearer_everywhere_is_worse() {
        let known = vec![Weight::promotion()];
        let suggested = vec![route(Weight::user_defined())];
        assert_eq!(
            compare_alternatives(&known, &suggested, &none(1)),
            OverloadRank::Worse
        );
    }

    #[test]
    fn test_equal_everywhere_is_equivalent() {
        let known = vec![Weight::promotion(), Weight::ZERO];
        let suggested = vec![route(Weight::promotion()), route(Weight::ZERO)];
        assert_eq!(
            compare_alternatives(&known, &suggested, &none(2)),
            OverloadRank::Equivalent
        );
    }

    #[test]
    fn test_split_witnesses_are_ambiguous() {
        let known = vec![Weight::ZERO, Weight::promotion()];
        let suggested = vec![route(Weight::promotion()), route(Weight::ZERO)];
        assert_eq!(
            compare_alternatives(&known, &suggested, &none(2)),
            OverloadRank::Ambiguous
        );
    }

    #[test]
    fn test_against_all_infinite_any_possible_vector_is_better() {
        let known = vec![Weight::INFINITE, Weight::INFINITE];
        let suggested = vec![route(Weight::user_defined()), route(Weight::user_defined())];
        assert_eq!(
            compare_alternatives(&known, &suggested, &none(2)),
            OverloadRank::Better
        );
    }

    #[test]
    fn test_remember_weights_reads_routes_under_insights() {
        let insight = Insight::refined(3);
        let a = TypeDescriptor::new("a");
        let b = TypeDescriptor::new("b");
        let edge: Rc<dyn Conversion> = Rc::new(FnConversion::insight_sensitive(
            &a,
            &b,
            |insight| {
                if insight.is_refined() {
                    Weight::epsilon()
                } else {
                    Weight::user_defined()
                }
            },
            |value, _| value.clone(),
        ));
        let routes = vec![ConversionRoute::from_edges(vec![edge])];

        assert_eq!(remember_weights(&routes, &[insight]), vec![Weight::epsilon()]);
        assert_eq!(
            remember_weights(&routes, &[Insight::NONE]),
            vec![Weight::user_defined()]
        );
    }

    #[test]
    fn test_conversion_possible_rejects_any_infinite() {
        assert!(conversion_possible(&[]));
        assert!(conversion_possible(&[Weight::ZERO, Weight::user_defined()]));
        assert!(!conversion_possible(&[Weight::ZERO, Weight::INFINITE]));
    }
}
