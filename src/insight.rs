//! Per-value refinement tags.

/// Runtime refinement tag attached to an actual argument.
///
/// The frontend produces one insight per actual at call time, typically
/// identifying the concrete subclass behind a polymorphic base. Insights
/// participate in route weighing and in the resolution-cache key, so a
/// single route can cost differently for different runtime shapes of the
/// same static type.
///
/// The tag space is frontend-defined; zero is reserved for
/// [`Insight::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Insight(u64);

impl Insight {
    /// "No refinement", the default for values the frontend has nothing
    /// to say about.
    pub const NONE: Insight = Insight(0);

    /// A refined tag. Callers must keep `tag` nonzero; zero denotes no
    /// refinement.
    pub fn refined(tag: u64) -> Insight {
        Insight(tag)
    }

    /// Whether this insight refines the value at all.
    pub fn is_refined(self) -> bool {
        self.0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Insight::default(), Insight::NONE);
        assert!(!Insight::NONE.is_refined());
    }

    #[test]
    fn test_refined_tags_are_ordered() {
        assert!(Insight::NONE < Insight::refined(1));
        assert!(Insight::refined(1) < Insight::refined(2));
        assert_eq!(Insight::refined(7), Insight::refined(7));
    }
}
