//! Binary sleep-stage label mapping.

use crate::core::constants::{EXCLUDED_STAGES, POSITIVE_STAGES};
use crate::core::types::Label;

/// Map a raw stage code to the binary target: 1 for N1/N2 (`"1"`/`"2"`),
/// 0 for everything else.
///
/// Must only be applied to rows already filtered of the unscored sentinels
/// (`N`, `?`, `M`); calling it on an unfiltered table is a caller error and
/// is not validated here.
pub fn binary_label(stage: &str) -> Label {
    if POSITIVE_STAGES.contains(&stage) {
        1.0
    } else {
        0.0
    }
}

/// Whether a raw stage code is scored (not one of the exclusion sentinels).
pub fn is_scored(stage: &str) -> bool {
    !EXCLUDED_STAGES.contains(&stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_stages() {
        assert_eq!(binary_label("1"), 1.0);
        assert_eq!(binary_label("2"), 1.0);
    }

    #[test]
    fn test_negative_stages() {
        assert_eq!(binary_label("0"), 0.0);
        assert_eq!(binary_label("3"), 0.0);
        assert_eq!(binary_label("4"), 0.0);
        assert_eq!(binary_label("R"), 0.0);
        assert_eq!(binary_label("W"), 0.0);
    }

    #[test]
    fn test_scored_filter() {
        assert!(!is_scored("N"));
        assert!(!is_scored("?"));
        assert!(!is_scored("M"));
        assert!(is_scored("1"));
        assert!(is_scored("R"));
    }
}
