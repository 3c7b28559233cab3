//! Constants shared across the sleep-stage evaluation harness.

/// Library version string
pub const EEG_SLEEPSTAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scalp region tokens that identify power-band feature columns
pub const REGION_TOKENS: [&str; 3] = ["anterior_", "central_", "posterior_"];

/// Frequency band tokens that identify power-band feature columns
pub const BAND_TOKENS: [&str; 6] = ["subdelta", "delta", "theta", "alpha", "beta", "gamma"];

/// The fixed anterior-only feature set used when `use_all_regions` is off.
///
/// Returned verbatim by the feature selector, without checking the table for
/// the columns' existence.
pub const ANTERIOR_FEATURES: [&str; 6] = [
    "anterior_subdelta",
    "anterior_delta",
    "anterior_theta",
    "anterior_alpha",
    "anterior_beta",
    "anterior_gamma",
];

/// Raw stage codes that mark an epoch as unscored and excluded from training
pub const EXCLUDED_STAGES: [&str; 3] = ["N", "?", "M"];

/// Raw stage codes mapped to the positive (N1/N2 sleep) class
pub const POSITIVE_STAGES: [&str; 2] = ["1", "2"];

/// Column name carrying the epoch key in input tables
pub const EPOCH_ID_COLUMN: &str = "epochId";

/// Column name carrying the raw sleep-stage label in input tables
pub const STAGE_COLUMN: &str = "sleep_stage";

/// Probability clip applied before log-loss to avoid log(0)
pub const PROB_CLIP_EPSILON: f64 = 1e-15;

/// Default held-out fraction for the rapid single-split mode
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default seed for the rapid split shuffle
pub const DEFAULT_SPLIT_SEED: u64 = 42;
