//! Shared test utilities for `cellcount-core`.

use cellcount_test_support::profile::PropertyProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Largest grid side generated by default; `CELLCOUNT_PBT_MAX_SIDE` overrides
/// it.
pub(crate) const DEFAULT_MAX_SIDE: usize = 12;

/// Builds a proptest configuration from the shared property profile so every
/// suite honours `CELLCOUNT_PBT_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::load(default_cases, DEFAULT_MAX_SIDE);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Largest grid side property strategies may generate.
#[must_use]
pub(crate) fn max_grid_side() -> usize {
    PropertyProfile::load(1, DEFAULT_MAX_SIDE).max_side()
}
