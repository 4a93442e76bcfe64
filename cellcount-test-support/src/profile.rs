//! Environment-driven sizing for property-test suites.
//!
//! Property suites read their case count and the largest grid side they may
//! generate from one shared policy, so CI can run a heavier profile than a
//! local `cargo test` without touching the suites.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const CASES_ENV_KEY: &str = "CELLCOUNT_PBT_CASES";
/// Environment variable overriding the largest generated grid side.
pub const MAX_SIDE_ENV_KEY: &str = "CELLCOUNT_PBT_MAX_SIDE";

/// Resolved sizing for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
    max_side: usize,
}

impl PropertyProfile {
    /// Reads overrides from the environment, falling back to the supplied
    /// defaults when a variable is unset or unparsable.
    ///
    /// # Examples
    /// ```
    /// use cellcount_test_support::profile::PropertyProfile;
    ///
    /// let profile = PropertyProfile::load(64, 12);
    /// assert!(profile.cases() > 0);
    /// assert!(profile.max_side() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_max_side: usize) -> Self {
        Self {
            cases: read_positive(CASES_ENV_KEY, default_cases),
            max_side: read_positive(MAX_SIDE_ENV_KEY, default_max_side),
        }
    }

    /// Number of cases each property runs.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Largest grid side a strategy may generate.
    #[must_use]
    pub fn max_side(&self) -> usize {
        self.max_side
    }
}

fn read_positive<T>(key: &'static str, default: T) -> T
where
    T: std::str::FromStr + PartialEq + From<u8> + Copy,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match parse_positive::<T>(&raw) {
        Ok(value) => value,
        Err(reason) => {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "invalid property-test profile override; using default",
            );
            default
        }
    }
}

fn parse_positive<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialEq + From<u8>,
    T::Err: std::fmt::Display,
{
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|error| format!("parse error: {error}"))?;
    if value == T::from(0) {
        return Err("value must be > 0".to_owned());
    }
    Ok(value)
}
