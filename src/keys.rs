//! Typed product keys.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

const KEY_PREFIX: &str = "prod_";

/// Internal numeric product identifier.
///
/// Renders externally as `prod_<decimal>` and parses back from either the
/// prefixed form or a bare decimal string, so callers may echo the value
/// the service emitted or pass a raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductKey(u64);

impl ProductKey {
    #[must_use]
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ProductKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{KEY_PREFIX}{}", self.0)
    }
}

/// The identifier string did not decode to a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product identifier: {input:?}")]
pub struct ParseProductKeyError {
    pub input: String,
}

impl FromStr for ProductKey {
    type Err = ParseProductKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(KEY_PREFIX).unwrap_or(s);

        digits.parse::<u64>().map(Self).map_err(|_| ParseProductKeyError {
            input: s.to_string(),
        })
    }
}
