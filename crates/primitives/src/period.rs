use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of the ordered set holding one leaderboard period.
///
/// Monthly keys have the form `<prefix>:<YYYYMM>`. Sets under different keys
/// never see each other's entries.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    /// Key for the calendar month `year`/`month` (1-12), zero padded.
    pub fn monthly(prefix: &str, year: i32, month: u32) -> Self {
        Self(format!("{prefix}:{year:04}{month:02}"))
    }

    /// The key as passed to the store.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PeriodKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for PeriodKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl AsRef<str> for PeriodKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
