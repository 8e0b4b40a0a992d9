//! Workflow run identifiers

use crate::error::{Error, Result};
use std::fmt;

/// Numeric id of a GitHub Actions workflow run
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl RunId {
    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Parse a run id out of a run locator
    ///
    /// The locator is normally the web URL of the run, e.g.
    /// `https://github.com/input-leap/input-leap/actions/runs/11834523211`.
    /// The run id is the last non-empty path segment; a bare id works too.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifact_dl::RunId;
    ///
    /// let id = RunId::from_locator("https://github.com/o/r/actions/runs/42/").unwrap();
    /// assert_eq!(id.get(), 42);
    /// ```
    pub fn from_locator(locator: &str) -> Result<Self> {
        let trimmed = locator.trim();

        // Query strings and fragments are not part of the path
        let path = match url::Url::parse(trimmed) {
            Ok(url) => url.path().to_string(),
            Err(_) => trimmed.to_string(),
        };

        let segment = path
            .split('/')
            .rev()
            .find(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidRunLocator {
                locator: locator.to_string(),
                reason: "no path segment to take a run id from".to_string(),
            })?;

        segment
            .parse::<u64>()
            .map(RunId)
            .map_err(|_| Error::InvalidRunLocator {
                locator: locator.to_string(),
                reason: format!("last path segment {:?} is not a numeric run id", segment),
            })
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RunId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
