//! Stop identifier type.

use std::fmt;

/// Maximum accepted stop id length.
const MAX_LEN: usize = 32;

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A stop identifier as used by the prediction API.
///
/// Stop ids are short ASCII alphanumeric strings such as `3084BC0001U2`.
/// This type guarantees that any `StopId` value is safe to place in a
/// query string without further escaping.
///
/// # Examples
///
/// ```
/// use brt_dashboard::domain::StopId;
///
/// let stop = StopId::parse("3084BC0001U2").unwrap();
/// assert_eq!(stop.as_str(), "3084BC0001U2");
///
/// // Empty ids and punctuation are rejected
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("3084&x=1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from a string.
    ///
    /// The input must be 1 to 32 ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidStopId {
                reason: "must be at most 32 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStopId {
                reason: "must be ASCII letters and digits",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
