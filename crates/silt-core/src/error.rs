use std::fmt;

/// Failures a curation operation can report.
///
/// Every failure is deterministic: re-invoking the same call with the same
/// inputs fails identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurationError {
    /// Buffer size is not a power of two greater than one.
    InvalidSiteCount(u64),
    /// Decode requested before the buffer has finished filling.
    UnfilledBuffer { site_count: u64, time: u64 },
    /// Decode requested past the policy's ingest capacity.
    CapacityExceeded { site_count: u64, time: u64 },
    /// Policy name did not match any known policy.
    UnknownPolicy(String),
}

impl fmt::Display for CurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurationError::InvalidSiteCount(s) => {
                write!(f, "site count {s} is not a power of two greater than one")
            }
            CurationError::UnfilledBuffer { site_count, time } => {
                write!(
                    f,
                    "decode at time {time} needs a filled buffer (site count {site_count})"
                )
            }
            CurationError::CapacityExceeded { site_count, time } => {
                write!(
                    f,
                    "time {time} is past the ingest capacity of {site_count} sites"
                )
            }
            CurationError::UnknownPolicy(name) => write!(f, "unknown policy: {name}"),
        }
    }
}

impl std::error::Error for CurationError {}

pub type Result<T> = std::result::Result<T, CurationError>;
