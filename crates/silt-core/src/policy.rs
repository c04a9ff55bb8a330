//! Interchangeable policy facades.
//!
//! Client code written against [`CurationPolicy`] runs identically over any
//! retention distribution; [`Policy`] adds selection by name for drivers and
//! configuration. One facade per policy, holding its four entry points — no
//! registries, no deferred binding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CurationError, Result};
use crate::{steady, stretched, tilted};

/// The capability set every curation policy exposes.
///
/// All four operations are pure functions of `(S, T)`; implementations are
/// drop-in substitutable.
pub trait CurationPolicy {
    /// Name the policy answers to in configuration and driver input.
    const NAME: &'static str;

    /// Whether an item arriving at time `t` can be ingested.
    fn has_ingest_capacity(s: u64, t: u64) -> bool;

    /// Number of ingestions supported; `None` means unbounded.
    fn get_ingest_capacity(s: u64) -> Option<u64>;

    /// Site the item arriving at time `t` should overwrite, or `None` to
    /// drop it. Panics without ingest capacity.
    fn assign_storage_site(s: u64, t: u64) -> Option<u64>;

    /// Ingest time of the item occupying each site at time `t`.
    fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>>;
}

/// Log-uniform coverage of elapsed time.
pub struct Steady;

/// Even coverage of a finite horizon.
pub struct Stretched;

/// Recency-biased coverage.
pub struct Tilted;

impl CurationPolicy for Steady {
    const NAME: &'static str = "steady";

    fn has_ingest_capacity(s: u64, t: u64) -> bool {
        steady::has_ingest_capacity(s, t)
    }

    fn get_ingest_capacity(s: u64) -> Option<u64> {
        steady::get_ingest_capacity(s)
    }

    fn assign_storage_site(s: u64, t: u64) -> Option<u64> {
        steady::assign_storage_site(s, t)
    }

    fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>> {
        steady::lookup_ingest_times(s, t)
    }
}

impl CurationPolicy for Stretched {
    const NAME: &'static str = "stretched";

    fn has_ingest_capacity(s: u64, t: u64) -> bool {
        stretched::has_ingest_capacity(s, t)
    }

    fn get_ingest_capacity(s: u64) -> Option<u64> {
        stretched::get_ingest_capacity(s)
    }

    fn assign_storage_site(s: u64, t: u64) -> Option<u64> {
        stretched::assign_storage_site(s, t)
    }

    fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>> {
        stretched::lookup_ingest_times(s, t)
    }
}

impl CurationPolicy for Tilted {
    const NAME: &'static str = "tilted";

    fn has_ingest_capacity(s: u64, t: u64) -> bool {
        tilted::has_ingest_capacity(s, t)
    }

    fn get_ingest_capacity(s: u64) -> Option<u64> {
        tilted::get_ingest_capacity(s)
    }

    fn assign_storage_site(s: u64, t: u64) -> Option<u64> {
        tilted::assign_storage_site(s, t)
    }

    fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>> {
        tilted::lookup_ingest_times(s, t)
    }
}

/// Runtime-selectable policy, for callers that pick the distribution from
/// configuration rather than at the type level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Steady,
    Stretched,
    Tilted,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Steady, Policy::Stretched, Policy::Tilted];

    pub fn name(self) -> &'static str {
        match self {
            Policy::Steady => Steady::NAME,
            Policy::Stretched => Stretched::NAME,
            Policy::Tilted => Tilted::NAME,
        }
    }

    pub fn has_ingest_capacity(self, s: u64, t: u64) -> bool {
        match self {
            Policy::Steady => Steady::has_ingest_capacity(s, t),
            Policy::Stretched => Stretched::has_ingest_capacity(s, t),
            Policy::Tilted => Tilted::has_ingest_capacity(s, t),
        }
    }

    pub fn get_ingest_capacity(self, s: u64) -> Option<u64> {
        match self {
            Policy::Steady => Steady::get_ingest_capacity(s),
            Policy::Stretched => Stretched::get_ingest_capacity(s),
            Policy::Tilted => Tilted::get_ingest_capacity(s),
        }
    }

    pub fn assign_storage_site(self, s: u64, t: u64) -> Option<u64> {
        match self {
            Policy::Steady => Steady::assign_storage_site(s, t),
            Policy::Stretched => Stretched::assign_storage_site(s, t),
            Policy::Tilted => Tilted::assign_storage_site(s, t),
        }
    }

    pub fn lookup_ingest_times(self, s: u64, t: u64) -> Result<Vec<Option<u64>>> {
        match self {
            Policy::Steady => Steady::lookup_ingest_times(s, t),
            Policy::Stretched => Stretched::lookup_ingest_times(s, t),
            Policy::Tilted => Tilted::lookup_ingest_times(s, t),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = CurationError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "steady" => Ok(Policy::Steady),
            "stretched" => Ok(Policy::Stretched),
            "tilted" => Ok(Policy::Tilted),
            other => Err(CurationError::UnknownPolicy(other.to_string())),
        }
    }
}
