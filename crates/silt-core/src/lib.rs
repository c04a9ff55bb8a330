//! Deterministic stream curation: fixed-capacity site buffers that
//! downsample an unbounded stream so the ingest time of every occupied site
//! can be recomputed from the buffer size and current logical time alone —
//! no bookkeeping rides along with the payload.
//!
//! Three interchangeable policies: [`steady`] spreads survivors evenly over
//! the logarithm of elapsed time, [`stretched`] spends the buffer on a
//! finite horizon, [`tilted`] leans retention toward the present. The
//! producer checks capacity and asks for a site per item; any later consumer
//! decodes the full site-to-time mapping from `(S, T)`.
//!
//! Zero I/O — pure math with no opinions about transport or payload storage.

pub mod batch;
pub mod battery;
pub mod bitops;
pub mod error;
pub mod hanoi;
pub mod policy;
pub mod steady;
pub mod stretched;
pub mod tilted;

pub use batch::{
    LookupTable, assign_storage_sites_batched, has_ingest_capacity_batched,
    lookup_ingest_times_batched,
};
pub use battery::{BATTERY_SEED, generate_cases};
pub use error::{CurationError, Result};
pub use policy::{CurationPolicy, Policy, Steady, Stretched, Tilted};
