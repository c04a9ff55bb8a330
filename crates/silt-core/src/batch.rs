//! Batched engine: array-oriented re-expression of the scalar operations.
//!
//! High-throughput validation and bulk analysis push whole arrays of logical
//! times through one policy at a fixed buffer size. The batched forms are
//! the same pure functions element-wise — never a separate algorithm — and a
//! decode batch fails as a whole when any element violates a precondition,
//! so callers never see a partial table. Output order always equals input
//! order.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::CurationPolicy;

/// Element-wise capacity predicate over an array of times.
pub fn has_ingest_capacity_batched<P: CurationPolicy>(s: u64, times: &[u64]) -> Vec<bool> {
    times.iter().map(|&t| P::has_ingest_capacity(s, t)).collect()
}

/// Element-wise site assignment over an array of times.
///
/// # Panics
///
/// Same contract as the scalar assignment: every element must have ingest
/// capacity.
pub fn assign_storage_sites_batched<P: CurationPolicy>(s: u64, times: &[u64]) -> Vec<Option<u64>> {
    times.iter().map(|&t| P::assign_storage_site(s, t)).collect()
}

/// Decode over an array of times: row `i` holds the per-site ingest times
/// for `times[i]`.
///
/// Atomic: if any element fails a decode precondition the whole call errors
/// and no table is produced.
pub fn lookup_ingest_times_batched<P: CurationPolicy>(s: u64, times: &[u64]) -> Result<LookupTable> {
    let mut values = Vec::with_capacity(times.len() * s as usize);
    for &t in times {
        values.extend(P::lookup_ingest_times(s, t)?);
    }
    Ok(LookupTable {
        site_count: s,
        values,
    })
}

/// Row-major table of per-site ingest times, one row per queried time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTable {
    site_count: u64,
    values: Vec<Option<u64>>,
}

impl LookupTable {
    /// Sites per row.
    pub fn site_count(&self) -> u64 {
        self.site_count
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.values.len() / self.site_count as usize
    }

    /// The `index`-th row, in site order.
    pub fn row(&self, index: usize) -> &[Option<u64>] {
        let width = self.site_count as usize;
        &self.values[index * width..(index + 1) * width]
    }

    /// Rows in input order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<u64>]> {
        self.values.chunks_exact(self.site_count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurationError;
    use crate::policy::{Steady, Stretched, Tilted};

    #[test]
    fn test_batched_capacity_matches_scalar() {
        let times: Vec<u64> = (0..300).collect();
        let batched = has_ingest_capacity_batched::<Stretched>(8, &times);
        for (&t, &got) in times.iter().zip(&batched) {
            assert_eq!(got, Stretched::has_ingest_capacity(8, t), "t={t}");
        }
    }

    #[test]
    fn test_batched_assignment_matches_scalar() {
        let times: Vec<u64> = (0..200).collect();
        let batched = assign_storage_sites_batched::<Steady>(16, &times);
        for (&t, &got) in times.iter().zip(&batched) {
            assert_eq!(got, Steady::assign_storage_site(16, t), "t={t}");
        }
    }

    #[test]
    fn test_batched_decode_matches_scalar_rows() {
        let times: Vec<u64> = (8..100).collect();
        let table = lookup_ingest_times_batched::<Stretched>(8, &times).unwrap();
        assert_eq!(table.rows(), times.len());
        assert_eq!(table.site_count(), 8);
        for (i, &t) in times.iter().enumerate() {
            assert_eq!(
                table.row(i),
                Stretched::lookup_ingest_times(8, t).unwrap(),
                "row {i} (t={t}) diverged from scalar decode"
            );
        }
    }

    #[test]
    fn test_batched_decode_is_atomic() {
        // one violating element rejects the whole batch
        let times = [8u64, 9, 7, 10];
        let got = lookup_ingest_times_batched::<Stretched>(8, &times);
        assert_eq!(
            got,
            Err(CurationError::UnfilledBuffer {
                site_count: 8,
                time: 7
            })
        );
    }

    #[test]
    fn test_row_order_equals_input_order() {
        let times = [40u64, 12, 900, 12];
        let table = lookup_ingest_times_batched::<Tilted>(8, &times).unwrap();
        for (i, &t) in times.iter().enumerate() {
            assert_eq!(table.row(i), Tilted::lookup_ingest_times(8, t).unwrap());
        }
        // duplicate inputs produce duplicate rows
        assert_eq!(table.row(1), table.row(3));
    }

    #[test]
    fn test_empty_batch() {
        let table = lookup_ingest_times_batched::<Steady>(8, &[]).unwrap();
        assert_eq!(table.rows(), 0);
        assert_eq!(table.iter_rows().count(), 0);
    }
}
