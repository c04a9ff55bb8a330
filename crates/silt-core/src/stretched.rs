//! Stretched curation: the buffer is spent on a finite horizon, with
//! survivors spread across absolute time instead of log time.
//!
//! Sites are grouped into bunches laid out in bit-reversed order. Logical
//! bunch `b_l` stores hanoi value `h` at site `base(b_l) + h`, so as `h`
//! outgrows a bunch its writes invade the bunches to the right. Each
//! meta-epoch halves the number of bunches still receiving writes; bunch 0
//! alone writes forever, and ingest capacity runs out at `T = 2^S - 1` when
//! its next write would step past the last site.

use crate::bitops::{bit_floor, bit_length};
use crate::error::{CurationError, Result};
use crate::hanoi::{hanoi_incidence, hanoi_value};

/// Number of ingestions supported before the buffer is permanently
/// exhausted.
///
/// The exact bound is `2^s - 1`; for `s >= 64` it saturates to `u64::MAX`,
/// past anything a 64-bit stream position can reach.
pub fn get_ingest_capacity(s: u64) -> Option<u64> {
    if !(s.is_power_of_two() && s > 1) {
        return Some(0);
    }
    if s >= 64 {
        Some(u64::MAX)
    } else {
        Some((1u64 << s) - 1)
    }
}

/// Whether an item arriving at time `t` can still be ingested.
pub fn has_ingest_capacity(s: u64, t: u64) -> bool {
    match get_ingest_capacity(s) {
        None => true,
        Some(capacity) => t < capacity,
    }
}

/// Site the item arriving at time `t` should overwrite, or `None` to drop
/// the item.
///
/// # Panics
///
/// Panics when called without ingest capacity; callers check
/// [`has_ingest_capacity`] first.
pub fn assign_storage_site(s: u64, t: u64) -> Option<u64> {
    assert!(
        has_ingest_capacity(s, t),
        "no ingest capacity for {s} sites at time {t}"
    );
    let s_exp = u64::from(bit_length(s)) - 1;
    let epoch = u64::from(bit_length(t)).saturating_sub(s_exp);
    let h = hanoi_value(t);
    let i = hanoi_incidence(t, h);
    if i >= bunch_budget(s, epoch) {
        // this hanoi value already owns every bunch it will ever get
        return None;
    }
    Some(bunch_site_base(s, i) + u64::from(h))
}

/// Ingest time of the item occupying each site at time `t`, in site order.
///
/// Requires `S <= t <= capacity`: the fill-phase occupancy is not part of
/// the steady-state decode contract. Sweeps the closed-form write schedule
/// (bunch `b_l` writes hanoi value `h` at `(2*b_l + 1) * 2^h - 1`, up to its
/// meta-epoch cutoff), keeping the latest write before `t` per site; cost is
/// `O(S log S)` regardless of `t`.
pub fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>> {
    if !(s.is_power_of_two() && s > 1) {
        return Err(CurationError::InvalidSiteCount(s));
    }
    if t < s {
        return Err(CurationError::UnfilledBuffer {
            site_count: s,
            time: t,
        });
    }
    if let Some(capacity) = get_ingest_capacity(s)
        && t > capacity
    {
        return Err(CurationError::CapacityExceeded {
            site_count: s,
            time: t,
        });
    }
    let s_exp = u64::from(bit_length(s)) - 1;
    let mut out: Vec<Option<u64>> = vec![None; s as usize];
    for b_l in 0..(s >> 1) {
        let base = bunch_site_base(s, b_l);
        let last_h = if b_l == 0 {
            s - 1 // bounded by the buffer edge; capacity keeps writes in range
        } else {
            (1u64 << (s_exp - u64::from(bit_length(b_l)))) - 2 // meta-epoch cutoff
        };
        for h in 0..=last_h {
            let site = base + h;
            if site >= s {
                break;
            }
            let written = ((2 * u128::from(b_l) + 1) << h) - 1;
            if written >= u128::from(t) {
                break;
            }
            let written = written as u64;
            // several bunches can reach the same site; latest write wins
            if out[site as usize].is_none_or(|prev| prev < written) {
                out[site as usize] = Some(written);
            }
        }
    }
    Ok(out)
}

/// Number of bunches still receiving writes during `epoch`.
fn bunch_budget(s: u64, epoch: u64) -> u64 {
    let blt = u64::from(bit_length(epoch));
    let correction = bit_floor(epoch) << 1 > epoch + blt;
    let meta_epoch = blt - u64::from(correction);
    (s >> (meta_epoch + 1)).max(1)
}

/// Leftmost site of logical bunch `b_l`.
///
/// Bunches sit in bit-reversed physical order; the popcount term folds in
/// the widths of everything to the left.
fn bunch_site_base(s: u64, b_l: u64) -> u64 {
    if b_l == 0 {
        return 0;
    }
    let level = u64::from(bit_length(b_l)); // nestedness depth
    let spacing = s >> level;
    let position = b_l - bit_floor(b_l); // rank within the level
    let physical = (spacing >> 1) + spacing * position;
    let left_widths = u64::from(s.wrapping_shl(1).wrapping_sub(physical).count_ones());
    (physical << 1) + left_widths - 2
}
