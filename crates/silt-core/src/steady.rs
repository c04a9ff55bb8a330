//! Steady curation: even coverage across the logarithm of elapsed time.
//!
//! The buffer is a fixed left-to-right run of segments: segment 0 spans
//! `s + 1` sites and segment `m >= 1` spans `s - bit_length(m)` sites, where
//! `s = log2(S)`. Segment `m` retains exactly the items ingested at times
//! `(2m + 1) * 2^h - 1`, and each of its sites owns one residue class of `h`
//! modulo the segment width. Resolution halves with every doubling of age,
//! so every timescale keeps a roughly constant number of survivors no matter
//! how long the stream runs.

use crate::bitops::{bit_floor, bit_length};
use crate::error::{CurationError, Result};
use crate::hanoi::{hanoi_incidence, hanoi_value};

/// Whether an item arriving at time `t` can be ingested.
///
/// Steady curation never exhausts; the answer depends only on `s` being a
/// valid site count.
pub fn has_ingest_capacity(s: u64, _t: u64) -> bool {
    s.is_power_of_two() && s > 1
}

/// Number of ingestions supported; `None` means unbounded.
pub fn get_ingest_capacity(s: u64) -> Option<u64> {
    if s.is_power_of_two() && s > 1 {
        None
    } else {
        Some(0)
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
    let blt = u64::from(bit_length(t));
    let epoch = blt - blt.min(s_exp);
    let h = u64::from(hanoi_value(t));
    if h < epoch {
        // not among the top hanoi values of the current epoch
        return None;
    }
    let i = hanoi_incidence(t, hanoi_value(t));
    let (base, offset, width) = if i == 0 {
        (0, 0, s_exp + 1)
    } else {
        let j = bit_floor(i) - 1; // segments filled in full bunches
        let b = u64::from(bit_length(j)); // full bunches
        let width = h + s_exp + 1 - blt;
        ((1u64 << b) * (s_exp - b + 1), width * (i - j - 1), width)
    };
    debug_assert!(width > 0);
    Some(base + offset + h % width)
}

/// Ingest time of the item occupying each site at time `t`, in site order.
///
/// Pure arithmetic, no replay: the occupant of offset `p` in segment `m` is
/// the largest `h ≡ p (mod w)` with `(2m + 1) * 2^h <= t`, giving ingest
/// time `(2m + 1) * 2^h - 1`. Entries are `None` until the first write
/// reaches the site.
pub fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>> {
    if !(s.is_power_of_two() && s > 1) {
        return Err(CurationError::InvalidSiteCount(s));
    }
    let s_exp = u64::from(bit_length(s)) - 1;
    let mut out = Vec::with_capacity(s as usize);
    let mut m = 0u64;
    while (out.len() as u64) < s {
        let width = segment_width(s_exp, m);
        debug_assert!(width > 0, "segment map must tile all {s} sites exactly");
        let odd = 2 * m + 1;
        let reach = t / odd; // 2^h_max <= reach, if nonzero
        for p in 0..width {
            let occupant = match u64::from(bit_length(reach)).checked_sub(1) {
                Some(h_max) if h_max >= p => {
                    let h = h_max - (h_max - p) % width;
                    Some((odd << h) - 1)
                }
                _ => None,
            };
            out.push(occupant);
        }
        m += 1;
    }
    Ok(out)
}

/// Sites in segment `m`; the segment map tiles `[0, S)` exactly.
fn segment_width(s_exp: u64, m: u64) -> u64 {
    if m == 0 {
        s_exp + 1
    } else {
        s_exp - u64::from(bit_length(m))
    }
}
