//! Tilted curation: retention density leans toward the present.
//!
//! Levels follow the ruler layout: level `l` owns the `S / 2^(l+1)` sites
//! congruent to `2^l - 1` modulo `2^(l+1)`, and the single site `S - 1` is
//! the sentinel for hanoi values `log2(S)` and above. Within level `l`, rung
//! `j` keeps the latest item whose incidence has exactly `j` trailing zeros
//! (the top rung absorbs everything deeper), so every rung is one fixed
//! residue class of time. Recent items survive at full resolution while the
//! reach of each successive rung doubles, thinning coverage of older history
//! without ever cutting it off at a fixed horizon.

use crate::bitops::bit_length;
use crate::error::{CurationError, Result};
use crate::hanoi::{hanoi_incidence, hanoi_value};

/// Whether an item arriving at time `t` can be ingested.
///
/// Tilted curation never exhausts; the answer depends only on `s` being a
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

/// Site the item arriving at time `t` should overwrite.
///
/// Tilted curation drops nothing: every item lands somewhere and displaces
/// an older occupant instead.
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
    let s_exp = bit_length(s) - 1;
    let h = hanoi_value(t);
    if h >= s_exp {
        return Some(s - 1); // sentinel site for the deep hanoi values
    }
    let width = s >> (h + 1); // rungs in level h
    let i = hanoi_incidence(t, h);
    let rung = if i == 0 {
        width - 1
    } else {
        u64::from(i.trailing_zeros()).min(width - 1)
    };
    Some(rung << (h + 1) | ((1u64 << h) - 1))
}

/// Ingest time of the item occupying each site at time `t`, in site order.
///
/// Each rung holds the largest member of its residue class below `t`;
/// entries are `None` until the class has a member. Pure arithmetic, total
/// over `t`.
pub fn lookup_ingest_times(s: u64, t: u64) -> Result<Vec<Option<u64>>> {
    if !(s.is_power_of_two() && s > 1) {
        return Err(CurationError::InvalidSiteCount(s));
    }
    let s_exp = u64::from(bit_length(s)) - 1;
    let mut out: Vec<Option<u64>> = vec![None; s as usize];
    for level in 0..s_exp {
        let width = s >> (level + 1);
        for rung in 0..width {
            let site = rung << (level + 1) | ((1u64 << level) - 1);
            out[site as usize] = rung_occupant(level, rung, width, t);
        }
    }
    // sentinel site: latest time whose hanoi value reaches s_exp
    out[(s - 1) as usize] = latest_in_class(t, s_exp, (1u64 << s_exp) - 1);
    Ok(out)
}

/// Occupant of rung `j` in level `l`: the latest time whose incidence has
/// exactly `j` trailing zeros (top rung: at least `j`).
fn rung_occupant(level: u64, rung: u64, width: u64, t: u64) -> Option<u64> {
    if rung == width - 1 {
        let residue = (1u64 << level) - 1;
        latest_in_class(t, level + 1 + rung, residue)
    } else {
        let hi = level + rung + 1;
        if hi >= 64 {
            // the class's first member is already past the u64 time range
            return None;
        }
        let residue = (1u64 << hi) + (1u64 << level) - 1;
        latest_in_class(t, hi + 1, residue)
    }
}

/// Largest `x < t` with `x ≡ residue (mod 2^modulus_exp)`, if any.
fn latest_in_class(t: u64, modulus_exp: u64, residue: u64) -> Option<u64> {
    if residue >= t {
        return None;
    }
    if modulus_exp >= 64 {
        // the next class member is past the u64 time range
        return Some(residue);
    }
    Some(t - 1 - (t - 1 - residue) % (1u64 << modulus_exp))
}
