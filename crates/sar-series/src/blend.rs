//! Linear blending between the two keyframes bracketing a query time.
//!
//! Every time-indexed series in this crate is a `BTreeMap<EpochMs, V>`;
//! [`blend_at`] implements the bracketing rule once for any `V: Blend`:
//!
//! | Query `t`                 | Result                                   |
//! |---------------------------|------------------------------------------|
//! | exactly a key             | that keyframe                            |
//! | before the first key      | the first keyframe                       |
//! | after the last key        | the last keyframe                        |
//! | between keys `a < t < b`  | `(1 − w)·V(a) + w·V(b)`, `w = (t−a)/(b−a)` |
//!
//! The result is re-stamped with `t` in every case.

use std::collections::BTreeMap;
use std::ops::Bound;

use sar_core::EpochMs;

use crate::{SeriesError, SeriesResult};

/// A keyframe value that can be linearly combined with another of its kind.
pub trait Blend: Clone {
    /// `w_before · before + w_after · after`.
    fn blend(before: &Self, w_before: f64, after: &Self, w_after: f64) -> SeriesResult<Self>;

    /// Attach the query time to a result.  Most values carry no timestamp.
    fn restamp(self, _t: EpochMs) -> Self {
        self
    }
}

/// The value of `series` at `t`.
pub fn blend_at<V: Blend>(series: &BTreeMap<EpochMs, V>, t: EpochMs) -> SeriesResult<V> {
    let before = series.range(..=t).next_back();
    let after = series.range((Bound::Excluded(t), Bound::Unbounded)).next();

    let value = match (before, after) {
        (None, None) => return Err(SeriesError::Empty),
        (Some((&k, v)), _) if k == t => v.clone(),
        (None, Some((&k, first))) => {
            log::debug!("query {t} precedes the series; clamping to {k}");
            first.clone()
        }
        (Some((&k, last)), None) => {
            log::debug!("query {t} follows the series; clamping to {k}");
            last.clone()
        }
        (Some((&a, va)), Some((&b, vb))) => {
            let w_after = later_weight(a, t, b);
            V::blend(va, 1.0 - w_after, vb, w_after)?
        }
    };
    Ok(value.restamp(t))
}

/// Weight on the later keyframe for `earlier < t < later`.
#[inline]
pub fn later_weight(earlier: EpochMs, t: EpochMs, later: EpochMs) -> f64 {
    (t - earlier) as f64 / (later - earlier) as f64
}
