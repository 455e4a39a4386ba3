//! Column normalization.
//!
//! Every FCM iteration turns a K × N matrix of non-negative scores (one
//! column per sample) into memberships whose columns sum to 1. Two flavours:
//!
//! - [`normalize_columns`]: plain `M[:, j] / Σ M[:, j]`.
//! - [`normalize_power_columns`]: `normalize_columns(X ** p)` computed on a
//!   rescaled copy of `X`, so large negative exponents cannot blow up.
//!
//! # Why rescale before the power
//!
//! Memberships come from `d ** (-2 / (m - 1))`. With m close to 1 the
//! exponent is large and negative, and a distance near zero raised to it
//! overflows to `inf` (then `inf / inf = NaN` after normalizing). Since the
//! result is normalized anyway, any per-column positive scale factor cancels
//! out. We pick the factor so the column minimum lands on exactly 1:
//!
//! ```text
//! x / max(x)          -> [ε, 1]       (floored at ε, only when p < 0)
//! x / min(x)          -> [1, 1/ε]     (only when p < 0)
//! x ** p              -> [(1/ε)^p, 1]
//! ```
//!
//! The largest entry after the power is exactly 1, so the column sum is at
//! least 1 and the final division is always well defined. Entries that
//! underflow to 0 are legitimate near-zero memberships. For p >= 0 there is
//! nothing to overflow: zeros stay zero and only the `x / max(x)` scaling
//! is applied.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};

/// Divide every column by its sum.
///
/// Returns [`Error::DegenerateInput`] for a column summing to zero (or to a
/// non-finite value), instead of producing NaN.
pub fn normalize_columns(m: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let mut out = m.to_owned();
    for (j, mut col) in out.columns_mut().into_iter().enumerate() {
        let sum = col.sum();
        if sum == 0.0 || !sum.is_finite() {
            return Err(Error::DegenerateInput {
                what: "column",
                index: j,
            });
        }
        col.mapv_inplace(|v| v / sum);
    }
    Ok(out)
}

/// Compute `normalize_columns(x ** exponent)` without overflow.
///
/// `x` must be non-negative and finite. An all-zero column is treated as a
/// column of ties and comes out uniform. With a negative exponent, zero
/// entries are floored at `f64::EPSILON` after scaling; with a non-negative
/// one the result equals `normalize_columns(x ** exponent)`.
pub fn normalize_power_columns(x: ArrayView2<'_, f64>, exponent: f64) -> Result<Array2<f64>> {
    if !exponent.is_finite() {
        return Err(Error::invalid(
            "exponent",
            format!("must be finite, got {exponent}"),
        ));
    }
    if x.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(Error::invalid("x", "entries must be finite and non-negative"));
    }

    let mut out = x.to_owned();
    for mut col in out.columns_mut() {
        let max = col.fold(0.0_f64, |acc, &v| acc.max(v));
        if max == 0.0 {
            col.fill(1.0);
        } else if exponent < 0.0 {
            col.mapv_inplace(|v| (v / max).max(f64::EPSILON));
        } else {
            col.mapv_inplace(|v| v / max);
        }

        if exponent < 0.0 {
            let min = col.fold(1.0_f64, |acc, &v| acc.min(v));
            col.mapv_inplace(|v| v / min);
        }

        col.mapv_inplace(|v| v.powf(exponent));
    }

    normalize_columns(out.view())
}
