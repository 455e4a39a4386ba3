//! Sample-to-center distances and the distance → membership map.
//!
//! Data is feature-major (C × N, one sample per column); centers are
//! cluster-major (K × C, one center per row). Distance matrices are K × N, so
//! a column holds one sample's distance to every center, which is the layout
//! [`normalize_power_columns`] expects.
//!
//! The FCM membership of sample n in cluster k is
//!
//! ```text
//! u[k, n] = 1 / Σⱼ (d[k, n] / d[j, n]) ^ (2 / (m - 1))
//!         = normalize_columns(d ** (-2 / (m - 1)))[k, n]
//! ```
//!
//! with `d` the plain (not squared) Euclidean distance.

use super::normalize::normalize_power_columns;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distances are floored here before being turned into memberships.
pub(crate) const DISTANCE_FLOOR: f64 = f64::EPSILON;

fn check_dims(data: &ArrayView2<'_, f64>, centers: &ArrayView2<'_, f64>) -> Result<()> {
    if data.nrows() != centers.ncols() {
        return Err(Error::invalid(
            "centers",
            format!(
                "centers have {} dimensions, data has {}",
                centers.ncols(),
                data.nrows()
            ),
        ));
    }
    Ok(())
}

fn squared_distance_row(data: &ArrayView2<'_, f64>, center: &[f64]) -> Vec<f64> {
    data.columns()
        .into_iter()
        .map(|sample| {
            sample
                .iter()
                .zip(center.iter())
                .map(|(x, c)| (x - c).powi(2))
                .sum::<f64>()
        })
        .collect()
}

/// Squared Euclidean distance from every sample (column of `data`) to every
/// center (row of `centers`). Returns a K × N matrix.
pub fn pairwise_squared_euclidean(
    data: ArrayView2<'_, f64>,
    centers: ArrayView2<'_, f64>,
) -> Result<Array2<f64>> {
    check_dims(&data, &centers)?;
    let k = centers.nrows();
    let n = data.ncols();

    let rows: Vec<Vec<f64>> = centers
        .rows()
        .into_iter()
        .map(|c| c.to_vec())
        .collect();

    #[cfg(feature = "parallel")]
    let dist_rows: Vec<Vec<f64>> = rows
        .par_iter()
        .map(|c| squared_distance_row(&data, c))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let dist_rows: Vec<Vec<f64>> = rows
        .iter()
        .map(|c| squared_distance_row(&data, c))
        .collect();

    let flat: Vec<f64> = dist_rows.into_iter().flatten().collect();
    Array2::from_shape_vec((k, n), flat).map_err(|e| Error::invalid("centers", e.to_string()))
}

/// Plain Euclidean distance, K × N.
pub fn pairwise_euclidean(
    data: ArrayView2<'_, f64>,
    centers: ArrayView2<'_, f64>,
) -> Result<Array2<f64>> {
    Ok(pairwise_squared_euclidean(data, centers)?.mapv(f64::sqrt))
}

/// Convert a K × N matrix of Euclidean distances to fuzzy memberships.
///
/// A sample lying exactly on a center gets (almost) all of its membership
/// from that center rather than a NaN column.
pub fn memberships_from_distances(distances: ArrayView2<'_, f64>, m: f64) -> Result<Array2<f64>> {
    validate_fuzziness(m)?;
    let floored = distances.mapv(|d| d.max(DISTANCE_FLOOR));
    normalize_power_columns(floored.view(), -2.0 / (m - 1.0))
}

pub(crate) fn validate_fuzziness(m: f64) -> Result<()> {
    if !m.is_finite() || m <= 1.0 {
        return Err(Error::invalid("m", format!("must be finite and > 1, got {m}")));
    }
    Ok(())
}
