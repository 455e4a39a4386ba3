//! Point-list entry points for fuzzy clustering.
//!
//! The matrix API in [`FuzzyCMeans`](super::FuzzyCMeans) is feature-major
//! (one sample per column). These traits take the other common shape: a
//! slice of points, one `Vec<f64>` of features per point.

use crate::error::Result;

/// Cluster a list of points and harden the result.
pub trait Clustering {
    /// Fit on `data` (one point per entry) and return, for every point, the
    /// cluster it has the largest membership in.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// Number of clusters the model fits.
    fn n_clusters(&self) -> usize;
}

/// Cluster a list of points and keep the graded memberships.
pub trait SoftClustering: Clustering {
    /// Fit on `data` and return one membership row per point.
    ///
    /// Row i has [`n_clusters`](Clustering::n_clusters) entries in [0, 1]
    /// summing to 1: the transpose of the fitted K × N membership matrix.
    fn fit_predict_proba(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;
}
