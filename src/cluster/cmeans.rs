//! Fuzzy c-means clustering.
//!
//! Partitions data into k **soft** clusters: every sample gets a membership in
//! every cluster, and a sample's memberships sum to 1 (Bezdek, 1981).
//!
//! # The Objective
//!
//! FCM minimizes:
//!
//! ```text
//! Jm = Σₖ Σₙ u[k, n]^m ||xₙ - cₖ||²
//! ```
//!
//! subject to `Σₖ u[k, n] = 1`. The fuzziness exponent `m > 1` controls how
//! soft the partition is: `m → 1` approaches k-means, large `m` pushes every
//! membership toward `1/k`.
//!
//! # Alternating Optimization
//!
//! 1. Start from a membership matrix U (random, or supplied by the caller)
//! 2. **Centers**: `cₖ = Σₙ u[k, n]^m xₙ / Σₙ u[k, n]^m`
//! 3. **Memberships**: `u[k, n] ∝ ||xₙ - cₖ||^(-2 / (m - 1))`
//! 4. Stop when `max |U_new - U_old| < error`, or after `max_iter` rounds
//!
//! Each half-step is the closed-form minimizer of `Jm` with the other half
//! fixed, so `Jm` never increases.
//!
//! # Prediction
//!
//! [`FuzzyCMeans::predict`] runs the same loop with the centers frozen: only
//! step 3 does any work. Memberships for new data come out exactly as the
//! fitted model would have assigned them.
//!
//! # Failure Modes
//!
//! - **Local optima**: non-convex; different initializations can land in
//!   different partitions
//! - **Label order**: center order follows the initialization, so two fits on
//!   the same data may list the same clusters in a different order
//! - **Wrong k**: k is fixed by the caller; compare the fuzzy partition
//!   coefficient across several k to choose one. k = 1 always scores 1.

use super::distance::{
    memberships_from_distances, pairwise_euclidean, validate_fuzziness, DISTANCE_FLOOR,
};
use super::normalize::normalize_columns;
use super::traits::{Clustering, SoftClustering};
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, Axis};
use rand::prelude::*;
use tracing::{debug, trace};

/// Lower bound on a membership before it is raised to `m` for the center update.
const MEMBERSHIP_FLOOR: f64 = f64::EPSILON;

/// How an FCM run stopped. Neither variant is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Membership change dropped below the error threshold.
    Converged,
    /// `max_iter` rounds ran without reaching the threshold.
    MaxIterReached,
}

/// Memberships and diagnostics produced by one fit or predict call.
#[derive(Debug, Clone)]
pub struct FuzzyPartition {
    /// Final membership matrix, K × N. Columns sum to 1.
    pub membership: Array2<f64>,
    /// Membership matrix from the round before the last one, K × N.
    pub previous_membership: Array2<f64>,
    /// Euclidean distance from every sample to every center, K × N,
    /// floored at `f64::EPSILON`.
    pub distances: Array2<f64>,
    /// Final objective `Σ u^m d²`.
    pub objective: f64,
    /// Objective after every round, in order.
    pub objective_history: Vec<f64>,
    /// Number of rounds performed.
    pub iterations: usize,
    /// Fuzzy partition coefficient, in `[1/k, 1]`.
    pub fpc: f64,
    /// Why the loop stopped.
    pub termination: Termination,
}

impl FuzzyPartition {
    /// Number of clusters (rows of the membership matrix).
    pub fn n_clusters(&self) -> usize {
        self.membership.nrows()
    }

    /// Number of samples (columns of the membership matrix).
    pub fn n_samples(&self) -> usize {
        self.membership.ncols()
    }

    /// Whether the run stopped on the error threshold.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Harden the partition: index of the largest membership per sample.
    ///
    /// Ties go to the lower cluster index.
    pub fn hard_labels(&self) -> Vec<usize> {
        self.membership
            .columns()
            .into_iter()
            .map(|col| {
                let mut best = 0;
                for (k, &v) in col.iter().enumerate() {
                    if v > col[best] {
                        best = k;
                    }
                }
                best
            })
            .collect()
    }
}

/// Result of [`FuzzyCMeans::fit`].
#[derive(Debug, Clone)]
pub struct CmeansFit {
    /// Cluster centers, K × C. Pass these to [`FuzzyCMeans::predict`].
    pub centers: Array2<f64>,
    /// Memberships of the training data.
    pub partition: FuzzyPartition,
}

/// Fuzzy partition coefficient: `trace(U Uᵗ) / N`.
///
/// 1 means every sample belongs fully to one cluster; `1/k` means every
/// membership is uniform.
pub fn fuzzy_partition_coefficient(membership: ArrayView2<'_, f64>) -> f64 {
    let n = membership.ncols();
    if n == 0 {
        return 0.0;
    }
    membership.iter().map(|u| u * u).sum::<f64>() / n as f64
}

/// Fuzzy c-means clusterer.
#[derive(Debug, Clone)]
pub struct FuzzyCMeans {
    /// Number of clusters.
    k: usize,
    /// Fuzziness exponent.
    m: f64,
    /// Stopping threshold on the max membership change.
    error: f64,
    /// Maximum rounds.
    max_iter: usize,
    /// Random seed for the initial memberships.
    seed: Option<u64>,
    /// Caller-supplied initial memberships (K × N).
    init: Option<Array2<f64>>,
}

impl FuzzyCMeans {
    /// Create a new clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            m: 2.0,
            error: 0.005,
            max_iter: 1000,
            seed: None,
            init: None,
        }
    }

    /// Set the fuzziness exponent (must be > 1).
    pub fn with_fuzziness(mut self, m: f64) -> Self {
        self.m = m;
        self
    }

    /// Set the stopping threshold.
    pub fn with_error(mut self, error: f64) -> Self {
        self.error = error;
        self
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    ///
    /// Without a seed (or an explicit initial matrix) results differ between
    /// runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start `fit` from this K × N membership matrix instead of a random one.
    /// Columns are normalized before use.
    pub fn with_init(mut self, init: Array2<f64>) -> Self {
        self.init = Some(init);
        self
    }

    /// Fit cluster centers to `data` (C × N, one sample per column).
    pub fn fit(&self, data: ArrayView2<'_, f64>) -> Result<CmeansFit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(data, &mut rng)
    }

    /// Like [`fit`](Self::fit), drawing the random initial memberships from
    /// `rng`. Ignored when an initial matrix was supplied.
    pub fn fit_with_rng<R: Rng>(
        &self,
        data: ArrayView2<'_, f64>,
        rng: &mut R,
    ) -> Result<CmeansFit> {
        self.validate()?;
        validate_data(&data)?;
        if self.k == 0 {
            return Err(Error::invalid("k", "must be > 0"));
        }

        let n = data.ncols();
        let u0 = match &self.init {
            Some(init) => {
                if init.dim() != (self.k, n) {
                    return Err(Error::invalid(
                        "init",
                        format!(
                            "expected shape {}x{}, got {}x{}",
                            self.k,
                            n,
                            init.nrows(),
                            init.ncols()
                        ),
                    ));
                }
                if init.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(Error::invalid(
                        "init",
                        "entries must be finite and non-negative",
                    ));
                }
                let u0 = normalize_columns(init.view())?;
                if let Some(index) = u0.rows().into_iter().position(|row| row.sum() == 0.0) {
                    return Err(Error::DegenerateInput {
                        what: "cluster",
                        index,
                    });
                }
                u0
            }
            None => random_membership(self.k, n, rng)?,
        };

        let mut step = FreeCenters {
            centers: Array2::zeros((self.k, data.nrows())),
        };
        let partition = self.run(data, u0, &mut step)?;

        Ok(CmeansFit {
            centers: step.centers,
            partition,
        })
    }

    /// Memberships of new `data` (C × N') against previously fitted
    /// `centers` (K × C). The centers are never modified; `k` on `self` is
    /// ignored in favour of the number of center rows.
    pub fn predict(
        &self,
        data: ArrayView2<'_, f64>,
        centers: ArrayView2<'_, f64>,
    ) -> Result<FuzzyPartition> {
        self.validate()?;
        validate_data(&data)?;
        if centers.nrows() == 0 {
            return Err(Error::invalid("centers", "need at least one center"));
        }
        if centers.ncols() != data.nrows() {
            return Err(Error::invalid(
                "centers",
                format!(
                    "centers have {} dimensions, data has {}",
                    centers.ncols(),
                    data.nrows()
                ),
            ));
        }
        if centers.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid("centers", "entries must be finite"));
        }

        // With frozen centers the first round already lands on the answer,
        // so the starting point only decides the reported change.
        let k = centers.nrows();
        let u0 = Array2::from_elem((k, data.ncols()), 1.0 / k as f64);

        self.run(data, u0, &mut FrozenCenters { centers })
    }

    fn validate(&self) -> Result<()> {
        validate_fuzziness(self.m)?;
        if !self.error.is_finite() || self.error <= 0.0 {
            return Err(Error::invalid(
                "error",
                format!("must be finite and > 0, got {}", self.error),
            ));
        }
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter", "must be > 0"));
        }
        Ok(())
    }

    /// The shared alternating loop. `step` decides whether centers move.
    fn run<S: CenterStep>(
        &self,
        data: ArrayView2<'_, f64>,
        mut u: Array2<f64>,
        step: &mut S,
    ) -> Result<FuzzyPartition> {
        let m = self.m;

        let mut previous = u.clone();
        let mut distances = Array2::zeros(u.dim());
        let mut history = Vec::new();
        let mut iterations = 0;
        let mut termination = Termination::MaxIterReached;

        while iterations < self.max_iter {
            previous = u;
            // Near m = 1 a whole cluster can underflow to 0; keep its weights positive.
            let weights = previous.mapv(|v| v.max(MEMBERSHIP_FLOOR).powf(m));

            let centers = step.centers(data, &weights);
            distances = pairwise_euclidean(data, centers)?.mapv(|d| d.max(DISTANCE_FLOOR));
            history.push(objective(&weights, &distances));

            u = memberships_from_distances(distances.view(), m)?;
            iterations += 1;

            let change = max_abs_diff(&u, &previous);
            trace!(iteration = iterations, change, "fcm round");
            if change < self.error {
                termination = Termination::Converged;
                break;
            }
        }

        let objective = objective(&u.mapv(|v| v.powf(m)), &distances);
        let fpc = fuzzy_partition_coefficient(u.view());
        debug!(
            k = u.nrows(),
            n = u.ncols(),
            iterations,
            ?termination,
            objective,
            fpc,
            "fcm finished"
        );

        Ok(FuzzyPartition {
            membership: u,
            previous_membership: previous,
            distances,
            objective,
            objective_history: history,
            iterations,
            fpc,
            termination,
        })
    }
}

impl Clustering for FuzzyCMeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let data = points_to_columns(data)?;
        Ok(self.fit(data.view())?.partition.hard_labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

impl SoftClustering for FuzzyCMeans {
    fn fit_predict_proba(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let data = points_to_columns(data)?;
        let fit = self.fit(data.view())?;
        Ok(fit
            .partition
            .membership
            .columns()
            .into_iter()
            .map(|col| col.to_vec())
            .collect())
    }
}

/// Center update, pluggable so fit and predict share one loop.
trait CenterStep {
    /// Centers for this round, given `u^m` (K × N).
    fn centers(&mut self, data: ArrayView2<'_, f64>, weights: &Array2<f64>)
        -> ArrayView2<'_, f64>;
}

/// Centers are free: weighted mean of the samples.
struct FreeCenters {
    centers: Array2<f64>,
}

impl CenterStep for FreeCenters {
    fn centers(
        &mut self,
        data: ArrayView2<'_, f64>,
        weights: &Array2<f64>,
    ) -> ArrayView2<'_, f64> {
        // (K × N) · (N × C). Weights are floored in `run`, so every total is > 0.
        let mut centers = weights.dot(&data.t());
        for (mut row, w) in centers.axis_iter_mut(Axis(0)).zip(weights.rows()) {
            let total = w.sum();
            row.mapv_inplace(|v| v / total);
        }
        self.centers = centers;
        self.centers.view()
    }
}

/// Centers are fixed by the caller.
struct FrozenCenters<'a> {
    centers: ArrayView2<'a, f64>,
}

impl CenterStep for FrozenCenters<'_> {
    fn centers(
        &mut self,
        _data: ArrayView2<'_, f64>,
        _weights: &Array2<f64>,
    ) -> ArrayView2<'_, f64> {
        self.centers.view()
    }
}

fn validate_data(data: &ArrayView2<'_, f64>) -> Result<()> {
    if data.nrows() == 0 || data.ncols() == 0 {
        return Err(Error::invalid(
            "data",
            format!(
                "need at least one feature and one sample, got {}x{}",
                data.nrows(),
                data.ncols()
            ),
        ));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid("data", "entries must be finite"));
    }
    Ok(())
}

fn random_membership<R: Rng>(k: usize, n: usize, rng: &mut R) -> Result<Array2<f64>> {
    let u0 = Array2::from_shape_simple_fn((k, n), || rng.random::<f64>());
    normalize_columns(u0.view())
}

fn objective(weights: &Array2<f64>, distances: &Array2<f64>) -> f64 {
    weights
        .iter()
        .zip(distances.iter())
        .map(|(w, d)| w * d * d)
        .sum()
}

fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Row-major points (one `Vec` per sample) to a C × N matrix.
fn points_to_columns(data: &[Vec<f64>]) -> Result<Array2<f64>> {
    if data.is_empty() {
        return Err(Error::invalid("data", "need at least one sample"));
    }
    let n = data.len();
    let d = data[0].len();

    let mut flat: Vec<f64> = Vec::with_capacity(n * d);
    for point in data {
        if point.len() != d {
            return Err(Error::invalid(
                "data",
                format!("expected {d} features per point, found {}", point.len()),
            ));
        }
        flat.extend(point);
    }
    let rows =
        Array2::from_shape_vec((n, d), flat).map_err(|e| Error::invalid("data", e.to_string()))?;
    Ok(rows.reversed_axes())
}
