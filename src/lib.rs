//! # fuzzy-cmeans
//!
//! Fuzzy c-means clustering and defuzzification on dense `ndarray` matrices.
//!
//! - [`cluster`]: fit soft clusters ([`FuzzyCMeans::fit`]), then classify new
//!   samples against the fitted centers ([`FuzzyCMeans::predict`]).
//! - [`defuzz`]: reduce a membership curve to one crisp value (centroid,
//!   bisector, mean/smallest/largest of maximum).
//! - [`membership`]: triangular and trapezoidal membership curves.
//!
//! Every call is self-contained: matrices are allocated per call and nothing
//! is cached between calls, so independent calls may run on separate threads.
//! Enable the `parallel` feature to compute distance rows with rayon.

pub mod cluster;
pub mod defuzz;
/// Error types used across `fuzzy-cmeans`.
pub mod error;
pub mod membership;


pub use cluster::{
    fuzzy_partition_coefficient, normalize_columns, normalize_power_columns, Clustering,
    CmeansFit, FuzzyCMeans, FuzzyPartition, SoftClustering, Termination,
};
pub use defuzz::{defuzz, interp_membership, interp_membership_many, DefuzzMethod};
pub use error::{Error, Result};
pub use membership::{trapmf, trimf};
