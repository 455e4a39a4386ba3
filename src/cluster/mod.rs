//! Fuzzy clustering.
//!
//! ## Hard vs Fuzzy Clustering
//!
//! **Hard clustering** assigns each sample to exactly one cluster. Simple, but
//! loses information when a sample sits between groups.
//!
//! **Fuzzy clustering** gives each sample a membership in every cluster. A
//! sample halfway between two blobs gets 0.5 in each instead of a coin flip.
//! [`FuzzyPartition::hard_labels`] recovers a hard assignment when one is
//! needed (e.g. for plotting).
//!
//! ## Layout
//!
//! Matrices follow one convention throughout:
//!
//! | Matrix | Shape | Meaning |
//! |--------|-------|---------|
//! | data | C × N | one sample per column |
//! | centers | K × C | one center per row |
//! | memberships, distances | K × N | one sample per column |
//!
//! Column-per-sample membership matrices make the partition-of-unity
//! invariant a column invariant: [`normalize_columns`] restores it and
//! [`normalize_power_columns`] turns distances into memberships.
//!
//! ## Choosing k
//!
//! Fit several k and compare [`FuzzyPartition::fpc`]. Higher is crisper.
//! k = 1 is the trivial partition and always scores exactly 1, so start at 2.
//!
//! ## Usage
//!
//! ```rust
//! use fuzzy_cmeans::cluster::FuzzyCMeans;
//! use ndarray::array;
//!
//! // Two features, six samples (one per column).
//! let data = array![
//!     [0.0, 0.1, 0.2, 10.0, 10.1, 10.2],
//!     [0.0, 0.1, 0.0, 10.0, 10.1, 10.0],
//! ];
//!
//! let model = FuzzyCMeans::new(2).with_seed(42);
//! let fit = model.fit(data.view()).unwrap();
//! let labels = fit.partition.hard_labels();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[3]);
//!
//! // Classify new samples against the fitted centers.
//! let new = array![[0.05], [0.05]];
//! let pred = model.predict(new.view(), fit.centers.view()).unwrap();
//! assert_eq!(pred.hard_labels()[0], labels[0]);
//! ```

mod cmeans;
mod distance;
mod normalize;
mod traits;

pub use cmeans::{
    fuzzy_partition_coefficient, CmeansFit, FuzzyCMeans, FuzzyPartition, Termination,
};
pub use distance::{memberships_from_distances, pairwise_euclidean, pairwise_squared_euclidean};
pub use normalize::{normalize_columns, normalize_power_columns};
pub use traits::{Clustering, SoftClustering};
