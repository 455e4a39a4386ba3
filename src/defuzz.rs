//! Defuzzification: reduce a membership curve to one crisp value.
//!
//! The curve is given as samples `mfx[i] = μ(x[i])` over a strictly
//! increasing domain `x`, and is treated as piecewise linear between samples.
//!
//! | Method | Value |
//! |--------|-------|
//! | [`Centroid`](DefuzzMethod::Centroid) | `Σ x·μ / Σ μ` |
//! | [`Bisector`](DefuzzMethod::Bisector) | abscissa splitting the area under μ in half |
//! | [`MeanOfMaximum`](DefuzzMethod::MeanOfMaximum) | mean of the `x` where μ is maximal |
//! | [`SmallestOfMaximum`](DefuzzMethod::SmallestOfMaximum) | smallest such `x` |
//! | [`LargestOfMaximum`](DefuzzMethod::LargestOfMaximum) | largest such `x` |
//!
//! Centroid and bisector need some area under the curve and return
//! [`Error::EmptySupport`] for an all-zero curve. The maximum-based methods
//! always have an answer (an all-zero curve is maximal everywhere).
//!
//! ```rust
//! use fuzzy_cmeans::defuzz::{defuzz, interp_membership, DefuzzMethod};
//! use fuzzy_cmeans::membership::trapmf;
//!
//! let x: Vec<f64> = (0..=20).map(|i| i as f64 * 0.25).collect();
//! let mfx = trapmf(&x, [2.0, 2.5, 4.0, 4.5]).unwrap();
//!
//! let som = defuzz(&x, &mfx, DefuzzMethod::SmallestOfMaximum).unwrap();
//! let lom = defuzz(&x, &mfx, "lom".parse().unwrap()).unwrap();
//! assert_eq!((som, lom), (2.5, 4.0));
//!
//! // Height of the curve at the defuzzified point.
//! let centroid = defuzz(&x, &mfx, DefuzzMethod::Centroid).unwrap();
//! let height = interp_membership(&x, &mfx, centroid).unwrap();
//! assert!(height > 0.9);
//! ```

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// Defuzzification strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefuzzMethod {
    /// Center of mass.
    Centroid,
    /// Equal-area split.
    Bisector,
    /// Mean of maximum (`mom`).
    MeanOfMaximum,
    /// Smallest of maximum (`som`).
    SmallestOfMaximum,
    /// Largest of maximum (`lom`).
    LargestOfMaximum,
}

impl DefuzzMethod {
    /// Short name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            DefuzzMethod::Centroid => "centroid",
            DefuzzMethod::Bisector => "bisector",
            DefuzzMethod::MeanOfMaximum => "mom",
            DefuzzMethod::SmallestOfMaximum => "som",
            DefuzzMethod::LargestOfMaximum => "lom",
        }
    }
}

impl fmt::Display for DefuzzMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefuzzMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "centroid" => Ok(DefuzzMethod::Centroid),
            "bisector" => Ok(DefuzzMethod::Bisector),
            "mom" => Ok(DefuzzMethod::MeanOfMaximum),
            "som" => Ok(DefuzzMethod::SmallestOfMaximum),
            "lom" => Ok(DefuzzMethod::LargestOfMaximum),
            other => Err(Error::invalid(
                "method",
                format!("unknown defuzzification method '{other}'"),
            )),
        }
    }
}

/// Defuzzify `mfx` over `x` with the given method.
pub fn defuzz(x: &[f64], mfx: &[f64], method: DefuzzMethod) -> Result<f64> {
    match method {
        DefuzzMethod::Centroid => centroid(x, mfx),
        DefuzzMethod::Bisector => bisector(x, mfx),
        DefuzzMethod::MeanOfMaximum => mean_of_maximum(x, mfx),
        DefuzzMethod::SmallestOfMaximum => smallest_of_maximum(x, mfx),
        DefuzzMethod::LargestOfMaximum => largest_of_maximum(x, mfx),
    }
}

fn validate_curve(x: &[f64], mfx: &[f64]) -> Result<()> {
    if x.is_empty() {
        return Err(Error::invalid("x", "domain is empty"));
    }
    if x.len() != mfx.len() {
        return Err(Error::invalid(
            "mfx",
            format!("length {} does not match domain length {}", mfx.len(), x.len()),
        ));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid("x", "domain must be finite"));
    }
    if x.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::invalid("x", "domain must be strictly increasing"));
    }
    if mfx.iter().any(|v| !(0.0..=1.0).contains(v)) {
        return Err(Error::invalid("mfx", "memberships must lie in [0, 1]"));
    }
    Ok(())
}

/// Center of mass: `Σ x·μ / Σ μ`.
pub fn centroid(x: &[f64], mfx: &[f64]) -> Result<f64> {
    validate_curve(x, mfx)?;
    let mass: f64 = mfx.iter().sum();
    if mass == 0.0 {
        return Err(Error::EmptySupport);
    }
    let moment: f64 = x.iter().zip(mfx).map(|(x, u)| x * u).sum();
    Ok(moment / mass)
}

/// Abscissa splitting the area under the piecewise-linear curve in half.
///
/// Areas are accumulated segment by segment from the left; inside the
/// segment where the running area crosses half the total, the exact
/// crossing point is solved for.
pub fn bisector(x: &[f64], mfx: &[f64]) -> Result<f64> {
    validate_curve(x, mfx)?;
    if x.len() == 1 {
        return if mfx[0] > 0.0 {
            Ok(x[0])
        } else {
            Err(Error::EmptySupport)
        };
    }

    let areas: Vec<f64> = (1..x.len())
        .map(|i| 0.5 * (x[i] - x[i - 1]) * (mfx[i - 1] + mfx[i]))
        .collect();
    let total: f64 = areas.iter().sum();
    if total == 0.0 {
        return Err(Error::EmptySupport);
    }

    let half = total / 2.0;
    let mut cumulative = 0.0;
    for (i, &area) in areas.iter().enumerate() {
        if cumulative + area >= half {
            let (x0, x1) = (x[i], x[i + 1]);
            let (y0, y1) = (mfx[i], mfx[i + 1]);
            let t = crossing_offset(y0, (y1 - y0) / (x1 - x0), half - cumulative);
            return Ok(x0 + t.clamp(0.0, x1 - x0));
        }
        cumulative += area;
    }

    Ok(x[x.len() - 1])
}

/// Smallest `t >= 0` with `∫₀ᵗ (y0 + slope·s) ds = target`.
fn crossing_offset(y0: f64, slope: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    // Root of slope/2·t² + y0·t − target, in the form that stays stable for
    // slope of either sign (and reduces to target / y0 when slope is 0).
    let disc = (y0 * y0 + 2.0 * slope * target).max(0.0);
    let denom = y0 + disc.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    2.0 * target / denom
}

fn maximum_points(x: &[f64], mfx: &[f64]) -> Result<Vec<f64>> {
    validate_curve(x, mfx)?;
    let peak = mfx.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(x.iter()
        .zip(mfx)
        .filter(|(_, &u)| u == peak)
        .map(|(&x, _)| x)
        .collect())
}

/// Mean of the domain points where the membership is maximal.
pub fn mean_of_maximum(x: &[f64], mfx: &[f64]) -> Result<f64> {
    let points = maximum_points(x, mfx)?;
    Ok(points.iter().sum::<f64>() / points.len() as f64)
}

/// Smallest domain point where the membership is maximal.
pub fn smallest_of_maximum(x: &[f64], mfx: &[f64]) -> Result<f64> {
    let points = maximum_points(x, mfx)?;
    Ok(points[0])
}

/// Largest domain point where the membership is maximal.
pub fn largest_of_maximum(x: &[f64], mfx: &[f64]) -> Result<f64> {
    let points = maximum_points(x, mfx)?;
    Ok(points[points.len() - 1])
}

/// Membership at an arbitrary abscissa, by linear interpolation.
///
/// Outside the domain the nearest endpoint value is returned.
pub fn interp_membership(x: &[f64], mfx: &[f64], query: f64) -> Result<f64> {
    validate_curve(x, mfx)?;
    interp_validated(x, mfx, query)
}

/// [`interp_membership`] for a batch of queries.
pub fn interp_membership_many(x: &[f64], mfx: &[f64], queries: &[f64]) -> Result<Vec<f64>> {
    validate_curve(x, mfx)?;
    queries
        .iter()
        .map(|&q| interp_validated(x, mfx, q))
        .collect()
}

fn interp_validated(x: &[f64], mfx: &[f64], query: f64) -> Result<f64> {
    if !query.is_finite() {
        return Err(Error::invalid("query", "must be finite"));
    }
    let last = x.len() - 1;
    if query <= x[0] {
        return Ok(mfx[0]);
    }
    if query >= x[last] {
        return Ok(mfx[last]);
    }

    // x[i - 1] <= query < x[i]
    let i = x.partition_point(|&v| v <= query);
    let (x0, x1) = (x[i - 1], x[i]);
    let (y0, y1) = (mfx[i - 1], mfx[i]);
    Ok(y0 + (y1 - y0) * (query - x0) / (x1 - x0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{trapmf, trimf};

    fn grid(lo: f64, step: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| lo + i as f64 * step).collect()
    }

    #[test]
    fn test_centroid_symmetric_triangle() {
        let x = grid(0.0, 0.5, 21);
        let mfx = trimf(&x, [0.0, 5.0, 10.0]).unwrap();
        assert!((centroid(&x, &mfx).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bisector_symmetric_triangle() {
        let x = grid(0.0, 1.0, 11);
        let mfx = trimf(&x, [0.0, 5.0, 10.0]).unwrap();
        assert!((bisector(&x, &mfx).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bisector_inside_flat_segment() {
        // Rectangle on [0, 4]: half the area sits left of 2.
        let x = [0.0, 4.0];
        let mfx = [1.0, 1.0];
        assert!((bisector(&x, &mfx).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bisector_right_triangle() {
        // Ramp 0 → 1 on [0, 1]: area to t is t²/2, half of 1/2 at t = 1/√2.
        let x = [0.0, 1.0];
        let mfx = [0.0, 1.0];
        let b = bisector(&x, &mfx).unwrap();
        assert!((b - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_bisector_falling_ramp() {
        // Ramp 1 → 0 on [0, 1]: mirror image, 1 − 1/√2.
        let x = [0.0, 1.0];
        let mfx = [1.0, 0.0];
        let b = bisector(&x, &mfx).unwrap();
        assert!((b - (1.0 - std::f64::consts::FRAC_1_SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn test_maximum_methods_on_trapezoid() {
        let x = grid(0.0, 0.25, 21);
        let mfx = trapmf(&x, [2.0, 2.5, 4.0, 4.5]).unwrap();

        assert_eq!(defuzz(&x, &mfx, DefuzzMethod::SmallestOfMaximum).unwrap(), 2.5);
        assert_eq!(defuzz(&x, &mfx, DefuzzMethod::LargestOfMaximum).unwrap(), 4.0);
        assert!((defuzz(&x, &mfx, DefuzzMethod::MeanOfMaximum).unwrap() - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_all_methods_by_name() {
        let x = grid(0.0, 0.1, 51);
        let mfx = trapmf(&x, [2.0, 2.5, 3.0, 4.5]).unwrap();

        for name in ["centroid", "bisector", "mom", "som", "lom"] {
            let method: DefuzzMethod = name.parse().unwrap();
            assert_eq!(method.as_str(), name);
            let v = defuzz(&x, &mfx, method).unwrap();
            assert!((2.0..=4.5).contains(&v), "{name} = {v}");
        }
    }

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("MoM".parse::<DefuzzMethod>().unwrap(), DefuzzMethod::MeanOfMaximum);
    }

    #[test]
    fn test_unknown_method() {
        assert!(matches!(
            "median".parse::<DefuzzMethod>(),
            Err(Error::InvalidParameter { name: "method", .. })
        ));
    }

    #[test]
    fn test_empty_support() {
        let x = [0.0, 1.0, 2.0];
        let mfx = [0.0, 0.0, 0.0];
        assert_eq!(centroid(&x, &mfx), Err(Error::EmptySupport));
        assert_eq!(bisector(&x, &mfx), Err(Error::EmptySupport));
        assert_eq!(bisector(&[1.0], &[0.0]), Err(Error::EmptySupport));
        // Every point is a maximum of the zero curve.
        assert_eq!(mean_of_maximum(&x, &mfx).unwrap(), 1.0);
    }

    #[test]
    fn test_single_point_domain() {
        assert_eq!(bisector(&[3.0], &[0.4]).unwrap(), 3.0);
        assert!((centroid(&[3.0], &[0.4]).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_curves() {
        let cases: [(&[f64], &[f64]); 5] = [
            (&[], &[]),
            (&[0.0, 1.0], &[0.5]),
            (&[0.0, 0.0], &[0.5, 0.5]),
            (&[1.0, 0.0], &[0.5, 0.5]),
            (&[0.0, 1.0], &[0.5, 1.5]),
        ];
        for (x, mfx) in cases {
            assert!(
                matches!(centroid(x, mfx), Err(Error::InvalidParameter { .. })),
                "{x:?} / {mfx:?}"
            );
        }
    }

    #[test]
    fn test_interp_two_point_segment() {
        let x = [0.0, 1.0];
        let mfx = [0.0, 1.0];
        assert_eq!(interp_membership(&x, &mfx, 0.5).unwrap(), 0.5);
    }

    #[test]
    fn test_interp_clamps_outside_domain() {
        let x = [1.0, 2.0, 3.0];
        let mfx = [0.2, 1.0, 0.6];
        assert_eq!(interp_membership(&x, &mfx, -10.0).unwrap(), 0.2);
        assert_eq!(interp_membership(&x, &mfx, 10.0).unwrap(), 0.6);
        assert_eq!(interp_membership(&x, &mfx, 2.0).unwrap(), 1.0);
        assert!((interp_membership(&x, &mfx, 2.5).unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_interp_many() {
        let x = [0.0, 2.0];
        let mfx = [1.0, 0.0];
        let ys = interp_membership_many(&x, &mfx, &[0.0, 0.5, 1.0, 3.0]).unwrap();
        assert_eq!(ys, vec![1.0, 0.75, 0.5, 0.0]);
        assert!(interp_membership_many(&x, &mfx, &[f64::NAN]).is_err());
    }
}
