//! Membership function generators.
//!
//! Piecewise-linear curves evaluated over a discretized domain, the usual
//! inputs to [`crate::defuzz`].
//!
//! ```text
//!  trimf [a, b, c]          trapmf [a, b, c, d]
//!
//!  1 |     /\               1 |     ______
//!    |    /  \                |    /      \
//!  0 |___/    \___          0 |___/        \___
//!        a  b  c                  a  b    c  d
//! ```

use crate::error::{Error, Result};

fn check_breakpoints(name: &'static str, points: &[f64]) -> Result<()> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(Error::invalid(name, "breakpoints must be finite"));
    }
    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::invalid(
            name,
            format!("breakpoints must be non-decreasing, got {points:?}"),
        ));
    }
    Ok(())
}

/// Rising edge from `lo` (0) to `hi` (1), for `lo < x < hi`.
fn rise(x: f64, lo: f64, hi: f64) -> f64 {
    (x - lo) / (hi - lo)
}

/// Falling edge from `lo` (1) to `hi` (0), for `lo < x < hi`.
fn fall(x: f64, lo: f64, hi: f64) -> f64 {
    (hi - x) / (hi - lo)
}

/// Triangular membership function with feet `a`, `c` and peak `b`.
///
/// `a == b` or `b == c` gives a vertical shoulder.
pub fn trimf(x: &[f64], abc: [f64; 3]) -> Result<Vec<f64>> {
    check_breakpoints("abc", &abc)?;
    let [a, b, c] = abc;

    Ok(x.iter()
        .map(|&v| {
            if v == b {
                1.0
            } else if a < v && v < b {
                rise(v, a, b)
            } else if b < v && v < c {
                fall(v, b, c)
            } else {
                0.0
            }
        })
        .collect())
}

/// Trapezoidal membership function: 0 outside `[a, d]`, 1 on `[b, c]`.
pub fn trapmf(x: &[f64], abcd: [f64; 4]) -> Result<Vec<f64>> {
    check_breakpoints("abcd", &abcd)?;
    let [a, b, c, d] = abcd;

    Ok(x.iter()
        .map(|&v| {
            if b <= v && v <= c {
                1.0
            } else if a < v && v < b {
                rise(v, a, b)
            } else if c < v && v < d {
                fall(v, c, d)
            } else {
                0.0
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimf_shape() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = trimf(&x, [1.0, 3.0, 5.0]).unwrap();
        assert_eq!(y, vec![0.0, 0.0, 0.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_trimf_vertical_shoulder() {
        let x = [0.0, 1.0, 2.0];
        let y = trimf(&x, [0.0, 0.0, 2.0]).unwrap();
        assert_eq!(y, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_trapmf_plateau() {
        let x: Vec<f64> = (0..=10).map(|i| i as f64 * 0.5).collect();
        let y = trapmf(&x, [1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(y[0], 0.0);
        assert_eq!(y[3], 0.5); // 1.5
        assert_eq!(y[4], 1.0); // 2.0
        assert_eq!(y[6], 1.0); // 3.0
        assert_eq!(y[7], 0.5); // 3.5
        assert_eq!(y[10], 0.0);
    }

    #[test]
    fn test_unordered_breakpoints_rejected() {
        assert!(matches!(
            trimf(&[0.0], [2.0, 1.0, 3.0]),
            Err(Error::InvalidParameter { name: "abc", .. })
        ));
        assert!(trapmf(&[0.0], [0.0, 1.0, 3.0, 2.0]).is_err());
        assert!(trapmf(&[0.0], [0.0, f64::NAN, 3.0, 4.0]).is_err());
    }
}
