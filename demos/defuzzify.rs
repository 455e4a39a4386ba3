use fuzzy_cmeans::{defuzz, interp_membership, trapmf, DefuzzMethod};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Trapezoid on [0, 5]: rises over [2, 2.5], flat to 3, falls to 4.5.
    let x: Vec<f64> = (0..=50).map(|i| i as f64 * 0.1).collect();
    let mfx = trapmf(&x, [2.0, 2.5, 3.0, 4.5])?;

    for method in [
        DefuzzMethod::Centroid,
        DefuzzMethod::Bisector,
        DefuzzMethod::MeanOfMaximum,
        DefuzzMethod::SmallestOfMaximum,
        DefuzzMethod::LargestOfMaximum,
    ] {
        let value = defuzz(&x, &mfx, method)?;
        let height = interp_membership(&x, &mfx, value)?;
        println!("{:<8} x = {value:.4}  mu(x) = {height:.4}", method.to_string());
    }

    Ok(())
}
