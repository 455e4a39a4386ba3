use fuzzy_cmeans::FuzzyCMeans;
use ndarray::Array2;
use rand::prelude::*;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=fuzzy_cmeans=debug shows one line per fit.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three blobs, 200 points each, stored one sample per column.
    let centers = [[4.0, 2.0], [1.0, 7.0], [5.0, 6.0]];
    let sigmas = [[0.8, 0.3], [0.3, 0.5], [1.1, 0.7]];
    let per_blob = 200;

    let mut rng = StdRng::seed_from_u64(42);
    let unit = Normal::new(0.0, 1.0)?;
    let mut data = Array2::<f64>::zeros((2, per_blob * centers.len()));
    for (b, (mu, sigma)) in centers.iter().zip(sigmas.iter()).enumerate() {
        for i in 0..per_blob {
            for d in 0..2 {
                data[[d, b * per_blob + i]] = mu[d] + sigma[d] * unit.sample(&mut rng);
            }
        }
    }

    // We pretend not to know k: the fuzzy partition coefficient should peak
    // at 3. k = 1 is skipped, it always scores 1.
    println!("k  fpc     iterations");
    for k in 2..=9 {
        let fit = FuzzyCMeans::new(k)
            .with_error(0.005)
            .with_max_iter(1000)
            .with_seed(k as u64)
            .fit(data.view())?;
        println!(
            "{k}  {:.4}  {}",
            fit.partition.fpc, fit.partition.iterations
        );
    }

    // Keep a 3-cluster model and classify uniform points on [0, 10]².
    let model = FuzzyCMeans::new(3).with_seed(3);
    let fit = model.fit(data.view())?;
    for (k, c) in fit.centers.rows().into_iter().enumerate() {
        println!("center {k}: ({:.2}, {:.2})", c[0], c[1]);
    }

    let new = Array2::from_shape_simple_fn((2, 100), || rng.random::<f64>() * 10.0);
    let pred = model.predict(new.view(), fit.centers.view())?;

    // Hardened for display; the full fuzzy result is `pred.membership`.
    let mut counts = vec![0usize; 3];
    for label in pred.hard_labels() {
        counts[label] += 1;
    }
    println!("new points per cluster: {counts:?} (fpc {:.4})", pred.fpc);

    Ok(())
}
