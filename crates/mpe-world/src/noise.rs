//! Gaussian noise for action and communication perturbation.

use rand::Rng;

/// Draw a standard normal sample with the Box-Muller transform.
pub fn standard_normal<R: Rng>(rng: &mut R) -> f32 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    ((-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()) as f32
}

/// `v + sigma * N(0, 1)` per component, or `v` unchanged without a sigma.
pub fn perturb<R: Rng>(rng: &mut R, v: &[f32], sigma: Option<f32>) -> Vec<f32> {
    match sigma {
        Some(s) => v.iter().map(|&x| x + s * standard_normal(rng)).collect(),
        None => v.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn samples_have_roughly_unit_variance() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 20_000;
        let samples: Vec<f32> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f32>() / n as f32;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.05, "mean={mean}");
        assert!((var - 1.0).abs() < 0.05, "var={var}");
    }

    #[test]
    fn perturb_without_sigma_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(perturb(&mut rng, &[1.0, 2.0], None), vec![1.0, 2.0]);
    }

    #[test]
    fn same_seed_same_noise() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            perturb(&mut a, &[0.0; 4], Some(0.1)),
            perturb(&mut b, &[0.0; 4], Some(0.1))
        );
    }
}
