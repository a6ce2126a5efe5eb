//! Z-score normalization of metric sample sequences.

/// Z-score a sequence of equal-dimension samples, per dimension.
///
/// A dimension with zero standard deviation is centred but left unscaled
/// (its deviation is treated as 1). Callers filter nulls first; an empty
/// input yields an empty output.
pub fn zscore(samples: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if samples.is_empty() {
        return Vec::new();
    }

    let dims = samples[0].len();
    let n = samples.len() as f64;

    let mut mean = vec![0.0; dims];
    for sample in samples {
        for (d, value) in sample.iter().enumerate() {
            mean[d] += value;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut deviation = vec![0.0; dims];
    for sample in samples {
        for (d, value) in sample.iter().enumerate() {
            deviation[d] += (value - mean[d]).powi(2);
        }
    }
    for s in &mut deviation {
        *s = (*s / n).sqrt();
        if *s == 0.0 {
            *s = 1.0;
        }
    }

    samples
        .iter()
        .map(|sample| {
            sample
                .iter()
                .enumerate()
                .map(|(d, value)| (value - mean[d]) / deviation[d])
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zscore_scalar_sequence() {
        let samples: Vec<Vec<f64>> = vec![vec![2.0], vec![4.0], vec![4.0], vec![4.0], vec![5.0], vec![5.0], vec![7.0], vec![9.0]];
        let normalized = zscore(&samples);

        // Known population stats: mean 5, std 2.
        assert!((normalized[0][0] + 1.5).abs() < 1e-12);
        assert!((normalized[7][0] - 2.0).abs() < 1e-12);

        let sum: f64 = normalized.iter().map(|s| s[0]).sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn test_zscore_constant_dimension_has_no_nan() {
        let samples = vec![vec![3.0, 1.0], vec![3.0, 2.0], vec![3.0, 3.0]];
        let normalized = zscore(&samples);

        for sample in &normalized {
            assert!(sample.iter().all(|v| v.is_finite()));
        }
        // Constant dimension centres to zero.
        assert!(normalized.iter().all(|s| s[0] == 0.0));
    }

    #[test]
    fn test_zscore_empty_input() {
        assert!(zscore(&[]).is_empty());
    }

    #[test]
    fn test_zscore_per_dimension_independence() {
        let samples = vec![vec![0.0, 100.0], vec![1.0, 200.0], vec![2.0, 300.0]];
        let normalized = zscore(&samples);

        // Both dimensions end up on the same scale.
        for d in 0..2 {
            assert!((normalized[0][d] - normalized[0][0]).abs() < 1e-12);
            assert!((normalized[2][d] - normalized[2][0]).abs() < 1e-12);
        }
    }
}
