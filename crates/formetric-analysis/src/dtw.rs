//! Dynamic-time-warping alignment between metric sequences.

use ndarray::Array2;

use crate::normalize::zscore;

/// Minimum valid samples required on both sides for a meaningful alignment.
pub const MIN_ALIGNMENT_SAMPLES: usize = 10;

/// Normalized DTW distance between two null-filtered sample sequences.
///
/// Under-sampled operands (fewer than [`MIN_ALIGNMENT_SAMPLES`] valid
/// samples on either side) score a neutral 0.0 rather than failing. Both
/// sequences are z-normalized before alignment, so 0.0 means identical
/// shape regardless of tempo. The result is non-negative and unbounded
/// above.
pub fn alignment_distance(reference: &[Vec<f64>], user: &[Vec<f64>]) -> f64 {
    if reference.len() < MIN_ALIGNMENT_SAMPLES || user.len() < MIN_ALIGNMENT_SAMPLES {
        return 0.0;
    }

    let reference = zscore(reference);
    let user = zscore(user);
    normalized_dtw(&reference, &user)
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Cumulative-cost DTW with the standard monotonic recurrence.
///
/// Returns the total optimal-path cost divided by the warping-path
/// length. No banding or windowing constraint is applied; the sequences
/// may differ in length.
fn normalized_dtw(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    let (n, m) = (a.len(), b.len());

    let mut acc = Array2::<f64>::from_elem((n + 1, m + 1), f64::INFINITY);
    acc[[0, 0]] = 0.0;

    for i in 1..=n {
        for j in 1..=m {
            let cost = euclidean(&a[i - 1], &b[j - 1]);
            let best = acc[[i - 1, j - 1]]
                .min(acc[[i - 1, j]])
                .min(acc[[i, j - 1]]);
            acc[[i, j]] = cost + best;
        }
    }

    acc[[n, m]] / warping_path_length(&acc, n, m) as f64
}

/// Backtrack the optimal alignment to recover the path length.
fn warping_path_length(acc: &Array2<f64>, n: usize, m: usize) -> usize {
    let (mut i, mut j) = (n, m);
    let mut len = 1usize;

    while i > 1 || j > 1 {
        let diagonal = acc[[i - 1, j - 1]];
        let above = acc[[i - 1, j]];
        let left = acc[[i, j - 1]];

        if diagonal <= above && diagonal <= left {
            i -= 1;
            j -= 1;
        } else if above <= left {
            i -= 1;
        } else {
            j -= 1;
        }
        len += 1;
    }

    len
}
