use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Stratified train/test split over sample indices.
///
/// Each class contributes `round(n * test_fraction)` samples to the test side, but always
/// keeps at least one sample for training. Output indices are sorted.
pub fn stratified_split(labels: &[usize], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for (_, mut indices) in by_class {
        indices.shuffle(&mut rng);
        let n = indices.len();
        let n_test = ((n as f64 * test_fraction).round() as usize).min(n.saturating_sub(1));
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}
