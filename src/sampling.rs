//! Class-balanced index sampling over one-hot labelled datasets.
//!
//! Episodes for few-shot training need the same number of examples from
//! every class. [`get_indices_balanced_classes`] walks the classes in order
//! (0, 1, .., C-1, 0, ..) and rejection-samples a fresh row of the current
//! class for each slot.
use std::collections::HashSet;

use ndarray::ArrayView2;
use rand::Rng;

use crate::config::SamplingConfig;
use crate::encoding::argmax;
use crate::error::{DataError, Result};
use crate::random::get_rand_state;

/// Draw `n_examples` distinct row indices, cycling evenly through the classes.
///
/// # Arguments
///
/// * `n_examples` - Number of indices to return.
/// * `labels` - One-hot labels, one row per example. The class of a row is its
///   argmax.
/// * `forbidden_indices` - Rows that must not be returned.
/// * `rng` - Source of randomness.
///
/// # Returns
///
/// Indices in draw order; the class of the k-th index is `k % n_classes`.
///
/// # Errors
///
/// * `DataError::EmptyInput` if `labels` has no rows or no columns and
///   `n_examples > 0`.
/// * `DataError::InfeasibleSampling` if some class has fewer eligible rows than
///   the number of slots it must fill.
pub fn get_indices_balanced_classes<R: Rng + ?Sized>(
    n_examples: usize,
    labels: ArrayView2<f32>,
    forbidden_indices: &[usize],
    rng: &mut R,
) -> Result<Vec<usize>> {
    if n_examples == 0 {
        return Ok(Vec::new());
    }
    let (n_rows, n_classes) = labels.dim();
    if n_rows == 0 {
        return Err(DataError::EmptyInput("labels"));
    }
    if n_classes == 0 {
        return Err(DataError::EmptyInput("label columns"));
    }

    let forbidden: HashSet<usize> = forbidden_indices.iter().copied().collect();
    let row_class: Vec<Option<usize>> = labels.rows().into_iter().map(argmax).collect();

    // Rejection sampling never terminates if a class runs dry, so check up front.
    let mut eligible = vec![0usize; n_classes];
    for (i, class) in row_class.iter().enumerate() {
        if let Some(c) = class {
            if !forbidden.contains(&i) {
                eligible[*c] += 1;
            }
        }
    }
    for (class, &available) in eligible.iter().enumerate() {
        let needed = n_examples / n_classes + usize::from(class < n_examples % n_classes);
        if needed > available {
            return Err(DataError::InfeasibleSampling {
                class,
                needed,
                available,
            });
        }
    }

    let mut indices = Vec::with_capacity(n_examples);
    let mut chosen = HashSet::with_capacity(n_examples);
    let mut current_class = 0;
    let mut draws = 0usize;
    for _ in 0..n_examples {
        let mut index = rng.gen_range(0..n_rows);
        draws += 1;
        while chosen.contains(&index)
            || forbidden.contains(&index)
            || row_class[index] != Some(current_class)
        {
            index = rng.gen_range(0..n_rows);
            draws += 1;
        }
        chosen.insert(index);
        indices.push(index);
        current_class = (current_class + 1) % n_classes;
    }

    log::debug!(
        "Sampled {} balanced indices over {} classes in {} draws",
        n_examples,
        n_classes,
        draws
    );
    Ok(indices)
}

/// Run [`get_indices_balanced_classes`] with the seed and exclusions from `config`.
pub fn sample_with_config(
    labels: ArrayView2<f32>,
    config: &SamplingConfig,
) -> Result<Vec<usize>> {
    let mut rng = get_rand_state(config.random_state())?;
    get_indices_balanced_classes(
        config.n_examples,
        labels,
        &config.forbidden_indices,
        &mut rng,
    )
}

/// Number of rows per class, where a row's class is its argmax.
pub fn class_counts(labels: ArrayView2<f32>) -> Vec<usize> {
    let mut counts = vec![0usize; labels.ncols()];
    for row in labels.rows() {
        if let Some(c) = argmax(row) {
            counts[c] += 1;
        }
    }
    counts
}

/// Log the per-class example counts of a labelled dataset.
pub fn log_class_balance(labels: ArrayView2<f32>) -> Vec<usize> {
    let counts = class_counts(labels);
    if counts.iter().any(|&c| c == 0) {
        log::warn!("Some classes have no examples: {:?}", counts);
    }
    log::info!("Examples by class: {:?}", counts);
    counts
}
