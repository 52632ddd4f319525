use ndarray::{Array2, ArrayView1};

use crate::error::{DataError, Result};

/// One-hot encode a sequence of integer class labels.
///
/// # Arguments
///
/// * `seq` - Class labels, one per output row.
/// * `dimension` - Output width. When `None` (or `Some(0)`) the width is
///   `max(seq) + 1`.
///
/// # Returns
///
/// A `seq.len() x width` matrix of `0.0`/`1.0` with exactly one `1.0` per row,
/// at the column given by the label.
///
/// # Errors
///
/// * `DataError::EmptyInput` if `seq` is empty and no width was given.
/// * `DataError::LabelOutOfRange` if any label is `>= width`.
pub fn to_one_hot_enc(seq: &[usize], dimension: Option<usize>) -> Result<Array2<f32>> {
    let width = match dimension.filter(|&d| d > 0) {
        Some(d) => d,
        None => match seq.iter().max() {
            Some(&max) => max + 1,
            None => return Err(DataError::EmptyInput("label sequence")),
        },
    };

    let mut encoded = Array2::<f32>::zeros((seq.len(), width));
    for (row, &label) in seq.iter().enumerate() {
        if label >= width {
            return Err(DataError::LabelOutOfRange {
                label,
                dimension: width,
            });
        }
        encoded[(row, label)] = 1.0;
    }
    Ok(encoded)
}

/// Index of the first maximum in `row`. NaNs are skipped.
pub fn argmax(row: ArrayView1<f32>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in row.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Class index for every row of a one-hot (or score) matrix.
pub fn decode_one_hot(labels: &Array2<f32>) -> Vec<Option<usize>> {
    labels.rows().into_iter().map(argmax).collect()
}
