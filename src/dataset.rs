//! Dataset containers and accessors.
//!
//! Different dataset sources name their arrays differently: image datasets
//! expose `images`/`labels`, tabular ones `data`/`target`. [`get_data`] and
//! [`get_targets`] probe the [`DatasetSource`] accessors in that order.
use std::path::Path;

use anyhow::{anyhow, Context};
use csv::StringRecord;
use ndarray::{Array2, ArrayViewD};

use crate::encoding::to_one_hot_enc;
use crate::error::{DataError, Result};

/// Accessors a dataset may provide. Unimplemented ones report `None`.
pub trait DatasetSource {
    fn name(&self) -> &str {
        "dataset"
    }

    fn images(&self) -> Option<ArrayViewD<'_, f32>> {
        None
    }

    fn data(&self) -> Option<ArrayViewD<'_, f32>> {
        None
    }

    fn labels(&self) -> Option<ArrayViewD<'_, f32>> {
        None
    }

    fn target(&self) -> Option<ArrayViewD<'_, f32>> {
        None
    }
}

/// Inputs of a dataset: `images` if present, else `data`.
pub fn get_data<S: DatasetSource + ?Sized>(d_set: &S) -> Result<ArrayViewD<'_, f32>> {
    d_set
        .images()
        .or_else(|| d_set.data())
        .ok_or_else(|| DataError::MissingField(format!("{} has neither images nor data", d_set.name())))
}

/// Labels of a dataset: `labels` if present, else `target`.
pub fn get_targets<S: DatasetSource + ?Sized>(d_set: &S) -> Result<ArrayViewD<'_, f32>> {
    d_set
        .labels()
        .or_else(|| d_set.target())
        .ok_or_else(|| DataError::MissingField(format!("{} has neither labels nor target", d_set.name())))
}

/// Tabular dataset: a feature matrix and one-hot targets, row-aligned.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub data: Array2<f32>,
    pub target: Array2<f32>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(name: &str, data: Array2<f32>, target: Array2<f32>) -> Result<Self> {
        if data.nrows() != target.nrows() {
            return Err(DataError::ShapeMismatch {
                context: "dataset rows (data vs target)",
                expected: data.nrows(),
                found: target.nrows(),
            });
        }
        let feature_names = (0..data.ncols()).map(|i| format!("f{}", i)).collect();
        Ok(Self {
            name: name.to_string(),
            data,
            target,
            feature_names,
        })
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_classes(&self) -> usize {
        self.target.ncols()
    }

    /// Rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            name: self.name.clone(),
            data: self.data.select(ndarray::Axis(0), indices),
            target: self.target.select(ndarray::Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }
}

impl DatasetSource for Dataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn data(&self) -> Option<ArrayViewD<'_, f32>> {
        Some(self.data.view().into_dyn())
    }

    fn target(&self) -> Option<ArrayViewD<'_, f32>> {
        Some(self.target.view().into_dyn())
    }
}

/// Load a headered CSV (or TSV, by extension) with an integer class column.
///
/// Every column other than `label_column` is parsed as an `f32` feature.
/// Labels are one-hot encoded to `n_classes` columns, or `max(label) + 1`
/// when `n_classes` is `None`.
pub fn read_labeled_csv<P: AsRef<Path>>(
    path: P,
    label_column: &str,
    n_classes: Option<usize>,
) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read dataset header row")?
        .clone();
    let label_idx = find_column(&headers, label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", label_column))?;
    let feature_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != label_idx).collect();

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid label at row {}", row_idx + 1))?;
        labels.push(label);

        for &i in &feature_idx {
            let value = record
                .get(i)
                .ok_or_else(|| anyhow!("Missing value in column {} at row {}", i, row_idx + 1))?
                .trim()
                .parse::<f32>()
                .with_context(|| {
                    format!("Invalid value for '{}' at row {}", &headers[i], row_idx + 1)
                })?;
            features.push(value);
        }
    }

    if labels.is_empty() {
        return Err(anyhow!("Dataset file {} has no rows", path.display()));
    }

    let data = Array2::from_shape_vec((labels.len(), feature_idx.len()), features)
        .context("Feature matrix shape mismatch")?;
    let target = to_one_hot_enc(&labels, n_classes)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");

    let mut dataset = Dataset::new(name, data, target)?;
    dataset.feature_names = feature_idx.iter().map(|&i| headers[i].to_string()).collect();
    log::debug!(
        "Loaded {} rows, {} features, {} classes from {}",
        dataset.len(),
        dataset.feature_names.len(),
        dataset.n_classes(),
        path.display()
    );
    Ok(dataset)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    struct ImageSet {
        images: ndarray::Array3<f32>,
        labels: Array2<f32>,
    }

    impl DatasetSource for ImageSet {
        fn images(&self) -> Option<ArrayViewD<'_, f32>> {
            Some(self.images.view().into_dyn())
        }

        fn labels(&self) -> Option<ArrayViewD<'_, f32>> {
            Some(self.labels.view().into_dyn())
        }
    }

    #[test]
    fn test_images_take_precedence() {
        let ds = ImageSet {
            images: ndarray::Array3::zeros((2, 3, 3)),
            labels: array![[1.0, 0.0], [0.0, 1.0]],
        };
        assert_eq!(get_data(&ds).unwrap().shape(), &[2, 3, 3]);
        assert_eq!(get_targets(&ds).unwrap().shape(), &[2, 2]);
    }

    #[test]
    fn test_new_rejects_row_mismatch() {
        let res = Dataset::new("bad", Array2::zeros((3, 2)), Array2::zeros((2, 2)));
        assert!(res.is_err());
    }
}
