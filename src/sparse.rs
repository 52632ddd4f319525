//! Compressed sparse row and coordinate matrices, and their conversion to a
//! coordinate-list tensor layout (`indices`, `values`, `dense_shape`).
use ndarray::{Array1, Array2};

use crate::error::{DataError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f32>,
}

impl CsrMatrix {
    /// Build a CSR matrix, checking that the three buffers describe `shape`.
    pub fn try_new(
        shape: (usize, usize),
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f32>,
    ) -> Result<Self> {
        let (rows, cols) = shape;
        if indptr.len() != rows + 1 {
            return Err(DataError::ShapeMismatch {
                context: "CSR indptr length",
                expected: rows + 1,
                found: indptr.len(),
            });
        }
        if indices.len() != data.len() {
            return Err(DataError::ShapeMismatch {
                context: "CSR indices vs data length",
                expected: data.len(),
                found: indices.len(),
            });
        }
        if indptr[0] != 0 || indptr[rows] != data.len() {
            return Err(DataError::ShapeMismatch {
                context: "CSR indptr end",
                expected: data.len(),
                found: indptr[rows],
            });
        }
        if indptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(DataError::ShapeMismatch {
                context: "CSR indptr must be non-decreasing",
                expected: 0,
                found: 1,
            });
        }
        if let Some(&bad) = indices.iter().find(|&&c| c >= cols) {
            return Err(DataError::ShapeMismatch {
                context: "CSR column index",
                expected: cols,
                found: bad,
            });
        }
        Ok(Self {
            shape,
            indptr,
            indices,
            data,
        })
    }

    /// Keep the non-zero entries of a dense matrix.
    pub fn from_dense(dense: &Array2<f32>) -> Self {
        let (rows, cols) = dense.dim();
        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for row in dense.rows() {
            for (col, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    indices.push(col);
                    data.push(v);
                }
            }
            indptr.push(data.len());
        }
        Self {
            shape: (rows, cols),
            indptr,
            indices,
            data,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn nrows(&self) -> usize {
        self.shape.0
    }

    pub fn ncols(&self) -> usize {
        self.shape.1
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.indptr[row]..self.indptr[row + 1]
    }

    pub fn to_dense(&self) -> Array2<f32> {
        let mut out = Array2::<f32>::zeros(self.shape);
        for row in 0..self.nrows() {
            for k in self.row_range(row) {
                out[(row, self.indices[k])] += self.data[k];
            }
        }
        out
    }

    /// Expand to coordinate form, entries ordered row by row.
    pub fn to_coo(&self) -> CooMatrix {
        let mut row_idx = Vec::with_capacity(self.nnz());
        for row in 0..self.nrows() {
            row_idx.extend(std::iter::repeat(row).take(self.row_range(row).len()));
        }
        CooMatrix {
            shape: self.shape,
            row: row_idx,
            col: self.indices.clone(),
            data: self.data.clone(),
        }
    }

    /// Stack CSR matrices on top of each other.
    pub fn vstack(blocks: &[CsrMatrix]) -> Result<CsrMatrix> {
        let first = blocks.first().ok_or(DataError::EmptyInput("matrices to stack"))?;
        let cols = first.ncols();

        let mut indptr = vec![0usize];
        let mut indices = Vec::new();
        let mut data = Vec::new();
        let mut rows = 0;
        for block in blocks {
            if block.ncols() != cols {
                return Err(DataError::ShapeMismatch {
                    context: "vstack column count",
                    expected: cols,
                    found: block.ncols(),
                });
            }
            let offset = data.len();
            indptr.extend(block.indptr[1..].iter().map(|&p| p + offset));
            indices.extend_from_slice(&block.indices);
            data.extend_from_slice(&block.data);
            rows += block.nrows();
        }
        Ok(CsrMatrix {
            shape: (rows, cols),
            indptr,
            indices,
            data,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CooMatrix {
    shape: (usize, usize),
    row: Vec<usize>,
    col: Vec<usize>,
    data: Vec<f32>,
}

impl CooMatrix {
    pub fn try_new(
        shape: (usize, usize),
        row: Vec<usize>,
        col: Vec<usize>,
        data: Vec<f32>,
    ) -> Result<Self> {
        if row.len() != data.len() || col.len() != data.len() {
            return Err(DataError::ShapeMismatch {
                context: "COO row/col/data length",
                expected: data.len(),
                found: row.len().max(col.len()),
            });
        }
        if let Some(&bad) = row.iter().find(|&&r| r >= shape.0) {
            return Err(DataError::ShapeMismatch {
                context: "COO row index",
                expected: shape.0,
                found: bad,
            });
        }
        if let Some(&bad) = col.iter().find(|&&c| c >= shape.1) {
            return Err(DataError::ShapeMismatch {
                context: "COO column index",
                expected: shape.1,
                found: bad,
            });
        }
        Ok(Self {
            shape,
            row,
            col,
            data,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn row(&self) -> &[usize] {
        &self.row
    }

    pub fn col(&self) -> &[usize] {
        &self.col
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Duplicate coordinates are summed.
    pub fn to_dense(&self) -> Array2<f32> {
        let mut out = Array2::<f32>::zeros(self.shape);
        for ((&r, &c), &v) in self.row.iter().zip(&self.col).zip(&self.data) {
            out[(r, c)] += v;
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SparseMatrix {
    Csr(CsrMatrix),
    Coo(CooMatrix),
}

impl From<CsrMatrix> for SparseMatrix {
    fn from(m: CsrMatrix) -> Self {
        SparseMatrix::Csr(m)
    }
}

impl From<CooMatrix> for SparseMatrix {
    fn from(m: CooMatrix) -> Self {
        SparseMatrix::Coo(m)
    }
}

/// Coordinate-list tensor: `indices` is `nnz x 2` of `(row, col)` pairs.
///
/// Every index pair lies inside `dense_shape`.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseTensor {
    indices: Array2<i64>,
    values: Array1<f32>,
    dense_shape: [i64; 2],
}

impl SparseTensor {
    /// Build a tensor, checking that every index pair fits in `dense_shape`.
    pub fn try_new(
        indices: Array2<i64>,
        values: Array1<f32>,
        dense_shape: [i64; 2],
    ) -> Result<Self> {
        if indices.ncols() != 2 {
            return Err(DataError::ShapeMismatch {
                context: "sparse tensor index width",
                expected: 2,
                found: indices.ncols(),
            });
        }
        if indices.nrows() != values.len() {
            return Err(DataError::ShapeMismatch {
                context: "sparse tensor indices vs values length",
                expected: values.len(),
                found: indices.nrows(),
            });
        }
        for (axis, &extent) in dense_shape.iter().enumerate() {
            if extent < 0 {
                return Err(DataError::ShapeMismatch {
                    context: "sparse tensor dense_shape axis is negative",
                    expected: 0,
                    found: axis,
                });
            }
            for &i in indices.column(axis).iter() {
                if i < 0 {
                    return Err(DataError::ShapeMismatch {
                        context: "sparse tensor index is negative, magnitude",
                        expected: 0,
                        found: i.unsigned_abs() as usize,
                    });
                }
                if i >= extent {
                    return Err(DataError::ShapeMismatch {
                        context: "sparse tensor index out of bounds",
                        expected: extent as usize,
                        found: i as usize,
                    });
                }
            }
        }
        Ok(Self {
            indices,
            values,
            dense_shape,
        })
    }

    pub fn indices(&self) -> &Array2<i64> {
        &self.indices
    }

    pub fn values(&self) -> &Array1<f32> {
        &self.values
    }

    pub fn dense_shape(&self) -> [i64; 2] {
        self.dense_shape
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn to_dense(&self) -> Array2<f32> {
        let shape = (self.dense_shape[0] as usize, self.dense_shape[1] as usize);
        let mut out = Array2::<f32>::zeros(shape);
        for (pair, &v) in self.indices.rows().into_iter().zip(self.values.iter()) {
            out[(pair[0] as usize, pair[1] as usize)] += v;
        }
        out
    }
}

/// Convert a CSR or COO matrix into a [`SparseTensor`].
///
/// CSR input is first expanded to COO so entries come out in row-major order;
/// COO input keeps its stored order.
pub fn convert_sparse_matrix_to_sparse_tensor(x: &SparseMatrix) -> SparseTensor {
    let owned;
    let coo = match x {
        SparseMatrix::Csr(csr) => {
            owned = csr.to_coo();
            &owned
        }
        SparseMatrix::Coo(coo) => coo,
    };

    let mut indices = Array2::<i64>::zeros((coo.nnz(), 2));
    for (k, (&r, &c)) in coo.row.iter().zip(&coo.col).enumerate() {
        indices[(k, 0)] = r as i64;
        indices[(k, 1)] = c as i64;
    }

    SparseTensor {
        indices,
        values: Array1::from_vec(coo.data.clone()),
        dense_shape: [coo.shape.0 as i64, coo.shape.1 as i64],
    }
}
