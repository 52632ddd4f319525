//! Concatenation and stacking that work for both dense and sparse data.
use ndarray::{concatenate, Array, Array2, ArrayD, ArrayView, ArrayViewD, Axis, IxDyn, RemoveAxis};

use crate::error::{DataError, Result};
use crate::sparse::CsrMatrix;

/// Repeat `example` `size` times along its first axis.
///
/// # Errors
///
/// `DataError::EmptyInput` when `size == 0`.
pub fn pad<A, D>(example: ArrayView<A, D>, size: usize) -> Result<Array<A, D>>
where
    A: Clone,
    D: RemoveAxis,
{
    if size == 0 {
        return Err(DataError::EmptyInput("pad size"));
    }
    let copies = vec![example; size];
    Ok(concatenate(Axis(0), &copies)?)
}

/// Concatenate 1-D arrays end to end, or stack anything else row-wise.
///
/// The first array decides: if it is 1-D the result is 1-D. Otherwise every
/// array is lifted to at least two dimensions (a scalar becomes `1 x 1`, a
/// 1-D array a single row) and all are joined along axis 0, so trailing
/// dimensions must agree.
pub fn stack_or_concat<A: Clone>(arrays: &[ArrayViewD<A>]) -> Result<ArrayD<A>> {
    let first = arrays.first().ok_or(DataError::EmptyInput("arrays to stack"))?;

    let pieces: Vec<ArrayViewD<A>> = if first.ndim() == 1 {
        arrays.to_vec()
    } else {
        arrays
            .iter()
            .map(|a| match a.ndim() {
                0 => a.clone().into_shape(IxDyn(&[1, 1])).map_err(DataError::from),
                1 => Ok(a.clone().insert_axis(Axis(0))),
                _ => Ok(a.clone()),
            })
            .collect::<Result<_>>()?
    };

    let reference = &pieces[0];
    for piece in &pieces[1..] {
        if piece.ndim() != reference.ndim() {
            return Err(DataError::ShapeMismatch {
                context: "stack dimensionality",
                expected: reference.ndim(),
                found: piece.ndim(),
            });
        }
        for (axis, (&want, &got)) in reference.shape().iter().zip(piece.shape()).enumerate() {
            if axis > 0 && want != got {
                return Err(DataError::ShapeMismatch {
                    context: "stack trailing dimension",
                    expected: want,
                    found: got,
                });
            }
        }
    }

    Ok(concatenate(Axis(0), &pieces)?)
}

/// A 2-D block that is either dense or CSR-sparse.
#[derive(Clone, Debug, PartialEq)]
pub enum Matrix {
    Dense(Array2<f32>),
    Sparse(CsrMatrix),
}

impl Matrix {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Matrix::Dense(d) => d.dim(),
            Matrix::Sparse(s) => s.shape(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Matrix::Sparse(_))
    }

    pub fn to_dense(&self) -> Array2<f32> {
        match self {
            Matrix::Dense(d) => d.clone(),
            Matrix::Sparse(s) => s.to_dense(),
        }
    }

    pub fn to_csr(&self) -> CsrMatrix {
        match self {
            Matrix::Dense(d) => CsrMatrix::from_dense(d),
            Matrix::Sparse(s) => s.clone(),
        }
    }
}

impl From<Array2<f32>> for Matrix {
    fn from(m: Array2<f32>) -> Self {
        Matrix::Dense(m)
    }
}

impl From<CsrMatrix> for Matrix {
    fn from(m: CsrMatrix) -> Self {
        Matrix::Sparse(m)
    }
}

/// Vertical stack that respects sparsity.
///
/// If the first block is sparse the result is CSR and dense blocks are
/// compressed; otherwise the result is dense and sparse blocks are expanded.
pub fn vstack(blocks: &[Matrix]) -> Result<Matrix> {
    let first = blocks.first().ok_or(DataError::EmptyInput("matrices to stack"))?;
    let cols = first.shape().1;
    if let Some(bad) = blocks.iter().find(|b| b.shape().1 != cols) {
        return Err(DataError::ShapeMismatch {
            context: "vstack column count",
            expected: cols,
            found: bad.shape().1,
        });
    }

    if first.is_sparse() {
        let csr: Vec<CsrMatrix> = blocks.iter().map(Matrix::to_csr).collect();
        Ok(Matrix::Sparse(CsrMatrix::vstack(&csr)?))
    } else {
        let dense: Vec<Array2<f32>> = blocks.iter().map(Matrix::to_dense).collect();
        let views: Vec<_> = dense.iter().map(|d| d.view()).collect();
        Ok(Matrix::Dense(concatenate(Axis(0), &views)?))
    }
}
