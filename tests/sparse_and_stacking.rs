//! Integration tests for sparse matrices, sparse tensors and stacking helpers.

use meta_datasets::sparse::{
    convert_sparse_matrix_to_sparse_tensor, CooMatrix, CsrMatrix, SparseMatrix, SparseTensor,
};
use meta_datasets::stacking::{pad, stack_or_concat, vstack, Matrix};
use meta_datasets::DataError;
use ndarray::{arr0, array, Array1, Array2};

fn sample_dense() -> Array2<f32> {
    array![[1.0, 0.0, 0.0], [0.0, 0.0, 2.5], [0.0, 3.0, 4.0]]
}

// ---------------------------------------------------------------------------
// CSR / COO
// ---------------------------------------------------------------------------

#[test]
fn csr_from_dense_keeps_nonzeros() {
    let csr = CsrMatrix::from_dense(&sample_dense());
    assert_eq!(csr.shape(), (3, 3));
    assert_eq!(csr.nnz(), 4);
    assert_eq!(csr.indptr(), &[0, 1, 2, 4]);
    assert_eq!(csr.to_dense(), sample_dense());
}

#[test]
fn coo_try_new_validates_lengths() {
    assert!(CooMatrix::try_new((2, 2), vec![0], vec![0, 1], vec![1.0]).is_err());
    assert!(CooMatrix::try_new((2, 2), vec![2], vec![0], vec![1.0]).is_err());
    assert!(CooMatrix::try_new((2, 2), vec![1], vec![0], vec![1.0]).is_ok());
}

// ---------------------------------------------------------------------------
// convert_sparse_matrix_to_sparse_tensor
// ---------------------------------------------------------------------------

#[test]
fn csr_converts_to_row_major_tensor() {
    let csr = CsrMatrix::from_dense(&sample_dense());
    let tensor = convert_sparse_matrix_to_sparse_tensor(&SparseMatrix::from(csr));

    assert_eq!(tensor.dense_shape(), [3, 3]);
    assert_eq!(tensor.nnz(), 4);
    assert_eq!(tensor.indices(), &array![[0i64, 0], [1, 2], [2, 1], [2, 2]]);
    assert_eq!(tensor.values().to_vec(), vec![1.0f32, 2.5, 3.0, 4.0]);
    assert_eq!(tensor.to_dense(), sample_dense());
}

#[test]
fn coo_keeps_stored_order() {
    let coo = CooMatrix::try_new((2, 4), vec![1, 0], vec![3, 2], vec![7.0, 8.0]).unwrap();
    let tensor = convert_sparse_matrix_to_sparse_tensor(&SparseMatrix::Coo(coo.clone()));

    assert_eq!(tensor.indices(), &array![[1i64, 3], [0, 2]]);
    assert_eq!(tensor.values().to_vec(), vec![7.0f32, 8.0]);
    assert_eq!(tensor.dense_shape(), [2, 4]);
    assert_eq!(tensor.to_dense(), coo.to_dense());
}

#[test]
fn empty_sparse_matrix_converts() {
    let csr = CsrMatrix::from_dense(&Array2::zeros((2, 5)));
    let tensor = convert_sparse_matrix_to_sparse_tensor(&csr.into());
    assert_eq!(tensor.nnz(), 0);
    assert_eq!(tensor.indices().dim(), (0, 2));
    assert_eq!(tensor.dense_shape(), [2, 5]);
}

#[test]
fn sparse_tensor_try_new_accepts_in_bounds_indices() {
    let tensor = SparseTensor::try_new(
        array![[0i64, 1], [1, 0]],
        Array1::from_vec(vec![2.0f32, 3.0]),
        [2, 2],
    )
    .unwrap();
    assert_eq!(tensor.to_dense(), array![[0.0f32, 2.0], [3.0, 0.0]]);
}

#[test]
fn sparse_tensor_try_new_rejects_bad_indices() {
    let values = Array1::from_vec(vec![1.0f32]);
    let negative = SparseTensor::try_new(array![[-1i64, 0]], values.clone(), [2, 2]);
    assert!(matches!(negative, Err(DataError::ShapeMismatch { .. })));

    let too_large = SparseTensor::try_new(array![[0i64, 2]], values.clone(), [2, 2]);
    assert!(matches!(too_large, Err(DataError::ShapeMismatch { .. })));

    let bad_shape = SparseTensor::try_new(array![[0i64, 0]], values.clone(), [-1, 2]);
    assert!(bad_shape.is_err());

    let wrong_len = SparseTensor::try_new(array![[0i64, 0], [1, 1]], values, [2, 2]);
    assert!(wrong_len.is_err());
}

// ---------------------------------------------------------------------------
// vstack
// ---------------------------------------------------------------------------

#[test]
fn vstack_dense_first_gives_dense() {
    let top = Matrix::Dense(array![[1.0, 2.0]]);
    let bottom = Matrix::Sparse(CsrMatrix::from_dense(&array![[0.0, 5.0], [6.0, 0.0]]));
    let stacked = vstack(&[top, bottom]).unwrap();

    assert!(!stacked.is_sparse());
    assert_eq!(stacked.to_dense(), array![[1.0f32, 2.0], [0.0, 5.0], [6.0, 0.0]]);
}

#[test]
fn vstack_sparse_first_gives_sparse() {
    let top = Matrix::Sparse(CsrMatrix::from_dense(&sample_dense()));
    let bottom = Matrix::Dense(array![[0.0, 9.0, 0.0]]);
    let stacked = vstack(&[top, bottom]).unwrap();

    assert!(stacked.is_sparse());
    assert_eq!(stacked.shape(), (4, 3));
    let expected: Array2<f32> = array![
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 2.5],
        [0.0, 3.0, 4.0],
        [0.0, 9.0, 0.0]
    ];
    assert_eq!(stacked.to_dense(), expected);
    if let Matrix::Sparse(csr) = stacked {
        assert_eq!(csr.indptr(), &[0, 1, 2, 4, 5]);
    }
}

#[test]
fn vstack_column_mismatch_errors() {
    let a = Matrix::Dense(Array2::zeros((1, 2)));
    let b = Matrix::Dense(Array2::zeros((1, 3)));
    assert!(matches!(
        vstack(&[a, b]),
        Err(DataError::ShapeMismatch { .. })
    ));
    assert!(matches!(vstack(&[]), Err(DataError::EmptyInput(_))));
}

// ---------------------------------------------------------------------------
// pad / stack_or_concat
// ---------------------------------------------------------------------------

#[test]
fn pad_repeats_example() {
    let ex = array![1, 2];
    let padded = pad(ex.view(), 3).unwrap();
    assert_eq!(padded, array![1, 2, 1, 2, 1, 2]);

    let rows = array![[1, 2]];
    assert_eq!(pad(rows.view(), 2).unwrap(), array![[1, 2], [1, 2]]);
    assert!(pad(ex.view(), 0).is_err());
}

#[test]
fn stack_or_concat_joins_vectors_end_to_end() {
    let a = array![1.0, 2.0].into_dyn();
    let b = array![3.0].into_dyn();
    let out = stack_or_concat(&[a.view(), b.view()]).unwrap();
    assert_eq!(out.shape(), &[3]);
    assert_eq!(out.iter().copied().collect::<Vec<f64>>(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn stack_or_concat_stacks_matrices_and_rows() {
    let m = array![[1, 2], [3, 4]].into_dyn();
    let r = array![5, 6].into_dyn();
    let out = stack_or_concat(&[m.view(), r.view()]).unwrap();
    assert_eq!(out.shape(), &[3, 2]);
    assert_eq!(out.iter().copied().collect::<Vec<i32>>(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn stack_or_concat_turns_scalars_into_a_column() {
    let a = arr0(1.0).into_dyn();
    let b = arr0(2.0).into_dyn();
    let out = stack_or_concat(&[a.view(), b.view()]).unwrap();
    assert_eq!(out.shape(), &[2, 1]);
    assert_eq!(out.iter().copied().collect::<Vec<f64>>(), vec![1.0, 2.0]);
}

#[test]
fn stack_or_concat_mixes_scalar_with_single_column() {
    let m = array![[1], [2]].into_dyn();
    let s = arr0(3).into_dyn();
    let out = stack_or_concat(&[m.view(), s.view()]).unwrap();
    assert_eq!(out.shape(), &[3, 1]);
    assert_eq!(out.iter().copied().collect::<Vec<i32>>(), vec![1, 2, 3]);
}

#[test]
fn stack_or_concat_rejects_mismatched_widths() {
    let m = array![[1, 2], [3, 4]].into_dyn();
    let r = array![5, 6, 7].into_dyn();
    assert!(stack_or_concat(&[m.view(), r.view()]).is_err());
    assert!(stack_or_concat::<i32>(&[]).is_err());
}
