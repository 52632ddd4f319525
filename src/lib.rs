//! meta-datasets: dataset helpers for meta-learning pipelines.
//!
//! This crate collects the small, stateless utilities used when building
//! few-shot episodes: class-balanced index sampling, one-hot encoding,
//! container coercion, sparse-aware stacking and conversion of sparse
//! matrices into a coordinate tensor layout.
//!
//! Dense data uses `ndarray`; the sparse types are small CSR/COO containers
//! defined in [`sparse`].
pub mod coerce;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod random;
pub mod sampling;
pub mod sparse;
pub mod stacking;

pub use error::{DataError, Result};
