use std::error::Error;
use std::fmt;

/// Errors raised when inputs don't meet a helper's shape or type expectations.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    EmptyInput(&'static str),
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    LabelOutOfRange {
        label: usize,
        dimension: usize,
    },
    InfeasibleSampling {
        class: usize,
        needed: usize,
        available: usize,
    },
    InvalidRandomState(String),
    MissingField(String),
    Shape(ndarray::ShapeError),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataError::EmptyInput(what) => write!(f, "{} must not be empty", what),
            DataError::ShapeMismatch {
                context,
                expected,
                found,
            } => write!(f, "{}: expected {}, found {}", context, expected, found),
            DataError::LabelOutOfRange { label, dimension } => write!(
                f,
                "Label {} is out of range for one-hot dimension {}",
                label, dimension
            ),
            DataError::InfeasibleSampling {
                class,
                needed,
                available,
            } => write!(
                f,
                "Cannot draw {} examples of class {}: only {} eligible",
                needed, class, available
            ),
            DataError::InvalidRandomState(msg) => write!(f, "parameter rand {} has wrong type", msg),
            DataError::MissingField(msg) => write!(f, "something wrong with the dataset: {}", msg),
            DataError::Shape(err) => write!(f, "Array shape error: {}", err),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for DataError {
    fn from(err: ndarray::ShapeError) -> Self {
        DataError::Shape(err)
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
