//! labels::errors — error type for label parsing and range extraction.
//!
//! Purpose
//! -------
//! Report problems with the 0/1 label sequences that feed the range metrics:
//! malformed text, labels outside `{0, 1}`, unreadable files and inconsistent
//! real/predicted inputs.
//!
//! Conventions
//! -----------
//! - Line numbers are 1-based (as shown by an editor); label indices are
//!   0-based (as used for range positions).
//! - I/O failures carry the path and the OS message as strings so the enum
//!   stays `Clone + PartialEq`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type LabelResult<T> = Result<T, LabelError>;

/// LabelError — failures while turning labels into range sets.
///
/// Variants
/// --------
/// - `InvalidLabel { index, value }`
///   Label at 0-based `index` is neither 0 nor 1.
/// - `Parse { line, content }`
///   Line `line` (1-based) does not start with an integer.
/// - `Io { path, message }`
///   Label file could not be read.
/// - `LengthMismatch { real, predicted }`
///   Real and predicted sequences have different lengths.
/// - `EmptySeries`
///   No labels at all.
/// - `InvalidMetricMode { name }`
///   Metric mode name that does not map to a known mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    // ---- Label values ----
    InvalidLabel { index: usize, value: i64 },

    // ---- Input text / files ----
    Parse { line: usize, content: String },
    Io { path: String, message: String },

    // ---- Real vs predicted consistency ----
    LengthMismatch { real: usize, predicted: usize },
    EmptySeries,

    // ---- Configuration ----
    InvalidMetricMode { name: String },
}

impl std::error::Error for LabelError {}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelError::InvalidLabel { index, value } => {
                write!(f, "Invalid anomaly label {value} at index {index}: labels must be 0 or 1.")
            }
            LabelError::Parse { line, content } => {
                write!(f, "Could not parse a label on line {line}: {content:?}.")
            }
            LabelError::Io { path, message } => {
                write!(f, "Could not read label file '{path}': {message}.")
            }
            LabelError::LengthMismatch { real, predicted } => write!(
                f,
                "Real and predicted label counts differ: {real} real vs {predicted} predicted."
            ),
            LabelError::EmptySeries => write!(f, "Label series is empty."),
            LabelError::InvalidMetricMode { name } => write!(
                f,
                "Invalid metric mode '{name}'. Valid options are 'classical', 'time_series' or 'numenta'."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<LabelError> for PyErr {
    fn from(err: LabelError) -> PyErr {
        PyValueError::new_err(format!("LabelError: {err}"))
    }
}
