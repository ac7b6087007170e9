//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use ndarray_npy::{ ReadNpzError, WriteNpzError };
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from the DVR solver, archive I/O, and analysis functions.
#[derive(Debug, Error)]
pub enum DvrError {
    /// Returned when a non-positive (or non-finite) mass is encountered.
    #[error("mass must be finite and greater than 0; got {0}")]
    BadMass(f64),

    /// Returned when a coordinate grid has fewer than two points, leaving the
    /// grid spacing undefined.
    #[error("coordinate grid must contain at least 2 points; got {0}")]
    ShortGrid(usize),

    /// Returned when a wavefunction array has no grid points to search.
    #[error("wavefunction array has no grid points")]
    EmptyWfn,

    /// Returned when a state index falls outside the available eigenvectors.
    #[error("state index {quanta} out of range for {n} states")]
    Quanta { quanta: usize, n: usize },

    /// Returned when an archive lacks one of its four named entries.
    #[error("archive is missing entry '{0}'")]
    MissingEntry(&'static str),

    /// Returned when the arrays in an archive do not describe the same grid.
    #[error("archive entry '{name}' has shape {got:?}; expected {expected:?}")]
    Shape {
        name: &'static str,
        got: Vec<usize>,
        expected: Vec<usize>,
    },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),

    /// [`std::io::Error`].
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// [`ReadNpzError`].
    #[error("npz read error: {0}")]
    ReadNpz(#[from] ReadNpzError),

    /// [`WriteNpzError`].
    #[error("npz write error: {0}")]
    WriteNpz(#[from] WriteNpzError),
}

impl DvrError {
    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass.is_finite() && mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_grid_len(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::ShortGrid(n))
    }

    pub(crate) fn check_quanta(quanta: usize, n: usize) -> Result<(), Self> {
        (quanta < n).then_some(()).ok_or(Self::Quanta { quanta, n })
    }
}
