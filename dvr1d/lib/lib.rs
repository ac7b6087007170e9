#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for automated solution of the
//! one-dimensional, time-independent Schrödinger equation via the discrete
//! variable representation (DVR) of Colbert and Miller[^1], along with
//! persistence and post-hoc analysis of the resulting spectra.
//!
//! The crate is split into two halves that only communicate through an `.npz`
//! [archive][archive::Archive]:
//! - [`dvr`]: builds the kinetic, potential, and total Hamiltonian matrices on
//!   a uniform grid, diagonalizes the Hamiltonian, and writes the results.
//! - [`analyze`]: re-opens an archive and computes per-state statistics
//!   (expectation values, position spread, most probable position).
//!
//! ```no_run
//! use dvr1d::{ analyze::Analyzer, dvr::Dvr, units };
//!
//! let w: f64 = units::convert(3000.0_f64, units::Unit::Wavenumbers, true);
//! let dvr = Dvr::new_range((-50.0, 50.0, 0.1), |x| 0.5 * w.powi(2) * x.powi(2), 1.0)
//!     .unwrap()
//!     .with_res_dir("output");
//! let path = dvr.run().unwrap();
//! let res = Analyzer::open(path).unwrap();
//! let x0 = Analyzer::exp_val(res.grid(), res.wfns(), 0).unwrap();
//! println!("<x>_0 = {x0:.3e}");
//! ```
//!
//! See [`docs`] for theoretical background.
//!
//! [^1]: D. T. Colbert and W. H. Miller, "A novel discrete variable
//! representation for quantum mechanical reactive scattering via the S-matrix
//! Kohn method." J. Chem. Phys. **96**, 1982 (1992).

pub mod error;
pub mod units;
pub mod utils;
pub mod archive;
pub mod dvr;
pub mod analyze;

pub mod docs;

pub(crate) const DEF_RES_FILE: &str = "dvr_results";
pub(crate) const DEF_RES_DIR: &str = "dvr_results";
pub(crate) const NPZ_EXT: &str = "npz";

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
