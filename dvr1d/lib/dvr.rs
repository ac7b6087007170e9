//! Functions to compute solutions to the one-dimensional, time-independent
//! Schrödinger equation (TISE) by direct diagonalization of the Hamiltonian in
//! the Colbert–Miller discrete variable representation.
//!
//! All quantities are in atomic units (ħ = 1); see [`units`][crate::units] for
//! conversions.

use std::{
    f64::consts::PI,
    fs,
    path::{ Path, PathBuf },
};
use ndarray as nd;
use ndarray_linalg::{ self as la, EighInto, EigValshInto };
use crate::{
    Arr1,
    archive::{ Archive, with_npz_ext },
    error::{ DvrError, LengthError },
    DEF_RES_DIR,
    DEF_RES_FILE,
};

pub type DvrResult<T> = Result<T, DvrError>;

/// Dense matrix representation of a potential sampled on a DVR grid, i.e. a
/// diagonal matrix with `V` on the diagonal.
pub fn potential_matrix<S>(V: &Arr1<S>) -> nd::Array2<f64>
where S: nd::Data<Elem = f64>
{
    nd::Array2::from_diag(V)
}

/// Colbert–Miller kinetic energy matrix for `n` points of a uniform grid with
/// spacing `dx` and particle mass `mass`.
///
/// With `t = 1 / (2 m dx²)`:
/// ```text
/// T[i, j] = t (-1)^(i - j) 2 / (i - j)²    (i ≠ j)
/// T[i, i] = t π² / 3
/// ```
/// The strictly lower triangle is filled first and added to its transpose,
/// after which the diagonal is overwritten.
pub fn kinetic_matrix(n: usize, dx: f64, mass: f64) -> nd::Array2<f64> {
    let t_coef = (2.0 * mass * dx.powi(2)).recip();
    let mut ke: nd::Array2<f64> = nd::Array2::zeros((n, n));
    for i in 1..n {
        for j in 0..i {
            let d = (i - j) as f64;
            let sign = if (i - j) % 2 == 0 { 1.0 } else { -1.0 };
            ke[[i, j]] = t_coef * sign * (2.0 / d.powi(2));
        }
    }
    let mut T: nd::Array2<f64> = &ke + &ke.t();
    T.diag_mut().fill(t_coef * (PI * PI / 3.0));
    T
}

/// Diagonalize a real symmetric Hamiltonian (only its lower triangle is read).
///
/// Energies are returned in ascending order with unit-norm eigenvectors as the
/// columns of [`Spectrum::wfns`]. The overall sign of each eigenvector is
/// whatever LAPACK produces.
pub fn diagonalize(H: nd::Array2<f64>) -> DvrResult<Spectrum> {
    let (energies, wfns): (nd::Array1<f64>, nd::Array2<f64>)
        = H.eigh_into(la::UPLO::Lower)?;
    Ok(Spectrum { energies, wfns })
}

/// Full set of eigenpairs of a DVR Hamiltonian.
#[derive(Clone, Debug)]
pub struct Spectrum {
    /// Energies, ascending.
    pub energies: nd::Array1<f64>,
    /// Wavefunctions; column `k` belongs to `energies[k]`.
    pub wfns: nd::Array2<f64>,
}

impl Spectrum {
    /// Number of states.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.energies.len() }

    /// Energy of state `quanta`.
    pub fn energy(&self, quanta: usize) -> DvrResult<f64> {
        DvrError::check_quanta(quanta, self.len())?;
        Ok(self.energies[quanta])
    }

    /// Wavefunction of state `quanta`.
    pub fn wfn(&self, quanta: usize) -> DvrResult<nd::ArrayView1<'_, f64>> {
        DvrError::check_quanta(quanta, self.wfns.ncols())?;
        Ok(self.wfns.column(quanta))
    }

    /// Bundle with the grid and potential that produced it.
    pub fn into_archive(self, grid: nd::Array1<f64>, potential: nd::Array1<f64>)
        -> DvrResult<Archive>
    {
        Archive::new(grid, potential, self.energies, self.wfns)
    }
}

/// A one-dimensional DVR problem: a uniform coordinate grid, the potential
/// sampled on it, a particle mass, and where to put the results.
///
/// The grid is assumed to be uniform; only its first two points are used to
/// determine the spacing.
#[derive(Clone, Debug)]
pub struct Dvr {
    // coordinate array
    grid: nd::Array1<f64>,
    // coordinate array grid spacing
    dx: f64,
    // potential array
    pot: nd::Array1<f64>,
    // particle mass
    mass: f64,
    // archive base name
    res_file: String,
    // archive directory
    res_dir: PathBuf,
}

impl Dvr {
    /// Create a new `Dvr` from bare coordinate and potential arrays.
    ///
    /// Results are written to `dvr_results/dvr_results.npz` unless changed
    /// with [`Self::with_res_file`] or [`Self::with_res_dir`].
    pub fn new(grid: nd::Array1<f64>, potential: nd::Array1<f64>, mass: f64)
        -> DvrResult<Self>
    {
        LengthError::check(&grid, &potential)?;
        DvrError::check_grid_len(grid.len())?;
        DvrError::check_mass(mass)?;
        let dx = grid[1] - grid[0];
        Ok(Self {
            grid,
            dx,
            pot: potential,
            mass,
            res_file: DEF_RES_FILE.to_string(),
            res_dir: PathBuf::from(DEF_RES_DIR),
        })
    }

    /// Create a new `Dvr`, generating the coordinate array from "range-style"
    /// arguments (start, exclusive end, and a step size) and sampling `V` on
    /// it.
    pub fn new_range<F>(xargs: (f64, f64, f64), V: F, mass: f64)
        -> DvrResult<Self>
    where F: FnMut(f64) -> f64
    {
        let grid: nd::Array1<f64>
            = nd::Array1::range(xargs.0, xargs.1, xargs.2);
        let pot: nd::Array1<f64> = grid.mapv(V);
        Self::new(grid, pot, mass)
    }

    /// Set the archive base name (`.npz` is appended if missing).
    pub fn with_res_file<S>(mut self, res_file: S) -> Self
    where S: Into<String>
    {
        self.res_file = res_file.into();
        self
    }

    /// Set the directory the archive is written to. It is created on
    /// [`Self::run`] if it does not exist.
    pub fn with_res_dir<P>(mut self, res_dir: P) -> Self
    where P: AsRef<Path>
    {
        self.res_dir = res_dir.as_ref().to_path_buf();
        self
    }

    /// Get a reference to the coordinate array.
    pub fn get_grid(&self) -> &nd::Array1<f64> { &self.grid }

    /// Get a reference to the potential array.
    pub fn get_potential(&self) -> &nd::Array1<f64> { &self.pot }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the particle mass.
    pub fn get_mass(&self) -> f64 { self.mass }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Full path of the archive written by [`Self::run`].
    pub fn res_path(&self) -> PathBuf {
        with_npz_ext(self.res_dir.join(&self.res_file))
    }

    /// Thin interface to [`potential_matrix`].
    pub fn potential_matrix(&self) -> nd::Array2<f64> {
        potential_matrix(&self.pot)
    }

    /// Thin interface to [`kinetic_matrix`].
    pub fn kinetic_matrix(&self) -> nd::Array2<f64> {
        kinetic_matrix(self.len(), self.dx, self.mass)
    }

    /// Assemble the full Hamiltonian `T + V`.
    pub fn hamiltonian(&self) -> nd::Array2<f64> {
        let mut H = self.kinetic_matrix();
        let mut H_diag = H.diag_mut();
        H_diag += &self.pot;
        H
    }

    /// Compute all eigenpairs of the Hamiltonian.
    pub fn diagonalize(&self) -> DvrResult<Spectrum> {
        diagonalize(self.hamiltonian())
    }

    /// Compute only the energies of the Hamiltonian, in ascending order.
    pub fn energies(&self) -> DvrResult<nd::Array1<f64>> {
        let evals: nd::Array1<f64>
            = self.hamiltonian().eigvalsh_into(la::UPLO::Lower)?;
        Ok(evals)
    }

    /// Diagonalize the Hamiltonian and write the grid, potential, energies,
    /// and wavefunctions to [`Self::res_path`], creating the output directory
    /// as needed and replacing any existing archive.
    ///
    /// Nothing is written if diagonalization fails. Returns the path written.
    pub fn run(&self) -> DvrResult<PathBuf> {
        let spectrum = self.diagonalize()?;
        fs::create_dir_all(&self.res_dir)?;
        spectrum
            .into_archive(self.grid.clone(), self.pot.clone())?
            .write(self.res_path())
    }
}
