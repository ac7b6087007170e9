//! Post-hoc analysis of archived DVR results.
//!
//! The statistics are associated functions that take plain arrays, so they
//! can be applied to freshly computed [`Spectrum`][crate::dvr::Spectrum]s as
//! well as to the contents of an opened archive.

use std::path::Path;
use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    archive::Archive,
    error::{ DvrError, LengthError },
    utils::{ argmax_first, wf_dot },
};

pub type AnalyzeResult<T> = Result<T, DvrError>;

/// Read-only view of a single archive.
#[derive(Clone, Debug)]
pub struct Analyzer {
    archive: Archive,
}

impl From<Archive> for Analyzer {
    fn from(archive: Archive) -> Self { Self { archive } }
}

impl Analyzer {
    /// Open the archive at `path`, appending `.npz` if necessary.
    ///
    /// Fails if the file does not exist, is not an `.npz` file, lacks one of
    /// the four entries, or holds arrays of inconsistent shape.
    pub fn open<P>(path: P) -> AnalyzeResult<Self>
    where P: AsRef<Path>
    {
        Archive::read(path).map(Self::from)
    }

    /// Get a reference to the coordinate grid.
    pub fn grid(&self) -> &nd::Array1<f64> { self.archive.grid() }

    /// Get a reference to the sampled potential.
    pub fn potential(&self) -> &nd::Array1<f64> { self.archive.potential() }

    /// Get a reference to the energies.
    pub fn energies(&self) -> &nd::Array1<f64> { self.archive.energies() }

    /// Get a reference to the wavefunction matrix (one state per column).
    pub fn wfns(&self) -> &nd::Array2<f64> { self.archive.wfns() }

    /// Get a reference to the underlying archive.
    pub fn archive(&self) -> &Archive { &self.archive }

    /// Expectation value ⟨ψ|A|ψ⟩ of a grid-diagonal quantity `attr` in state
    /// `quanta`:
    /// ```text
    /// Σ_p wfn[p, quanta] * attr[p] * wfn[p, quanta]
    /// ```
    pub fn exp_val<S, T>(attr: &Arr1<S>, wfn: &Arr2<T>, quanta: usize)
        -> AnalyzeResult<f64>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let psi = state(wfn, quanta)?;
        LengthError::check(attr, &psi)?;
        let a_psi: nd::Array1<f64> = attr * &psi;
        Ok(wf_dot(&psi, &a_psi))
    }

    /// Standard deviation of position in state `quanta`,
    /// `sqrt(⟨x²⟩ - ⟨x⟩²)`.
    ///
    /// Rounding can push the variance of a tightly localized state slightly
    /// below zero; it is clamped to zero, so the result is always
    /// non-negative.
    pub fn std_dev<S, T>(grid: &Arr1<S>, wfn: &Arr2<T>, quanta: usize)
        -> AnalyzeResult<f64>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let av_x = Self::exp_val(grid, wfn, quanta)?;
        let av_x2 = Self::exp_val(&grid.mapv(|x| x * x), wfn, quanta)?;
        Ok((av_x2 - av_x.powi(2)).max(0.0).sqrt())
    }

    /// Grid coordinate at which state `quanta` is most probable, i.e. where
    /// `|wfn[:, quanta]|` is largest.
    ///
    /// The magnitude is used because eigenvector signs are arbitrary. This
    /// differs from a signed argmax for excited states: the lobes of an
    /// antisymmetric state have equal magnitude, so the result is settled by
    /// tie-breaking (first such point in grid order) and not by which lobe
    /// happens to be positive.
    pub fn calc_re<S, T>(grid: &Arr1<S>, wfn: &Arr2<T>, quanta: usize)
        -> AnalyzeResult<f64>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let psi = state(wfn, quanta)?;
        LengthError::check(grid, &psi)?;
        let idx = argmax_first(psi.iter().map(|p| p.abs()))
            .ok_or(DvrError::EmptyWfn)?;
        Ok(grid[idx])
    }

    /// [`Self::exp_val`] applied to this archive's wavefunctions.
    pub fn state_exp_val<S>(&self, attr: &Arr1<S>, quanta: usize)
        -> AnalyzeResult<f64>
    where S: nd::Data<Elem = f64>
    {
        Self::exp_val(attr, self.wfns(), quanta)
    }

    /// [`Self::std_dev`] applied to this archive's grid and wavefunctions.
    pub fn state_std_dev(&self, quanta: usize) -> AnalyzeResult<f64> {
        Self::std_dev(self.grid(), self.wfns(), quanta)
    }

    /// [`Self::calc_re`] applied to this archive's grid and wavefunctions.
    pub fn state_re(&self, quanta: usize) -> AnalyzeResult<f64> {
        Self::calc_re(self.grid(), self.wfns(), quanta)
    }
}

fn state<T>(wfn: &Arr2<T>, quanta: usize) -> AnalyzeResult<nd::ArrayView1<'_, f64>>
where T: nd::Data<Elem = f64>
{
    DvrError::check_quanta(quanta, wfn.ncols())?;
    Ok(wfn.column(quanta))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray as nd;
    use crate::{
        dvr::Dvr,
        units::{ convert, Unit },
        utils::wf_norm,
    };
    use super::*;

    #[test]
    fn statistics_on_hand_built_states() {
        let grid: nd::Array1<f64> = nd::array![-1.0, 0.0, 1.0, 2.0];
        let h = 0.5_f64.sqrt();
        // columns: localized at x = 0; split over x = -1, 1; split over 1, 2
        let wfn: nd::Array2<f64> = nd::array![
            [0.0,  h,  0.0],
            [1.0, 0.0, 0.0],
            [0.0, -h,  -h ],
            [0.0, 0.0, -h ],
        ];
        assert_abs_diff_eq!(Analyzer::exp_val(&grid, &wfn, 0).unwrap(), 0.0);
        assert_abs_diff_eq!(Analyzer::exp_val(&grid, &wfn, 1).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Analyzer::exp_val(&grid, &wfn, 2).unwrap(), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Analyzer::std_dev(&grid, &wfn, 0).unwrap(), 0.0);
        assert_abs_diff_eq!(Analyzer::std_dev(&grid, &wfn, 1).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Analyzer::std_dev(&grid, &wfn, 2).unwrap(), 0.5, epsilon = 1e-12);
        assert_eq!(Analyzer::calc_re(&grid, &wfn, 0).unwrap(), 0.0);
        // equal magnitudes: first in grid order, whichever lobe is positive
        assert_eq!(Analyzer::calc_re(&grid, &wfn, 1).unwrap(), -1.0);
        assert_eq!(Analyzer::calc_re(&grid, &(-&wfn), 1).unwrap(), -1.0);
        assert_eq!(Analyzer::calc_re(&grid, &wfn, 2).unwrap(), 1.0);
    }

    #[test]
    fn std_dev_clamps_rounding() {
        // amplitude normalized to within one ulp
        let grid: nd::Array1<f64> = nd::array![0.1, 1.1];
        let wfn: nd::Array2<f64> = nd::array![[0.0], [1.0000000000000002]];
        let av_x = Analyzer::exp_val(&grid, &wfn, 0).unwrap();
        let av_x2 = Analyzer::exp_val(&grid.mapv(|x| x * x), &wfn, 0).unwrap();
        assert!(av_x2 - av_x.powi(2) < 0.0);
        assert_eq!(Analyzer::std_dev(&grid, &wfn, 0).unwrap(), 0.0);
    }

    #[test]
    fn bad_quanta_and_shapes() {
        let grid: nd::Array1<f64> = nd::Array1::linspace(-1.0, 1.0, 3);
        let wfn: nd::Array2<f64> = nd::Array2::eye(3);
        assert!(matches!(
            Analyzer::exp_val(&grid, &wfn, 3),
            Err(DvrError::Quanta { quanta: 3, n: 3 }),
        ));
        assert!(Analyzer::std_dev(&grid, &wfn, 7).is_err());
        assert!(Analyzer::calc_re(&grid, &wfn, 3).is_err());
        let short: nd::Array1<f64> = nd::Array1::zeros(2);
        assert!(matches!(
            Analyzer::exp_val(&short, &wfn, 0),
            Err(DvrError::Length(_)),
        ));
    }

    #[test]
    fn calc_re_without_grid_points() {
        let grid: nd::Array1<f64> = nd::Array1::zeros(0);
        let wfn: nd::Array2<f64> = nd::Array2::zeros((0, 1));
        assert!(matches!(
            Analyzer::calc_re(&grid, &wfn, 0),
            Err(DvrError::EmptyWfn),
        ));
    }

    #[test]
    fn open_appends_extension_and_fails_cleanly() {
        let dir = std::env::temp_dir()
            .join(format!("dvr1d-analyze-{}", std::process::id()));
        let dvr = Dvr::new_range((-4.0, 4.0, 0.5), |x| x.powi(2), 1.0)
            .unwrap()
            .with_res_dir(&dir)
            .with_res_file("small.npz");
        let path = dvr.run().unwrap();
        let a = Analyzer::open(dir.join("small")).unwrap();
        let b = Analyzer::open(&path).unwrap();
        assert_eq!(a.archive(), b.archive());
        assert_eq!(a.grid(), dvr.get_grid());
        assert_eq!(a.potential(), dvr.get_potential());
        assert!(matches!(
            Analyzer::open(dir.join("absent")),
            Err(DvrError::Io(_)),
        ));
        std::fs::remove_dir_all(dir).unwrap();
    }

    // grid -50..50 step 0.1, m = 1, ω = 3000 cm⁻¹
    #[test]
    fn harmonic_oscillator_3000_wavenumbers() {
        let dir = std::env::temp_dir()
            .join(format!("dvr1d-hmo-{}", std::process::id()));
        let mass = 1.0;
        let omega: f64 = convert(3000.0_f64, Unit::Wavenumbers, true);
        let dvr = Dvr::new_range(
            (-50.0, 50.0, 0.1),
            |x| 0.5 * mass * omega.powi(2) * x.powi(2),
            mass,
        ).unwrap()
            .with_res_dir(&dir);
        let path = dvr.run().unwrap();
        let res = Analyzer::open(path).unwrap();

        assert_eq!(res.grid(), dvr.get_grid());
        assert_eq!(res.potential(), dvr.get_potential());

        let energies: nd::Array1<f64>
            = convert(res.energies(), Unit::Wavenumbers, false);
        for (n, expected) in [1500.0, 4500.0, 7500.0].into_iter().enumerate() {
            assert_abs_diff_eq!(energies[n], expected, epsilon = 1e-3);
        }
        assert!(res.energies().iter().zip(res.energies().iter().skip(1))
            .all(|(e0, e1)| e0 <= e1));
        res.wfns().columns().into_iter()
            .for_each(|wf| assert_abs_diff_eq!(wf_norm(&wf), 1.0, epsilon = 1e-10));

        let x0 = Analyzer::exp_val(res.grid(), res.wfns(), 0).unwrap();
        assert_abs_diff_eq!(x0, 0.0, epsilon = 1e-8);
        let sd0 = res.state_std_dev(0).unwrap();
        assert_abs_diff_eq!(sd0, (2.0 * mass * omega).recip().sqrt(), epsilon = 1e-6);
        assert_abs_diff_eq!(sd0, 6.05, epsilon = 5e-3);
        for q in 0..10 {
            assert!(res.state_std_dev(q).unwrap() >= 0.0);
        }

        let i_min = argmax_first(res.potential().iter().map(|v| -v)).unwrap();
        assert_eq!(res.state_re(0).unwrap(), res.grid()[i_min]);
        assert!(res.state_re(0).unwrap().abs() < 1e-10);

        // ⟨x²⟩ of level n is (n + 1/2) / (m ω)
        let x2 = res.grid().mapv(|x| x * x);
        assert_abs_diff_eq!(
            res.state_exp_val(&x2, 2).unwrap(),
            2.5 / (mass * omega),
            epsilon = 1e-6,
        );
        std::fs::remove_dir_all(dir).unwrap();
    }
}
