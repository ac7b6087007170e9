#![allow(non_upper_case_globals)]

//! Conversion to and from Hartree atomic units, in which the DVR solver works.
//!
//! Concrete physical constants are taken from NIST.
//!
//! ```
//! use dvr1d::units::{ convert, Unit };
//!
//! let w: f64 = convert(3000.0_f64, Unit::Wavenumbers, true);
//! assert!((w - 0.013669).abs() < 1e-6);
//! let back: f64 = convert(w, Unit::Wavenumbers, false);
//! assert!((back - 3000.0).abs() < 1e-9);
//! ```

use std::ops::Mul;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// speed of light in vacuum (m s^-1)
pub const c: f64 = 2.99792458e8;
//             +/- 0 (exact)

/// electron mass (kg)
pub const me: f64 = 9.1093837015e-31;
//              +/- 0.0000000028e-31

/// unified atomic mass unit (kg)
pub const mu: f64 = 1.66053906660e-27;
//              +/- 0.00000000050e-27

/// Bohr radius (m)
pub const a0: f64 = 5.29177210903e-11;
//              +/- 0.00000000080e-11

/// Hartree energy (J) = 2\*Rinf\*h\*c
pub const Eh: f64 = 4.3597447222071e-18;
//              +/- 0.0000000000085e-18

/// Non-atomic units commonly used to set up and report one-dimensional
/// vibrational problems.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Hartree (energy, atomic).
    Hartree,
    /// Wavenumbers, cm⁻¹ (energy).
    Wavenumbers,
    /// Bohr radii (length, atomic).
    Bohr,
    /// Ångströms (length).
    Angstrom,
    /// Electron masses (mass, atomic).
    ElectronMass,
    /// Unified atomic mass units (mass).
    Amu,
}

impl Unit {
    /// Size of one of `self` in atomic units.
    pub fn au_factor(self) -> f64 {
        match self {
            Self::Hartree | Self::Bohr | Self::ElectronMass => 1.0,
            Self::Wavenumbers => h * c * 100.0 / Eh,
            Self::Angstrom => 1e-10 / a0,
            Self::Amu => mu / me,
        }
    }

    /// Convert a quantity given in `self` to atomic units.
    pub fn to_au<T, U>(self, x: T) -> U
    where T: Mul<f64, Output = U>
    {
        x * self.au_factor()
    }

    /// Convert a quantity in atomic units to `self`.
    pub fn from_au<T, U>(self, x: T) -> U
    where T: Mul<f64, Output = U>
    {
        x * self.au_factor().recip()
    }
}

/// Convert `x` between `unit` and atomic units: to atomic units if `to_au` is
/// `true`, from atomic units otherwise.
///
/// Works on bare scalars as well as on (references to) arrays.
pub fn convert<T, U>(x: T, unit: Unit, to_au: bool) -> U
where T: Mul<f64, Output = U>
{
    if to_au { unit.to_au(x) } else { unit.from_au(x) }
}
