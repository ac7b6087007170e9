//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Kinetic energy](#kinetic-energy)
//! - [Analysis](#analysis)
//! - [Units](#units)
//!
//! # Background
//! Solutions of the one-dimensional time-independent Schrödinger equation
//! (TISE) are eigenpairs of the Hamiltonian
//! ```text
//!        1   ∂²
//! H = - --- --- + V(x)
//!       2 m ∂x²
//! ```
//! in atomic units (*ħ* = 1). A discrete variable representation (DVR) is a
//! basis of functions *φ*ᵢ(*x*), one per point of a grid *x*ᵢ, chosen so
//! that the matrix of the coordinate operator is diagonal with the grid points
//! as its eigenvalues. Any function of the coordinate, in particular the
//! potential, is then also (approximately) diagonal:
//! ```text
//! V[i, j] ≈ V(x[i]) δ[i, j]
//! ```
//! so that the potential costs nothing to set up beyond sampling it on the
//! grid. All the work goes into the kinetic energy matrix, for which
//! Colbert and Miller[^1] give closed-form elements on a uniform grid. The
//! eigenvalues of `T + V` then approximate the bound-state energies, and the
//! columns of the eigenvector matrix hold the wavefunction amplitudes at the
//! grid points.
//!
//! Unlike shooting methods, a single diagonalization yields the whole
//! (grid resolution-limited) spectrum at once, at a cost of *O*(*N*³) time
//! and *O*(*N*²) memory for an *N*-point grid.
//!
//! # Kinetic energy
//! For a grid `x[i] = x₀ + i δx` extending (in principle) over the whole real
//! line, the DVR basis functions are sinc functions centered on the grid
//! points, and the kinetic energy matrix is
//! ```text
//!                  1    ⎧ π² / 3                  i = j
//! T[i, j] = ---------- ⎨
//!           2 m δx²    ⎩ 2 (-1)^(i - j) / (i - j)²    i ≠ j
//! ```
//! Truncating the grid to a finite interval is harmless as long as the states
//! of interest have decayed to zero before its ends. The convergence with
//! respect to *δx* is exponential: states are well represented once the grid
//! samples their shortest de Broglie wavelength a few times over.
//!
//! The matrix is real and symmetric, and so is `T + V`. It is diagonalized
//! with LAPACK's symmetric eigensolver (tridiagonal reduction followed by an
//! implicit QR iteration), which returns energies in ascending order and
//! orthonormal, real eigenvectors.
//!
//! # Analysis
//! With the quadrature weights absorbed into the DVR amplitudes *ψ*ᵢ, matrix
//! elements of any coordinate function *A*(*x*) reduce to sums over grid
//! points,
//! ```text
//! ⟨ψ|A|ψ⟩ ≈ Σ_i ψ[i] A(x[i]) ψ[i]
//! ```
//! and normalization reads `Σ_i ψ[i]² = 1`. The position spread of a state is
//! `σ = sqrt(⟨x²⟩ - ⟨x⟩²)` and its most probable position is the grid point
//! where `|ψ[i]|` is largest. For the harmonic oscillator
//! `V(x) = m ω² x² / 2`, the ground state has `⟨x⟩ = 0` and
//! `σ = (2 m ω)^(-1/2)`.
//!
//! # Units
//! Everything is computed in Hartree atomic units: lengths in Bohr radii,
//! masses in electron masses, energies in Hartrees. Vibrational problems are
//! usually posed in Ångströms, atomic mass units, and wavenumbers, for which
//! conversion factors are provided by [`units`][crate::units]. For example,
//! a 3000 cm⁻¹ oscillator has `ω ≈ 0.01367` Eₕ.
//!
//! [^1]: D. T. Colbert and W. H. Miller, "A novel discrete variable
//! representation for quantum mechanical reactive scattering via the S-matrix
//! Kohn method." J. Chem. Phys. **96**, 1982 (1992).
