//! Miscellaneous tools for wavefunctions sampled on a DVR grid.
//!
//! DVR amplitudes already carry the quadrature weights of the underlying
//! basis, so integrals over the grid reduce to plain sums over grid points.

use std::ops::Add;
use ndarray::{ self as nd, Ix1 };
use ndarray_linalg::Scalar;
use num_traits::Zero;

/// Calculate the norm (sum of squared magnitudes) of a wavefunction.
pub fn wf_norm<S, A>(q: &nd::ArrayBase<S, Ix1>) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter()
        .map(|qk| qk.square())
        .fold(<A as Scalar>::Real::zero(), <A as Scalar>::Real::add)
}

/// Calculate the inner product ⟨q|p⟩ of two wavefunctions.
///
/// Only the overlapping leading elements are used if the lengths differ.
pub fn wf_dot<S, T, A>(q: &nd::ArrayBase<S, Ix1>, p: &nd::ArrayBase<T, Ix1>)
    -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter().zip(p)
        .fold(A::zero(), |acc, (qk, pk)| acc + qk.conj() * *pk)
}

/// Return the index of the greatest element of `a`, or `None` if `a` is empty.
///
/// Ties go to the earliest index; NaNs are never selected unless every element
/// is NaN.
pub fn argmax_first<I, A>(a: I) -> Option<usize>
where
    I: IntoIterator<Item = A>,
    A: num_traits::Float,
{
    let mut best: Option<(usize, A)> = None;
    for (k, ak) in a.into_iter().enumerate() {
        match best {
            None => { best = Some((k, ak)); },
            Some((_, b)) if b.is_nan() && !ak.is_nan() => {
                best = Some((k, ak));
            },
            Some((_, b)) if ak > b => { best = Some((k, ak)); },
            _ => { },
        }
    }
    best.map(|(k, _)| k)
}
