//! Dominant eigenvalue of the renewal recurrence.
//!
//! For a per-day kernel `a` of length `n`, new cases follow
//!
//! ```text
//! c[t] = Σ_d a[d] * c[t-1-d]
//! ```
//!
//! Writing the last `n` days as a state vector turns this into `x' = A x` with
//!
//! ```text
//!     | a0 a1 … a(n-2) a(n-1) |
//!     | 1  0  …  0      0     |
//! A = | 0  1  …  0      0     |
//!     | …                     |
//!     | 0  0  …  1      0     |
//! ```
//!
//! whose characteristic polynomial is
//! `x^n - a0 x^(n-1) - a1 x^(n-2) - … - a(n-1)`. The largest eigenvalue
//! magnitude is the asymptotic per-day growth factor.
//!
//! Eigenvalues come from nalgebra's real Schur decomposition. `n` is small
//! (the number of infectious days), so a dense solve is cheap. Trailing zero
//! coefficients contribute roots at 0 and are deflated first; kernels on
//! which the Schur iteration stalls fall back to polynomial root finding.

use log::debug;
use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix};

use crate::error::AppError;

/// Iteration cap for the Schur decomposition.
const SCHUR_MAX_ITER: usize = 10_000;

/// Polynomial root iteration: cap, relative step tolerance, residual bound.
const ROOT_MAX_ITER: usize = 2_000;
const ROOT_TOLERANCE: f64 = 1e-14;
const ROOT_RESIDUAL: f64 = 1e-8;

/// Build the companion-style matrix for kernel `a`.
pub fn companion_matrix(a: &[f64]) -> DMatrix<f64> {
    let n = a.len();
    DMatrix::from_fn(n, n, |i, j| {
        if i == 0 {
            a[j]
        } else if j + 1 == i {
            1.0
        } else {
            0.0
        }
    })
}

/// All eigenvalues of the companion matrix of `a`.
///
/// Trailing zero coefficients are roots at 0 and are split off before the
/// decomposition. When the Schur iteration does not converge (cyclic
/// kernels such as `[0, 0, 0, 1]`), the roots of the characteristic
/// polynomial are found directly instead.
pub fn eigenvalues(a: &[f64]) -> Result<Vec<Complex<f64>>, AppError> {
    if a.is_empty() {
        return Err(AppError::domain("Cannot compute eigenvalues of an empty kernel."));
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numeric("Kernel contains non-finite values."));
    }

    let len = a.iter().rposition(|v| *v != 0.0).map_or(0, |last| last + 1);
    let mut values = vec![Complex::new(0.0, 0.0); a.len() - len];
    if len == 0 {
        return Ok(values);
    }

    let kernel = &a[..len];
    match Schur::try_new(companion_matrix(kernel), f64::EPSILON, SCHUR_MAX_ITER) {
        Some(schur) => values.extend(schur.complex_eigenvalues().iter().copied()),
        None => {
            debug!("Schur decomposition did not converge for {kernel:?}; using polynomial roots");
            values.extend(polynomial_roots(kernel)?);
        }
    }
    Ok(values)
}

/// Largest eigenvalue magnitude of the companion matrix of `a`.
pub fn dominant_eigenvalue(a: &[f64]) -> Result<f64, AppError> {
    let values = eigenvalues(a)?;
    let dominant = values
        .iter()
        .map(|z| z.re.hypot(z.im))
        .fold(0.0_f64, f64::max);
    if !dominant.is_finite() {
        return Err(AppError::numeric("Dominant eigenvalue is not finite."));
    }
    Ok(dominant)
}

/// Evaluate `x^n - a0 x^(n-1) - … - a(n-1)` (Horner).
pub fn characteristic_polynomial(a: &[f64], x: f64) -> f64 {
    a.iter().fold(1.0, |acc, &coef| acc * x - coef)
}

fn characteristic_polynomial_at(a: &[f64], z: Complex<f64>) -> Complex<f64> {
    a.iter().fold(Complex::new(1.0, 0.0), |acc, &coef| acc * z - coef)
}

/// Roots of the characteristic polynomial by simultaneous (Durand-Kerner)
/// iteration.
///
/// Starting points are the powers of `0.4 + 0.9i`; they must not share the
/// rotational symmetry of `x^n - c`. A run that hits the iteration cap
/// (repeated roots) is accepted when every residual is negligible.
fn polynomial_roots(a: &[f64]) -> Result<Vec<Complex<f64>>, AppError> {
    let n = a.len();
    let seed = Complex::new(0.4, 0.9);
    let mut roots: Vec<Complex<f64>> =
        std::iter::successors(Some(Complex::new(1.0, 0.0)), |z| Some(z * seed))
            .take(n)
            .collect();

    for _ in 0..ROOT_MAX_ITER {
        let mut shift = 0.0_f64;
        for i in 0..n {
            let z = roots[i];
            let denom = roots
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(Complex::new(1.0, 0.0), |acc, (_, w)| acc * (z - w));
            if denom.norm() == 0.0 {
                continue;
            }
            let delta = characteristic_polynomial_at(a, z) / denom;
            roots[i] = z - delta;
            shift = shift.max(delta.norm() / z.norm().max(1.0));
        }
        if shift < ROOT_TOLERANCE {
            return Ok(roots);
        }
    }

    let converged = roots.iter().all(|z| {
        let scale = z.norm().max(1.0).powi(n as i32);
        z.re.is_finite()
            && z.im.is_finite()
            && characteristic_polynomial_at(a, *z).norm() / scale < ROOT_RESIDUAL
    });
    if converged {
        Ok(roots)
    } else {
        Err(AppError::numeric("Eigenvalue computation did not converge."))
    }
}
