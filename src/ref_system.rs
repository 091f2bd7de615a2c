//! # Frame transforms used by the series evaluator
//!
//! The two theories deliver coordinates in different frames:
//!
//! - **VSOP87A** gives heliocentric rectangular coordinates referred to the dynamical
//!   ecliptic and equinox of J2000. A constant 3×3 matrix stored with the dataset maps
//!   them onto the FK5/ICRF equator.
//! - **ELP/MPP02** gives spherical coordinates referred to the mean ecliptic of date.
//!   They are first rotated onto the J2000 ecliptic with Laskar's precession
//!   polynomials `P`, `Q`, then onto the J2000 equator by a constant rotation about X.
//!
//! All constants are passed in explicitly; nothing here holds state.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// The rotation is **active**: the returned matrix `R` rotates a vector by `alpha` in the
/// direct sense around the chosen axis, `x' = R · x`.
///
/// Arguments
/// -----------------
/// * `alpha`: rotation angle in radians.
/// * `k`: axis index, `0` → X, `1` → Y, `2` → Z.
///
/// Return
/// ----------
/// * An orthonormal rotation matrix.
///
/// # Panics
///
/// Panics if `k > 2`.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation from the J2000 ecliptic onto the J2000 equator for a given obliquity.
pub fn ecliptic_to_equator(obliquity: Radian) -> Matrix3<f64> {
    rotmt(obliquity, 0)
}

/// Build a matrix from its rows, as they are stored in the JSON datasets.
pub fn matrix_from_rows(rows: &[[f64; 3]; 3]) -> Matrix3<f64> {
    Matrix3::new(
        rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
        rows[2][1], rows[2][2],
    )
}

/// Inverse of [`matrix_from_rows`].
pub fn rows_from_matrix(m: &Matrix3<f64>) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

/// Euclidean norm of each column of `m`.
///
/// `|M·e| ≤ Σ_i |e_i|·‖M col_i‖` for any vector `e`, which is how per-coordinate error
/// bounds are pushed through a constant rotation.
pub fn column_norms(m: &Matrix3<f64>) -> [f64; 3] {
    [m.column(0).norm(), m.column(1).norm(), m.column(2).norm()]
}

/// Laskar precession of the ecliptic, mean ecliptic of date → J2000 ecliptic.
///
/// With `p = τ·Σ P_k τ^k`, `q = τ·Σ Q_k τ^k` and `s = sqrt(1 - p² - q²)` the rotation is
///
/// ```text
/// | 1-2p²    2pq      2ps      |
/// | 2pq      1-2q²   -2qs      |
/// | -2ps     2qs      1-2p²-2q²|
/// ```
///
/// which is exactly orthonormal for any `p`, `q` with `p² + q² ≤ 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPrecession {
    pub p: [f64; 5],
    pub q: [f64; 5],
}

impl EclipticPrecession {
    pub fn new(p: [f64; 5], q: [f64; 5]) -> Self {
        EclipticPrecession { p, q }
    }

    /// Rotation matrix and its derivative with respect to `tau` (Julian centuries).
    ///
    /// Arguments
    /// -----------------
    /// * `tau`: Julian centuries since J2000.0.
    ///
    /// Return
    /// ----------
    /// * `(R, dR/dτ)`.
    pub fn rotation_and_rate(&self, tau: f64) -> (Matrix3<f64>, Matrix3<f64>) {
        let (p, pp) = poly_times_tau(&self.p, tau);
        let (q, qp) = poly_times_tau(&self.q, tau);

        let s = (1.0 - p * p - q * q).max(0.0).sqrt();
        // d(s)/dτ = -(p·p' + q·q') / s
        let sp = if s > 0.0 { -(p * pp + q * qp) / s } else { 0.0 };

        let ps = p * s;
        let qs = q * s;
        let ps_rate = pp * s + p * sp;
        let qs_rate = qp * s + q * sp;
        let pq_rate = pp * q + p * qp;

        let rot = Matrix3::new(
            1.0 - 2.0 * p * p,
            2.0 * p * q,
            2.0 * ps,
            2.0 * p * q,
            1.0 - 2.0 * q * q,
            -2.0 * qs,
            -2.0 * ps,
            2.0 * qs,
            1.0 - 2.0 * p * p - 2.0 * q * q,
        );

        let rate = Matrix3::new(
            -4.0 * p * pp,
            2.0 * pq_rate,
            2.0 * ps_rate,
            2.0 * pq_rate,
            -4.0 * q * qp,
            -2.0 * qs_rate,
            -2.0 * ps_rate,
            2.0 * qs_rate,
            -4.0 * (p * pp + q * qp),
        );

        (rot, rate)
    }
}

/// `τ·Σ c_k τ^k` and its derivative, Horner form.
fn poly_times_tau(c: &[f64; 5], tau: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut rate = 0.0;
    for (k, ck) in c.iter().enumerate().rev() {
        value = value * tau + ck;
        rate = rate * tau + (k as f64 + 1.0) * ck;
    }
    (value * tau, rate)
}
