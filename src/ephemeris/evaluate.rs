use nalgebra::Vector3;

use crate::series::{BodySeries, SeriesTerm};

/// Raw series coordinates and their derivatives with respect to the series time.
///
/// Each group adds `τ^α·S` to its coordinate and `α·τ^(α-1)·S + τ^α·S'` to the rate,
/// `S` being the sum of its terms.
///
/// Arguments
/// -----------------
/// * `series`: the body series.
/// * `tau`: series time (Julian millennia for VSOP87A, centuries for ELP/MPP02).
///
/// Return
/// ----------
/// * `(coordinates, rates)` in the native units of the series.
pub fn coordinates_and_rates<T: SeriesTerm>(
    series: &BodySeries<T>,
    tau: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let mut value = Vector3::zeros();
    let mut rate = Vector3::zeros();

    for group in series.groups() {
        let (sum, sum_rate) = group.sum_and_rate(tau);
        let alpha = group.alpha() as i32;
        let tau_alpha = tau.powi(alpha);
        let tau_alpha_rate = if alpha == 0 {
            0.0
        } else {
            alpha as f64 * tau.powi(alpha - 1)
        };

        value[group.coord()] += tau_alpha * sum;
        rate[group.coord()] += tau_alpha_rate * sum + tau_alpha * sum_rate;
    }

    (value, rate)
}
