use serde::{Deserialize, Serialize};

use super::SeriesTerm;

/// ELP/MPP02 term `amplitude · sin(c₀ + c₁τ + c₂τ² + c₃τ³ + c₄τ⁴)`, `τ` in Julian centuries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolyTerm {
    pub amplitude: f64,
    pub argument: [f64; 5],
}

impl PolyTerm {
    pub fn new(amplitude: f64, argument: [f64; 5]) -> Self {
        PolyTerm {
            amplitude,
            argument,
        }
    }

    /// Argument polynomial and its derivative at `tau`.
    pub fn argument_and_rate(&self, tau: f64) -> (f64, f64) {
        polynomial_and_rate(&self.argument, tau)
    }
}

/// `Σ c_k x^k` and its derivative, Horner form.
pub fn polynomial_and_rate(coeffs: &[f64], x: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut rate = 0.0;
    for c in coeffs.iter().rev() {
        rate = rate * x + value;
        value = value * x + c;
    }
    (value, rate)
}

impl SeriesTerm for PolyTerm {
    const WIDTH: usize = 6;

    fn from_fields(fields: &[f64]) -> Self {
        PolyTerm::new(
            fields[0],
            [fields[1], fields[2], fields[3], fields[4], fields[5]],
        )
    }

    fn field(&self, k: usize) -> f64 {
        match k {
            0 => self.amplitude,
            1..=5 => self.argument[k - 1],
            _ => panic!("PolyTerm has no field {k}"),
        }
    }

    fn set_field(&mut self, k: usize, value: f64) {
        match k {
            0 => self.amplitude = value,
            1..=5 => self.argument[k - 1] = value,
            _ => panic!("PolyTerm has no field {k}"),
        }
    }

    fn value_and_rate(&self, tau: f64) -> (f64, f64) {
        let (arg, arg_rate) = self.argument_and_rate(tau);
        let (s, c) = arg.sin_cos();
        (self.amplitude * s, self.amplitude * arg_rate * c)
    }

    fn argument_power(k: usize) -> Option<i32> {
        match k {
            1..=5 => Some(k as i32 - 1),
            _ => None,
        }
    }
}
