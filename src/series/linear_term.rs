use serde::{Deserialize, Serialize};

use super::SeriesTerm;

/// VSOP87 term `amplitude · cos(phase + frequency · τ)`, `τ` in Julian millennia.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTerm {
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

impl LinearTerm {
    pub fn new(amplitude: f64, phase: f64, frequency: f64) -> Self {
        LinearTerm {
            amplitude,
            phase,
            frequency,
        }
    }
}

impl SeriesTerm for LinearTerm {
    const WIDTH: usize = 3;

    fn from_fields(fields: &[f64]) -> Self {
        LinearTerm::new(fields[0], fields[1], fields[2])
    }

    fn field(&self, k: usize) -> f64 {
        match k {
            0 => self.amplitude,
            1 => self.phase,
            2 => self.frequency,
            _ => panic!("LinearTerm has no field {k}"),
        }
    }

    fn set_field(&mut self, k: usize, value: f64) {
        match k {
            0 => self.amplitude = value,
            1 => self.phase = value,
            2 => self.frequency = value,
            _ => panic!("LinearTerm has no field {k}"),
        }
    }

    fn value_and_rate(&self, tau: f64) -> (f64, f64) {
        let (s, c) = (self.phase + self.frequency * tau).sin_cos();
        (self.amplitude * c, -self.amplitude * self.frequency * s)
    }

    fn argument_power(k: usize) -> Option<i32> {
        match k {
            1 => Some(0),
            2 => Some(1),
            _ => None,
        }
    }
}
