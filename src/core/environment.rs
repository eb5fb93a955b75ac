//! Environment sampling interface.

use super::{Direction, Rgb};

/// Total function from a unit direction to a linear RGB colour.
///
/// Implementations must return a finite colour for every direction on the
/// sphere; there is no failure domain.
pub trait EnvironmentSampler: Sync {
    fn sample(&self, direction: &Direction) -> Rgb;
}

/// Environment that returns the same colour in every direction.
#[derive(Clone, Copy, Debug)]
pub struct UniformEnvironment {
    pub color: Rgb,
}

impl UniformEnvironment {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl EnvironmentSampler for UniformEnvironment {
    fn sample(&self, _direction: &Direction) -> Rgb {
        self.color
    }
}
