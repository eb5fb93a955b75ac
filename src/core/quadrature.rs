//! Numerical integration over the unit sphere.
//!
//! The sphere is sampled on a regular θ×φ grid (θ colatitude, φ azimuth).
//! Rows are not spaced uniformly in θ: each row starts uniform in
//! `u ∈ [0, π]` and is mapped through
//!
//! ```text
//! θ = 2·acos(sqrt(1 − u/π))     =>     cos θ = 1 − 2u/π
//! ```
//!
//! so rows are uniform in cos θ and every grid cell covers the same solid
//! angle. The sample mean therefore needs no sin(θ) weight and the integral is
//! simply `mean · 4π`.
//!
//! The polar axis of the grid is +y: a sample is
//! `(sinθ·sinφ, cosθ, sinθ·cosφ)`.

use std::f32::consts::PI;

use super::spherical::{SampleValue, SphericalFunction};
use super::Direction;
use crate::lighting::LightingError;

/// Solid angle of the full sphere.
pub const FULL_SPHERE_MEASURE: f32 = 4.0 * PI;

/// Precomputed equal-area sampling grid.
///
/// Building the trig tables is the expensive part, so one quadrature is built
/// per resolution and reused for every function integrated at it.
#[derive(Clone, Debug)]
pub struct SphereQuadrature {
    theta_resolution: usize,
    phi_resolution: usize,
    /// (sin θ_i, cos θ_i) per row
    rows: Vec<(f32, f32)>,
    /// (sin φ_j, cos φ_j) per column
    columns: Vec<(f32, f32)>,
}

impl SphereQuadrature {
    /// Build a grid with `theta_resolution` rows and `phi_resolution` columns.
    pub fn new(theta_resolution: usize, phi_resolution: usize) -> Result<Self, LightingError> {
        if theta_resolution == 0 || phi_resolution == 0 {
            return Err(LightingError::InvalidResolution {
                theta: theta_resolution,
                phi: phi_resolution,
            });
        }

        let rows = (0..theta_resolution)
            .map(|i| {
                // Cell centre in pre-bias space, then the equal-area transform
                let u = (i as f32 + 0.5) * PI / theta_resolution as f32;
                let theta = 2.0 * (1.0 - u / PI).max(0.0).sqrt().acos();
                theta.sin_cos()
            })
            .collect();

        let columns = (0..phi_resolution)
            .map(|j| {
                let phi = (j as f32 + 0.5) * 2.0 * PI / phi_resolution as f32;
                phi.sin_cos()
            })
            .collect();

        Ok(Self {
            theta_resolution,
            phi_resolution,
            rows,
            columns,
        })
    }

    pub fn theta_resolution(&self) -> usize {
        self.theta_resolution
    }

    pub fn phi_resolution(&self) -> usize {
        self.phi_resolution
    }

    /// Total number of samples per integral.
    pub fn sample_count(&self) -> usize {
        self.theta_resolution * self.phi_resolution
    }

    /// Iterate over every grid direction, row-major.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.rows.iter().flat_map(move |&row| self.row_directions(row))
    }

    fn row_directions(
        &self,
        (sin_theta, cos_theta): (f32, f32),
    ) -> impl Iterator<Item = Direction> + '_ {
        self.columns.iter().map(move |&(sin_phi, cos_phi)| {
            Direction::new(sin_theta * sin_phi, cos_theta, sin_theta * cos_phi)
        })
    }

    /// Estimate ∫ f dΩ over the full sphere.
    pub fn integrate<F>(&self, function: &F) -> F::Output
    where
        F: SphericalFunction + ?Sized,
    {
        let mut total = F::Output::zero();

        for &row in &self.rows {
            // Sum each row separately to keep f32 round-off down on large grids
            let row_sum = self
                .row_directions(row)
                .fold(F::Output::zero(), |acc, d| acc + function.evaluate(&d));
            total = total + row_sum;
        }

        total * (FULL_SPHERE_MEASURE / self.sample_count() as f32)
    }
}

/// One-shot integration at the given resolution.
pub fn integrate<F>(
    function: &F,
    theta_resolution: usize,
    phi_resolution: usize,
) -> Result<F::Output, LightingError>
where
    F: SphericalFunction + ?Sized,
{
    let quadrature = SphereQuadrature::new(theta_resolution, phi_resolution)?;
    Ok(quadrature.integrate(function))
}
