//! Lighting state held by a render loop between frames.

use log::info;

use super::{project_environment, project_vertices, reconstruct, rotate_z, LightingError};
use crate::config::LightingConfig;
use crate::core::{Coefficients, EnvironmentSampler, Mesh, Rgb, SphereQuadrature};

/// Precomputed coefficients plus the current animation angle.
///
/// Vertex and environment coefficients are fixed after construction. Each
/// call to [`relight`](Self::relight) derives a rotated copy of the
/// environment for the current angle and refreshes the colour buffer.
#[derive(Clone, Debug)]
pub struct LightingContext {
    vertex_coeffs: Vec<Coefficients<f32>>,
    environment: Coefficients<Rgb>,
    rotated: Option<Coefficients<Rgb>>,
    angle: f32,
    colors: Vec<Rgb>,
}

impl LightingContext {
    /// Project the mesh and the environment and start at angle 0.
    pub fn new<S>(mesh: &Mesh, sampler: &S, config: &LightingConfig) -> Result<Self, LightingError>
    where
        S: EnvironmentSampler + ?Sized,
    {
        config.validate()?;
        if mesh.is_empty() {
            return Err(LightingError::EmptyMesh);
        }

        let env_res = config.environment_resolution;
        let environment =
            project_environment(sampler, &SphereQuadrature::new(env_res.theta, env_res.phi)?)?;

        let vertex_res = config.vertex_resolution;
        let vertex_coeffs = project_vertices(
            mesh.normals(),
            &SphereQuadrature::new(vertex_res.theta, vertex_res.phi)?,
            config.worker_threads,
        )?;

        info!("Lighting ready for {} vertices", vertex_coeffs.len());
        Ok(Self::from_parts(vertex_coeffs, environment))
    }

    /// Build from coefficients computed elsewhere.
    pub fn from_parts(vertex_coeffs: Vec<Coefficients<f32>>, environment: Coefficients<Rgb>) -> Self {
        let colors = vec![Rgb::zeros(); vertex_coeffs.len()];
        Self {
            vertex_coeffs,
            environment,
            rotated: None,
            angle: 0.0,
            colors,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance the animation angle. Never wrapped.
    pub fn advance(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_coeffs.len()
    }

    pub fn vertex_coefficients(&self) -> &[Coefficients<f32>] {
        &self.vertex_coeffs
    }

    /// Unrotated environment coefficients.
    pub fn environment(&self) -> &Coefficients<Rgb> {
        &self.environment
    }

    /// Environment rotated for the last relit frame, if any.
    pub fn rotated_environment(&self) -> Option<&Coefficients<Rgb>> {
        self.rotated.as_ref()
    }

    /// Rotate the environment to the current angle and recompute every
    /// vertex colour.
    pub fn relight(&mut self) -> &[Rgb] {
        let rotated = rotate_z(&self.environment, self.angle);

        for (color, vertex) in self.colors.iter_mut().zip(&self.vertex_coeffs) {
            *color = reconstruct(&rotated, vertex);
        }

        self.rotated = Some(rotated);
        &self.colors
    }

    /// Colours from the last [`relight`](Self::relight).
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Colours as contiguous float triples, ready for a vertex colour buffer.
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| [c.x, c.y, c.z]).collect()
    }
}
