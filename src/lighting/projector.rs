//! Projection of spherical functions onto the nine-function SH basis.
//!
//! Coefficient `k` of a function `g` is `∫ g(d)·Y_k(d) dΩ`, computed by
//! integrating `Product(g, Y_k)` with a shared quadrature.

use std::ops::Mul;
use std::time::Instant;

use log::info;
use nalgebra::Vector3;

use super::{dispatch, LightingError};
use crate::core::{
    Coefficients, CubemapFunction, EnvironmentSampler, Product, Rgb, SphereQuadrature,
    SphericalFunction, Visibility, SH_BASIS, SH_BASIS_COUNT,
};

/// Project `function` onto each basis function.
pub fn project<F>(function: &F, quadrature: &SphereQuadrature) -> Coefficients<F::Output>
where
    F: SphericalFunction + ?Sized,
    F::Output: Mul<f32, Output = F::Output>,
{
    std::array::from_fn(|k| quadrature.integrate(&Product::new(function, &SH_BASIS[k])))
}

/// Project the environment's colour function. Runs on the calling thread.
///
/// A sampler that yields NaN or infinity violates its contract; that is
/// reported instead of letting the bad values reach every vertex.
pub fn project_environment<S>(
    sampler: &S,
    quadrature: &SphereQuadrature,
) -> Result<Coefficients<Rgb>, LightingError>
where
    S: EnvironmentSampler + ?Sized,
{
    let start = Instant::now();
    let coeffs = project(&CubemapFunction::new(sampler), quadrature);

    if let Some(index) = coeffs.iter().position(|c| !c.iter().all(|v| v.is_finite())) {
        return Err(LightingError::NonFiniteCoefficient { index });
    }

    info!(
        "Projected environment at {}x{} in {:.2?}",
        quadrature.theta_resolution(),
        quadrature.phi_resolution(),
        start.elapsed()
    );
    Ok(coeffs)
}

/// Project the clamped-cosine visibility lobe of every normal, in parallel.
///
/// Normals are read-only and shared; each worker writes a disjoint slice of
/// the returned vector.
pub fn project_vertices(
    normals: &[Vector3<f32>],
    quadrature: &SphereQuadrature,
    workers: usize,
) -> Result<Vec<Coefficients<f32>>, LightingError> {
    if normals.is_empty() {
        return Err(LightingError::EmptyMesh);
    }

    let start = Instant::now();
    let mut coeffs = vec![[0.0f32; SH_BASIS_COUNT]; normals.len()];

    dispatch(&mut coeffs, workers, |first, slice| {
        for (offset, out) in slice.iter_mut().enumerate() {
            *out = project(&Visibility::new(normals[first + offset]), quadrature);
        }
    })?;

    info!(
        "Projected {} vertices at {}x{} on {} workers in {:.2?}",
        normals.len(),
        quadrature.theta_resolution(),
        quadrature.phi_resolution(),
        workers,
        start.elapsed()
    );
    Ok(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{UniformEnvironment, FULL_SPHERE_MEASURE, SH_C0, SH_C1};
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_constant_environment_is_pure_dc() {
        let q = SphereQuadrature::new(64, 128).unwrap();
        let env = UniformEnvironment::new(Vector3::new(1.0, 1.0, 1.0));
        let coeffs = project_environment(&env, &q).unwrap();

        assert_relative_eq!(coeffs[0].x, FULL_SPHERE_MEASURE * SH_C0, epsilon = 1e-3);
        for c in &coeffs[1..] {
            assert!(c.amax() < 1e-3, "expected ~0, got {c:?}");
        }
    }

    #[test]
    fn test_upward_lobe_band0_and_band1() {
        // ∫ max(0, y)·c0 = π·c0, ∫ max(0, y)·c1·y = 2π/3·c1
        let q = SphereQuadrature::new(64, 128).unwrap();
        let coeffs = project(&Visibility::new(Vector3::new(0.0, 1.0, 0.0)), &q);

        assert_relative_eq!(coeffs[0], PI * SH_C0, epsilon = 1e-3);
        assert_relative_eq!(coeffs[1], 2.0 * PI / 3.0 * SH_C1, epsilon = 1e-3);
        assert!(coeffs[2].abs() < 1e-3);
        assert!(coeffs[3].abs() < 1e-3);
    }

    #[test]
    fn test_nan_environment_is_rejected() {
        let q = SphereQuadrature::new(4, 8).unwrap();
        let env = UniformEnvironment::new(Vector3::new(f32::NAN, 0.0, 0.0));
        assert!(matches!(
            project_environment(&env, &q),
            Err(LightingError::NonFiniteCoefficient { index: 0 })
        ));
    }

    #[test]
    fn test_empty_normals_rejected() {
        let q = SphereQuadrature::new(4, 8).unwrap();
        assert!(matches!(
            project_vertices(&[], &q, 4),
            Err(LightingError::EmptyMesh)
        ));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let q = SphereQuadrature::new(16, 32).unwrap();
        let normals: Vec<_> = (0..13)
            .map(|i| {
                let a = i as f32 * 0.5;
                Vector3::new(a.cos(), 0.3, a.sin()).normalize()
            })
            .collect();

        let parallel = project_vertices(&normals, &q, 4).unwrap();
        for (n, coeffs) in normals.iter().zip(&parallel) {
            assert_eq!(*coeffs, project(&Visibility::new(*n), &q));
        }
    }
}
