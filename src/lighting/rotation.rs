//! Closed-form rotation of band 0-2 coefficients about the z axis, and
//! per-vertex reconstruction.
//!
//! Under a rotation by α about z:
//! - Y0, Y2 (z) and Y6 (zonal) are invariant
//! - (Y1, Y3) and (Y5, Y7) mix at frequency α
//! - (Y4, Y8) mix at frequency 2α
//!
//! so no general 9×9 rotation matrix is ever built.

use crate::core::{Coefficients, Rgb, SampleValue, FULL_SPHERE_MEASURE};

/// Empirical rescale applied after dividing by the sphere measure.
///
/// Compensates for projecting onto a clamped-cosine lobe rather than a
/// sin-weighted one. Tied to `FULL_SPHERE_MEASURE`; change both together.
pub const RECONSTRUCTION_SCALE: f32 = 4.0;

/// Rotate SH coefficients by `angle` radians about the z axis.
///
/// `angle` need not be wrapped; only its sine and cosine are used.
pub fn rotate_z<T: SampleValue>(c: &Coefficients<T>, angle: f32) -> Coefficients<T> {
    let (s1, c1) = angle.sin_cos();
    let (s2, c2) = (2.0 * angle).sin_cos();

    [
        c[0],
        c[1] * c1 + c[3] * s1,
        c[2],
        c[1] * -s1 + c[3] * c1,
        c[4] * c2 + c[8] * s2,
        c[5] * c1 + c[7] * s1,
        c[6],
        c[5] * -s1 + c[7] * c1,
        c[4] * -s2 + c[8] * c2,
    ]
}

/// Colour of one vertex: `Σ_k rotated[k]·vertex[k] / 4π · 4`.
pub fn reconstruct(rotated: &Coefficients<Rgb>, vertex: &Coefficients<f32>) -> Rgb {
    let accumulated = rotated
        .iter()
        .zip(vertex.iter())
        .fold(Rgb::zeros(), |acc, (light, v)| acc + light * *v);

    accumulated * (RECONSTRUCTION_SCALE / FULL_SPHERE_MEASURE)
}
