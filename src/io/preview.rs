//! Equirectangular preview of SH-encoded lighting.

use std::f32::consts::PI;

use image::{Rgb as Pixel, RgbImage};

use crate::core::color::linear_to_srgb_pixel;
use crate::core::{evaluate_sh, Coefficients, Rgb};

/// Render what nine RGB coefficients retain of an environment.
///
/// Rows run from the +y pole (top) to the −y pole, columns sweep azimuth, using
/// the same `(sinθ·sinφ, cosθ, sinθ·cosφ)` convention as the quadrature grid.
pub fn render_environment_preview(coeffs: &Coefficients<Rgb>, width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let theta = (y as f32 + 0.5) / height as f32 * PI;
        let phi = (x as f32 + 0.5) / width as f32 * 2.0 * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let direction = Rgb::new(sin_theta * sin_phi, cos_theta, sin_theta * cos_phi);
        Pixel(linear_to_srgb_pixel(&evaluate_sh(coeffs, &direction)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SH_C0;

    #[test]
    fn test_dc_only_preview_is_flat() {
        let mut coeffs = [Rgb::zeros(); 9];
        coeffs[0] = Rgb::new(0.5, 0.5, 0.5) / SH_C0;
        let img = render_environment_preview(&coeffs, 8, 4);
        assert_eq!(img.dimensions(), (8, 4));
        for p in img.pixels() {
            assert_eq!(p.0, [188, 188, 188]);
        }
    }
}
