//! Colour space conversion utilities
//!
//! Lighting is computed in **linear RGB**. Cubemap faces arrive as 8-bit sRGB
//! and are decoded on load; relit vertex colours and previews are encoded
//! back to sRGB only when written out.
//!
//! The official sRGB transfer function is used (not a gamma 2.2 approximation):
//! - decode: `c <= 0.04045 ? c / 12.92 : ((c + 0.055) / 1.055)^2.4`
//! - encode: `l <= 0.0031308 ? 12.92·l : 1.055·l^(1/2.4) − 0.055`

use super::Rgb;

/// Convert sRGB u8 (0-255) to linear f32 (0.0-1.0).
///
/// # Example
/// ```
/// use sh_relight::core::color::srgb_u8_to_linear_f32;
///
/// // Middle gray in sRGB (128) is about 0.21 in linear space
/// let linear = srgb_u8_to_linear_f32(128);
/// assert!((linear - 0.2126).abs() < 0.01);
/// ```
pub fn srgb_u8_to_linear_f32(u: u8) -> f32 {
    let cs = (u as f32) / 255.0;
    if cs <= 0.04045 {
        cs / 12.92
    } else {
        ((cs + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert linear f32 to sRGB u8, clamping to [0, 1] first.
///
/// Reconstructed lighting can overshoot 1.0 or dip below 0.0 (SH ringing), so
/// the clamp is part of the contract.
pub fn linear_f32_to_srgb_u8(x: f32) -> u8 {
    let x = x.clamp(0.0, 1.0);
    let cs = if x <= 0.0031308 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    };
    (cs * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Decode an 8-bit sRGB pixel into linear RGB.
pub fn srgb_pixel_to_linear(pixel: [u8; 3]) -> Rgb {
    Rgb::new(
        srgb_u8_to_linear_f32(pixel[0]),
        srgb_u8_to_linear_f32(pixel[1]),
        srgb_u8_to_linear_f32(pixel[2]),
    )
}

/// Encode a linear RGB colour as an 8-bit sRGB pixel.
pub fn linear_to_srgb_pixel(color: &Rgb) -> [u8; 3] {
    [
        linear_f32_to_srgb_u8(color.x),
        linear_f32_to_srgb_u8(color.y),
        linear_f32_to_srgb_u8(color.z),
    ]
}
