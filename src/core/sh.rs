//! Real spherical harmonics, bands 0-2.
//!
//! Nine basis functions are enough to capture low-frequency (diffuse-style)
//! lighting. Each one is a closed-form polynomial in the direction's
//! Cartesian components and assumes a unit-length input.
//!
//! The basis functions are ordered as:
//! - Band 0 (1 function): Y0 = c0
//! - Band 1 (3 functions): Y1 = c1·y, Y2 = c1·z, Y3 = c1·x
//! - Band 2 (5 functions): Y4 = c2·xy, Y5 = c2·yz, Y6 = c3·(2z² − x² − y²),
//!   Y7 = c2·zx, Y8 = ½·c2·(x² − y²)

use super::spherical::Subroutine;
use super::{Direction, Rgb};

/// Number of basis functions in bands 0-2.
pub const SH_BASIS_COUNT: usize = 9;

/// One value per basis function.
pub type Coefficients<T> = [T; SH_BASIS_COUNT];

/// sqrt(1/π)/2
pub const SH_C0: f32 = 0.282_094_791_773_878;
/// sqrt(3/π)/2
pub const SH_C1: f32 = 0.488_602_511_902_920;
/// sqrt(15/π)/2
pub const SH_C2: f32 = 1.092_548_430_592_079;
/// sqrt(5/π)/4
pub const SH_C3: f32 = 0.315_391_565_252_520;

fn basis0(_: &Direction) -> f32 {
    SH_C0
}

fn basis1(d: &Direction) -> f32 {
    SH_C1 * d.y
}

fn basis2(d: &Direction) -> f32 {
    SH_C1 * d.z
}

fn basis3(d: &Direction) -> f32 {
    SH_C1 * d.x
}

fn basis4(d: &Direction) -> f32 {
    SH_C2 * d.x * d.y
}

fn basis5(d: &Direction) -> f32 {
    SH_C2 * d.y * d.z
}

fn basis6(d: &Direction) -> f32 {
    SH_C3 * (2.0 * d.z * d.z - d.x * d.x - d.y * d.y)
}

fn basis7(d: &Direction) -> f32 {
    SH_C2 * d.z * d.x
}

fn basis8(d: &Direction) -> f32 {
    0.5 * SH_C2 * (d.x * d.x - d.y * d.y)
}

/// The fixed basis set, indexed 0-8. Read-only and shared by every worker.
pub static SH_BASIS: [Subroutine<f32>; SH_BASIS_COUNT] = [
    Subroutine::new(basis0),
    Subroutine::new(basis1),
    Subroutine::new(basis2),
    Subroutine::new(basis3),
    Subroutine::new(basis4),
    Subroutine::new(basis5),
    Subroutine::new(basis6),
    Subroutine::new(basis7),
    Subroutine::new(basis8),
];

/// Evaluate all nine basis functions for a unit direction.
pub fn sh_basis(direction: &Direction) -> [f32; SH_BASIS_COUNT] {
    [
        basis0(direction),
        basis1(direction),
        basis2(direction),
        basis3(direction),
        basis4(direction),
        basis5(direction),
        basis6(direction),
        basis7(direction),
        basis8(direction),
    ]
}

/// Reconstruct a colour from RGB SH coefficients in the given direction.
///
/// Unlike per-vertex relighting this is the plain SH expansion
/// `Σ_k c_k · Y_k(d)`, useful to preview what the nine coefficients retain
/// of an environment. The result is not clamped.
pub fn evaluate_sh(coeffs: &Coefficients<Rgb>, direction: &Direction) -> Rgb {
    let basis = sh_basis(direction);

    coeffs
        .iter()
        .zip(basis.iter())
        .fold(Rgb::zeros(), |acc, (c, y)| acc + c * *y)
}
