//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental types used throughout the system:
//! - `SphericalFunction`: anything that can be evaluated for a unit direction
//! - `SphereQuadrature`: numerical integration over the full sphere
//! - `sh`: the nine fixed real spherical-harmonic basis functions
//! - `Mesh`: owned vertex/normal/index buffers
//!
//! Nothing here does I/O or spawns threads. Resolution errors are reported
//! as `lighting::LightingError`.

mod environment;
mod mesh;
mod quadrature;
mod spherical;
pub mod color;
pub mod sh;

use nalgebra::Vector3;

/// A unit vector in 3D. Callers normalize; nothing here checks the length.
pub type Direction = Vector3<f32>;

/// Linear RGB colour.
pub type Rgb = Vector3<f32>;

// Re-export public types
pub use environment::{EnvironmentSampler, UniformEnvironment};
pub use mesh::{compute_vertex_normals, Mesh};
pub use quadrature::{integrate, SphereQuadrature, FULL_SPHERE_MEASURE};
pub use sh::{evaluate_sh, sh_basis, Coefficients, SH_BASIS, SH_BASIS_COUNT, SH_C0, SH_C1, SH_C2, SH_C3};
pub use spherical::{CubemapFunction, Product, SampleValue, SphericalFunction, Subroutine, Visibility};
