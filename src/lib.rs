//! # sh-relight: Precomputed spherical-harmonic lighting
//!
//! This crate relights the vertices of a mesh from an environment map in real
//! time by projecting both onto the first nine real spherical harmonics
//! (bands 0-2) once at load time, then rotating and recombining the
//! coefficients every frame.
//!
//! ## Architecture
//!
//! - `core`: Spherical functions, quadrature, the SH basis, meshes, colours
//! - `lighting`: Coefficient projection, parallel dispatch, rotation and reconstruction
//! - `io`: File I/O (OBJ meshes, cubemap faces, PLY export)
//! - `config`: Resolution and threading settings
//!
//! ## Pipeline
//!
//! 1. Project each vertex's clamped-cosine visibility lobe (in parallel)
//! 2. Project the environment's colour function (once, at high resolution)
//! 3. Per frame: rotate the environment coefficients and dot them with each vertex

// Core data structures and math
pub mod core;

// Projection, dispatch, rotation
pub mod lighting;

// I/O operations (OBJ, cubemap, PLY)
pub mod io;

// Runtime settings
pub mod config;

// Re-export commonly used types at crate root for convenience
pub use config::{LightingConfig, Resolution};
pub use crate::core::{Direction, Mesh, Rgb, SphereQuadrature, SphericalFunction};
pub use io::{Cubemap, LoadError};
pub use lighting::{LightingContext, LightingError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
