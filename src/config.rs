//! Lighting settings, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "environment_resolution": { "theta": 128, "phi": 256 }, "worker_threads": 8 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::LoadError;
use crate::lighting::LightingError;

/// Quadrature grid size: rows in colatitude, columns in azimuth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub theta: usize,
    pub phi: usize,
}

impl Resolution {
    pub const fn new(theta: usize, phi: usize) -> Self {
        Self { theta, phi }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Per-vertex visibility projection. The lobe is smooth, so this stays low.
    pub vertex_resolution: Resolution,

    /// Environment projection. Runs once, so it can afford detail.
    pub environment_resolution: Resolution,

    /// Threads used for per-vertex projection
    pub worker_threads: usize,

    /// Radians the lighting turns per frame
    pub angle_step: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            vertex_resolution: Resolution::new(16, 32),
            environment_resolution: Resolution::new(256, 512),
            worker_threads: 4,
            angle_step: 1.0f32.to_radians(),
        }
    }
}

impl LightingConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Reject settings the projector cannot run with.
    pub fn validate(&self) -> Result<(), LightingError> {
        for res in [self.vertex_resolution, self.environment_resolution] {
            if res.theta == 0 || res.phi == 0 {
                return Err(LightingError::InvalidResolution {
                    theta: res.theta,
                    phi: res.phi,
                });
            }
        }
        if self.worker_threads == 0 {
            return Err(LightingError::NoWorkers);
        }
        Ok(())
    }
}
