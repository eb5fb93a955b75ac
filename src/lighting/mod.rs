//! Lighting pipeline: projection onto the SH basis and per-frame relighting.
//!
//! - `projector`: integrate a function against each of the nine basis functions
//! - `dispatch`: split per-vertex work across scoped worker threads
//! - `rotation`: rotate coefficients about z and reconstruct vertex colours
//! - `context`: the state a render loop holds between frames

mod context;
mod dispatch;
mod error;
mod projector;
mod rotation;

pub use context::LightingContext;
pub use dispatch::{dispatch, partition};
pub use error::LightingError;
pub use projector::{project, project_environment, project_vertices};
pub use rotation::{reconstruct, rotate_z, RECONSTRUCTION_SCALE};
