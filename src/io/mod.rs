//! I/O operations for the collaborators around the lighting core.
//!
//! This module handles all file format parsing and export:
//! - OBJ meshes (positions, normals, faces)
//! - Cubemaps (six PNG faces in a directory) and directional sampling
//! - PLY export of relit vertex colours
//! - Equirectangular previews of SH lighting

mod cubemap;
mod error;
mod obj;
mod ply;
mod preview;

// Re-export public types and functions
pub use cubemap::{Cubemap, CubemapFace, CubeFace};
pub use error::LoadError;
pub use obj::{load_obj, parse_obj};
pub use ply::{save_relit_ply, write_relit_ply};
pub use preview::render_environment_preview;
