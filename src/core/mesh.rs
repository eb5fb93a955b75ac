//! Triangle mesh with per-vertex normals.
//!
//! Buffers are owned `Vec`s sized at load time. The lighting code only reads
//! `normals()` and `vertex_count()`; positions and indices are carried for the
//! renderer and exporters.

use log::warn;
use nalgebra::Vector3;

use crate::io::LoadError;

/// Owned mesh buffers.
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh, checking that every vertex has a normal and every index
    /// is in range.
    pub fn new(
        positions: Vec<Vector3<f32>>,
        normals: Vec<Vector3<f32>>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, LoadError> {
        if positions.len() != normals.len() {
            return Err(LoadError::InvalidMesh(format!(
                "{} positions but {} normals",
                positions.len(),
                normals.len()
            )));
        }

        let vertex_count = positions.len();
        if let Some(bad) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(LoadError::InvalidMesh(format!(
                "triangle index {bad} out of range for {vertex_count} vertices"
            )));
        }

        Ok(Self {
            positions,
            normals,
            triangles,
        })
    }

    /// Create a mesh whose normals are derived from its triangles.
    pub fn with_computed_normals(
        positions: Vec<Vector3<f32>>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, LoadError> {
        let normals = compute_vertex_normals(&positions, &triangles);
        Self::new(positions, normals, triangles)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Positions as contiguous float triples (x0 y0 z0 x1 ...).
    pub fn flat_positions(&self) -> Vec<f32> {
        flatten(&self.positions)
    }

    /// Normals as contiguous float triples.
    pub fn flat_normals(&self) -> Vec<f32> {
        flatten(&self.normals)
    }

    /// Triangle indices as a flat list, three per triangle.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

fn flatten(vectors: &[Vector3<f32>]) -> Vec<f32> {
    vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
}

/// Area-weighted smooth vertex normals.
///
/// Each triangle adds its unnormalized face normal (|n| = 2·area) to its
/// three corners. Vertices touched by no non-degenerate triangle fall back to
/// +y so that every vertex still has a unit normal.
pub fn compute_vertex_normals(positions: &[Vector3<f32>], triangles: &[[u32; 3]]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for tri in triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let face = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    let mut fallback = 0usize;
    for n in normals.iter_mut() {
        match n.try_normalize(1e-12) {
            Some(unit) => *n = unit,
            None => {
                *n = Vector3::new(0.0, 1.0, 0.0);
                fallback += 1;
            }
        }
    }
    if fallback > 0 {
        warn!("{fallback} vertices had no usable faces; defaulting their normals to +y");
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> (Vec<Vector3<f32>>, Vec<[u32; 3]>) {
        (
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(1.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_counterclockwise_triangle_faces_up() {
        let (positions, triangles) = triangle();
        let mesh = Mesh::with_computed_normals(positions, triangles).unwrap();
        for n in mesh.normals() {
            assert_relative_eq!(*n, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let (positions, _) = triangle();
        let normals = vec![Vector3::y(); 3];
        assert!(Mesh::new(positions, normals, vec![[0, 1, 3]]).is_err());
    }

    #[test]
    fn test_rejects_missing_normals() {
        let (positions, triangles) = triangle();
        assert!(Mesh::new(positions, vec![Vector3::y(); 2], triangles).is_err());
    }

    #[test]
    fn test_flat_buffers() {
        let (positions, triangles) = triangle();
        let mesh = Mesh::with_computed_normals(positions, triangles).unwrap();
        assert_eq!(mesh.flat_positions().len(), 9);
        assert_eq!(&mesh.flat_positions()[3..6], &[0.0, 0.0, 1.0]);
        assert_eq!(mesh.flat_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_isolated_vertex_gets_fallback_normal() {
        let normals = compute_vertex_normals(&[Vector3::new(1.0, 2.0, 3.0)], &[]);
        assert_eq!(normals, vec![Vector3::new(0.0, 1.0, 0.0)]);
    }
}
