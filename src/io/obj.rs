//! Wavefront OBJ mesh loading.
//!
//! Only the records lighting needs are read:
//! ```text
//! v x y z           # Vertex positions
//! vn nx ny nz       # Vertex normals (optional)
//! f a b c ...       # Faces: i, i/t, i//n or i/t/n; negative = relative
//! ```
//! Everything else (`vt`, `o`, `g`, `usemtl`, ...) is skipped. Polygons are
//! fan-triangulated.
//!
//! OBJ normals belong to face corners, but lighting wants one per vertex: a
//! corner's normal is assigned to its vertex and the last usable corner wins.
//! Vertices that end up without a usable normal get a smooth normal computed
//! from the geometry; explicit normals are kept.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};
use nalgebra::Vector3;

use crate::core::{compute_vertex_normals, Mesh};
use crate::io::LoadError;

/// Load a mesh from an OBJ file.
pub fn load_obj(path: &Path) -> Result<Mesh, LoadError> {
    let file = File::open(path)?;
    let mesh = parse_obj(BufReader::new(file))?;
    info!(
        "Loaded {:?}: {} vertices, {} triangles",
        path,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ text from any buffered reader.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, LoadError> {
    let mut positions: Vec<Vector3<f32>> = Vec::new();
    let mut normal_pool: Vec<Vector3<f32>> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();
    // Corner normals collapsed onto vertices (filled in after parsing)
    let mut corner_normals: Vec<(usize, usize)> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => positions.push(parse_vector(tokens, line_no)?),
            Some("vn") => normal_pool.push(parse_vector(tokens, line_no)?),
            Some("f") => {
                let mut corners = Vec::with_capacity(4);
                for token in tokens {
                    let mut parts = token.split('/');
                    let v = parts
                        .next()
                        .ok_or_else(|| invalid(line_no, "empty face corner"))?;
                    let v = resolve_index(v, positions.len(), line_no)?;
                    // Skip texture coordinate
                    parts.next();
                    if let Some(n) = parts.next().filter(|n| !n.is_empty()) {
                        let n = resolve_index(n, normal_pool.len(), line_no)?;
                        corner_normals.push((v, n));
                    }
                    corners.push(v as u32);
                }
                if corners.len() < 3 {
                    return Err(invalid(line_no, "face needs at least 3 corners"));
                }
                for i in 1..corners.len() - 1 {
                    triangles.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if positions.is_empty() {
        return Err(LoadError::InvalidMesh("no vertices".to_string()));
    }

    let mut normals: Vec<Option<Vector3<f32>>> = vec![None; positions.len()];
    for (v, n) in corner_normals {
        // Degenerate normals never replace a usable one
        if let Some(normal) = normal_pool[n].try_normalize(1e-12) {
            normals[v] = Some(normal);
        }
    }

    let missing = normals.iter().filter(|n| n.is_none()).count();
    let normals = if missing == 0 {
        normals.into_iter().flatten().collect()
    } else {
        if !normal_pool.is_empty() {
            warn!("{missing} vertices have no usable normal; filling them with smooth normals");
        }
        let smooth = compute_vertex_normals(&positions, &triangles);
        normals
            .into_iter()
            .zip(smooth)
            .map(|(explicit, smooth)| explicit.unwrap_or(smooth))
            .collect()
    };

    Mesh::new(positions, normals, triangles)
}

fn parse_vector<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Vector3<f32>, LoadError> {
    let mut component = || -> Result<f32, LoadError> {
        tokens
            .next()
            .ok_or_else(|| invalid(line_no, "expected 3 components"))?
            .parse::<f32>()
            .map_err(|e| invalid(line_no, &e.to_string()))
    };
    Ok(Vector3::new(component()?, component()?, component()?))
}

/// OBJ indices are 1-based; negative ones count back from the end.
fn resolve_index(token: &str, count: usize, line_no: usize) -> Result<usize, LoadError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| invalid(line_no, &format!("bad index '{token}'")))?;

    let index = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return Err(invalid(line_no, "index 0 is not valid in OBJ"));
    };

    if index < 0 || index as usize >= count {
        return Err(invalid(line_no, &format!("index {raw} out of range")));
    }
    Ok(index as usize)
}

fn invalid(line_no: usize, message: &str) -> LoadError {
    LoadError::InvalidFormat(format!("OBJ line {line_no}: {message}"))
}
