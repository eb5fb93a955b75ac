//! PLY export of relit meshes.
//!
//! Writes ASCII PLY with per-vertex position, normal and sRGB colour plus the
//! triangle list, so a frame of relighting can be inspected in any mesh
//! viewer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::color::linear_to_srgb_pixel;
use crate::core::{Mesh, Rgb};
use crate::io::LoadError;

/// Save `mesh` with one linear colour per vertex to a PLY file.
pub fn save_relit_ply(mesh: &Mesh, colors: &[Rgb], path: &Path) -> Result<(), LoadError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_relit_ply(&mut file, mesh, colors)?;
    file.flush()?;
    Ok(())
}

/// Write the PLY text to any writer.
pub fn write_relit_ply<W: Write>(out: &mut W, mesh: &Mesh, colors: &[Rgb]) -> Result<(), LoadError> {
    if colors.len() != mesh.vertex_count() {
        return Err(LoadError::InvalidMesh(format!(
            "{} colours for {} vertices",
            colors.len(),
            mesh.vertex_count()
        )));
    }

    // Write PLY header
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "element vertex {}", mesh.vertex_count())?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    writeln!(out, "property float nx")?;
    writeln!(out, "property float ny")?;
    writeln!(out, "property float nz")?;
    writeln!(out, "property uchar red")?;
    writeln!(out, "property uchar green")?;
    writeln!(out, "property uchar blue")?;
    writeln!(out, "element face {}", mesh.triangle_count())?;
    writeln!(out, "property list uchar int vertex_indices")?;
    writeln!(out, "end_header")?;

    // Write vertex data
    for ((p, n), c) in mesh.positions().iter().zip(mesh.normals()).zip(colors) {
        let [r, g, b] = linear_to_srgb_pixel(c);
        writeln!(out, "{} {} {} {} {} {} {} {} {}", p.x, p.y, p.z, n.x, n.y, n.z, r, g, b)?;
    }

    for [a, b, c] in mesh.triangles() {
        writeln!(out, "3 {} {} {}", a, b, c)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn triangle() -> Mesh {
        Mesh::with_computed_normals(
            vec![Vector3::zeros(), Vector3::z(), Vector3::x()],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_header_and_body() {
        let mesh = triangle();
        let colors = vec![Rgb::new(1.0, 0.0, 0.5); 3];
        let mut buf = Vec::new();
        write_relit_ply(&mut buf, &mesh, &colors).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ply");
        assert!(lines.contains(&"element vertex 3"));
        assert!(lines.contains(&"element face 1"));
        assert_eq!(lines[lines.len() - 4], "0 0 0 0 1 0 255 0 188");
        assert_eq!(*lines.last().unwrap(), "3 0 1 2");
    }

    #[test]
    fn test_colour_count_must_match() {
        let mut buf = Vec::new();
        assert!(write_relit_ply(&mut buf, &triangle(), &[Rgb::zeros()]).is_err());
    }
}
