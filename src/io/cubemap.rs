//! Six-face cubemap environment.
//!
//! A cubemap directory holds one PNG per face:
//! ```text
//! negativeX.png  positiveX.png
//! negativeY.png  positiveY.png
//! negativeZ.png  positiveZ.png
//! ```
//! Faces are decoded from sRGB to linear on load. Lookup picks the face of the
//! dominant axis and does a nearest-neighbour fetch.

use std::path::Path;

use image::RgbImage;
use log::info;

use crate::core::color::srgb_pixel_to_linear;
use crate::core::{Direction, EnvironmentSampler, Rgb};
use crate::io::LoadError;

/// Cube face identifiers, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    NegativeX = 0,
    PositiveX = 1,
    NegativeY = 2,
    PositiveY = 3,
    NegativeZ = 4,
    PositiveZ = 5,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::NegativeX,
        CubeFace::PositiveX,
        CubeFace::NegativeY,
        CubeFace::PositiveY,
        CubeFace::NegativeZ,
        CubeFace::PositiveZ,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            CubeFace::NegativeX => "negativeX.png",
            CubeFace::PositiveX => "positiveX.png",
            CubeFace::NegativeY => "negativeY.png",
            CubeFace::PositiveY => "positiveY.png",
            CubeFace::NegativeZ => "negativeZ.png",
            CubeFace::PositiveZ => "positiveZ.png",
        }
    }

    /// Face hit by `direction` and the [0,1]² texture coordinate on it.
    ///
    /// Ties between axes go to x, then y. The zero vector maps to the centre
    /// of +x.
    pub fn locate(direction: &Direction) -> (CubeFace, [f32; 2]) {
        let (ax, ay, az) = (direction.x.abs(), direction.y.abs(), direction.z.abs());
        let major = ax.max(ay).max(az);
        if major == 0.0 {
            return (CubeFace::PositiveX, [0.5, 0.5]);
        }

        let (face, mut u, mut v) = if major == ax {
            let face = if direction.x < 0.0 { CubeFace::NegativeX } else { CubeFace::PositiveX };
            (face, direction.z / ax, -direction.y / ax)
        } else if major == ay {
            let face = if direction.y < 0.0 { CubeFace::NegativeY } else { CubeFace::PositiveY };
            (face, direction.x / ay, -direction.z / ay)
        } else {
            let face = if direction.z < 0.0 { CubeFace::NegativeZ } else { CubeFace::PositiveZ };
            (face, direction.x / az, -direction.y / az)
        };

        match face {
            CubeFace::NegativeX | CubeFace::PositiveZ => u = -u,
            CubeFace::NegativeY => v = -v,
            _ => {}
        }

        (face, [0.5 * u + 0.5, 0.5 * v + 0.5])
    }
}

/// One decoded face, stored row-major in linear RGB.
#[derive(Clone, Debug)]
pub struct CubemapFace {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl CubemapFace {
    /// Decode an 8-bit sRGB image.
    pub fn from_image(image: &RgbImage) -> Result<Self, LoadError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(LoadError::InvalidFormat("cubemap face is empty".to_string()));
        }
        let pixels = image.pixels().map(|p| srgb_pixel_to_linear(p.0)).collect();
        Ok(Self { width, height, pixels })
    }

    /// 1×1 face of a single linear colour.
    pub fn solid(color: Rgb) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nearest-neighbour lookup at `uv ∈ [0,1]²`, clamped at the edges.
    pub fn sample(&self, uv: [f32; 2]) -> Rgb {
        let x = ((self.width - 1) as f32 * uv[0].clamp(0.0, 1.0)) as u32;
        let y = ((self.height - 1) as f32 * uv[1].clamp(0.0, 1.0)) as u32;
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Environment map made of six faces.
#[derive(Clone, Debug)]
pub struct Cubemap {
    faces: [CubemapFace; 6],
}

impl Cubemap {
    /// Faces in `CubeFace::ALL` order.
    pub fn from_faces(faces: [CubemapFace; 6]) -> Self {
        Self { faces }
    }

    /// Load the six face images from a directory.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let mut faces = Vec::with_capacity(6);
        for face in CubeFace::ALL {
            let path = dir.join(face.file_name());
            let image = image::open(&path)?.to_rgb8();
            faces.push(CubemapFace::from_image(&image)?);
        }

        let (w, h) = faces[0].dimensions();
        info!("Loaded cubemap {:?} ({}x{} per face)", dir, w, h);

        let faces: [CubemapFace; 6] = faces
            .try_into()
            .map_err(|_| LoadError::InvalidFormat("expected six cubemap faces".to_string()))?;
        Ok(Self::from_faces(faces))
    }

    pub fn face(&self, face: CubeFace) -> &CubemapFace {
        &self.faces[face as usize]
    }
}

impl EnvironmentSampler for Cubemap {
    fn sample(&self, direction: &Direction) -> Rgb {
        let (face, uv) = CubeFace::locate(direction);
        self.face(face).sample(uv)
    }
}
