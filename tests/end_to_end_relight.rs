//! End-to-end relighting: project a mesh and an environment, then relight it
//! at different angles.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use sh_relight::core::{EnvironmentSampler, Mesh, Rgb, UniformEnvironment};
use sh_relight::io::{CubeFace, Cubemap, CubemapFace};
use sh_relight::{LightingConfig, LightingContext, LightingError, Resolution};

fn up_facing_triangle() -> Mesh {
    Mesh::new(
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
        ],
        vec![Vector3::new(0.0, 1.0, 0.0); 3],
        vec![[0, 1, 2]],
    )
    .expect("valid triangle")
}

fn fast_config() -> LightingConfig {
    LightingConfig {
        environment_resolution: Resolution::new(64, 128),
        ..Default::default()
    }
}

/// Cubemap lit only on one face.
fn single_face_cubemap(lit: CubeFace) -> Cubemap {
    Cubemap::from_faces(CubeFace::ALL.map(|face| {
        if face == lit {
            CubemapFace::solid(Rgb::new(1.0, 1.0, 1.0))
        } else {
            CubemapFace::solid(Rgb::zeros())
        }
    }))
}

#[test]
fn test_white_environment_gives_uniform_gray() {
    let mesh = up_facing_triangle();
    let env = UniformEnvironment::new(Rgb::new(1.0, 1.0, 1.0));
    let mut lighting = LightingContext::new(&mesh, &env, &LightingConfig::default()).unwrap();

    let colors = lighting.relight().to_vec();
    assert_eq!(colors.len(), 3);

    // Same normal everywhere, so every vertex gets the same colour
    assert_eq!(colors[0], colors[1]);
    assert_eq!(colors[1], colors[2]);

    // Hemisphere integral π, DC term 4π·c0², scaled by 4/4π: lands on 1.0
    for channel in colors[0].iter() {
        assert!(*channel > 0.0 && *channel <= 1.0 + 1e-3, "channel {channel}");
        assert_relative_eq!(*channel, 1.0, epsilon = 1e-2);
    }
}

#[test]
fn test_gray_environment_stays_inside_unit_range() {
    let mesh = up_facing_triangle();
    let env = UniformEnvironment::new(Rgb::new(0.5, 0.5, 0.5));
    let mut lighting = LightingContext::new(&mesh, &env, &fast_config()).unwrap();

    for color in lighting.relight() {
        for channel in color.iter() {
            assert!(*channel > 0.0 && *channel < 1.0, "channel {channel}");
        }
        assert_relative_eq!(*color, Rgb::new(0.5, 0.5, 0.5), epsilon = 1e-2);
    }
}

#[test]
fn test_uniform_lighting_ignores_angle() {
    let mesh = up_facing_triangle();
    let env = UniformEnvironment::new(Rgb::new(0.2, 0.4, 0.6));
    let mut lighting = LightingContext::new(&mesh, &env, &fast_config()).unwrap();

    let before = lighting.relight().to_vec();
    lighting.advance(1.3);
    let after = lighting.relight().to_vec();
    for (a, b) in before.iter().zip(&after) {
        assert_relative_eq!(*a, *b, epsilon = 1e-3);
    }
}

#[test]
fn test_faces_toward_light_are_brighter() {
    let mesh = Mesh::new(
        vec![Vector3::zeros(); 2],
        vec![Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, -1.0, 0.0)],
        vec![],
    )
    .unwrap();
    let env = single_face_cubemap(CubeFace::PositiveY);
    assert_eq!(env.sample(&Vector3::new(0.0, 1.0, 0.0)), Rgb::new(1.0, 1.0, 1.0));

    let mut lighting = LightingContext::new(&mesh, &env, &fast_config()).unwrap();
    let colors = lighting.relight();
    assert!(colors[0].x > colors[1].x + 0.1, "up={:?} down={:?}", colors[0], colors[1]);
}

#[test]
fn test_half_turn_swaps_opposite_sides() {
    // Rotating the lighting by π about z maps +x onto −x
    let mesh = Mesh::new(
        vec![Vector3::zeros(); 2],
        vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)],
        vec![],
    )
    .unwrap();
    let env = single_face_cubemap(CubeFace::PositiveX);
    let mut lighting = LightingContext::new(&mesh, &env, &fast_config()).unwrap();

    let at_zero = lighting.relight().to_vec();
    assert!(at_zero[0].x > at_zero[1].x);

    lighting.advance(std::f32::consts::PI);
    let turned = lighting.relight().to_vec();
    assert_relative_eq!(turned[0], at_zero[1], epsilon = 1e-3);
    assert_relative_eq!(turned[1], at_zero[0], epsilon = 1e-3);
}

#[test]
fn test_invalid_setup_is_rejected() {
    let env = UniformEnvironment::new(Rgb::new(1.0, 1.0, 1.0));

    let empty = Mesh::new(vec![], vec![], vec![]).unwrap();
    assert!(matches!(
        LightingContext::new(&empty, &env, &fast_config()),
        Err(LightingError::EmptyMesh)
    ));

    let no_workers = LightingConfig {
        worker_threads: 0,
        ..fast_config()
    };
    assert!(matches!(
        LightingContext::new(&up_facing_triangle(), &env, &no_workers),
        Err(LightingError::NoWorkers)
    ));
}
