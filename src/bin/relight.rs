//! sh-relight: Relight a mesh from a cubemap with precomputed SH lighting
//!
//! Usage:
//!   sh-relight --model vase.obj --cubemap envs/gradientCube --frames 360 --every 30 --out-dir frames
//!   sh-relight --model vase.obj --cubemap envs/gradientCube --preview env.png

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use sh_relight::io::{load_obj, render_environment_preview, save_relit_ply};
use sh_relight::{Cubemap, LightingConfig, LightingContext};

struct Args {
    model: PathBuf,
    cubemap: PathBuf,
    config: Option<PathBuf>,
    frames: usize,
    every: Option<usize>,
    out_dir: PathBuf,
    preview: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("sh-relight v{}", sh_relight::VERSION);

    let args = parse_args();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {:?}...", path);
            LightingConfig::load(path)?
        }
        None => LightingConfig::default(),
    };

    let mesh = load_obj(&args.model)?;
    let cubemap = Cubemap::load(&args.cubemap)?;

    let mut lighting = LightingContext::new(&mesh, &cubemap, &config)?;

    if let Some(path) = &args.preview {
        let img = render_environment_preview(lighting.environment(), 512, 256);
        img.save(path)?;
        info!("Saved environment preview to {:?}", path);
    }

    std::fs::create_dir_all(&args.out_dir)?;

    // Frame 0 is lit at angle 0; every later frame turns by one step first
    for frame in 0..args.frames {
        if frame > 0 {
            lighting.advance(config.angle_step);
        }
        lighting.relight();

        let last = frame + 1 == args.frames;
        let scheduled = args.every.is_some_and(|k| frame % k == 0);
        if last || scheduled {
            let path = args.out_dir.join(format!("frame_{frame:05}.ply"));
            save_relit_ply(&mesh, lighting.colors(), &path)?;
            info!(
                "Frame {} (angle {:.1}°) saved to {:?}",
                frame,
                lighting.angle().to_degrees(),
                path
            );
        }
    }

    Ok(())
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    let mut model: Option<PathBuf> = None;
    let mut cubemap: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut frames: usize = 1;
    let mut every: Option<usize> = None;
    let mut out_dir = PathBuf::from("relight_output");
    let mut preview: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => model = Some(PathBuf::from(value(&mut args, "--model"))),
            "--cubemap" => cubemap = Some(PathBuf::from(value(&mut args, "--cubemap"))),
            "--config" => config = Some(PathBuf::from(value(&mut args, "--config"))),
            "--frames" => frames = number(&mut args, "--frames"),
            "--every" => every = Some(number(&mut args, "--every")),
            "--out-dir" => out_dir = PathBuf::from(value(&mut args, "--out-dir")),
            "--preview" => preview = Some(PathBuf::from(value(&mut args, "--preview"))),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    }

    let (Some(model), Some(cubemap)) = (model, cubemap) else {
        eprintln!("Error: --model and --cubemap are both required");
        print_help();
        std::process::exit(1);
    };

    if frames == 0 || every == Some(0) {
        eprintln!("Error: --frames and --every must be at least 1");
        std::process::exit(1);
    }

    Args {
        model,
        cubemap,
        config,
        frames,
        every,
        out_dir,
        preview,
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    args.next().unwrap_or_else(|| {
        eprintln!("Error: missing value for {flag}");
        std::process::exit(1);
    })
}

fn number(args: &mut impl Iterator<Item = String>, flag: &str) -> usize {
    let raw = value(args, flag);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: {flag} expects a non-negative integer, got '{raw}'");
        std::process::exit(1);
    })
}

fn print_help() {
    println!(
        r#"sh-relight: Relight a mesh from a cubemap with precomputed SH lighting

USAGE:
    sh-relight --model MESH.obj --cubemap DIR [OPTIONS]

REQUIRED:
    --model PATH        OBJ mesh to relight
    --cubemap DIR       Directory with negativeX.png, positiveX.png, ... positiveZ.png

OPTIONS:
    --config PATH       JSON lighting config (resolutions, worker threads, angle step)
    --frames N          Number of frames to animate [default: 1]
    --every K           Also save every K-th frame
    --out-dir DIR       Where relit PLY frames go [default: relight_output]
    --preview PATH      Save an equirectangular preview of the SH environment
    --help, -h          Print this help message

Set RUST_LOG=debug for per-worker progress.

CONFIG JSON FORMAT (all keys optional):
    {{
        "vertex_resolution": {{ "theta": 16, "phi": 32 }},
        "environment_resolution": {{ "theta": 256, "phi": 512 }},
        "worker_threads": 4,
        "angle_step": 0.017453292
    }}
"#
    );
}
