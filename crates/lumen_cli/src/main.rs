//! Command-line driver for the Lumen path tracer.

mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_math::Vec3;
use lumen_renderer::{render, save_png, write_ppm, Camera, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "CPU Monte Carlo path tracer")]
struct Args {
    /// Output image width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Radiance samples per pixel
    #[arg(short, long, default_value_t = 500)]
    samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Seed for scene generation and pixel sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Lens aperture diameter
    #[arg(long, default_value_t = 0.1)]
    aperture: f32,

    /// Output file; .ppm writes plain-text PPM, anything else PNG
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let world = scene::random_scene(&mut rng);
    log::info!("built scene with {} objects in {:?}", world.len(), start.elapsed());

    let mut camera = Camera::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, args.aperture, 10.0)
        .with_aspect_ratio(args.width as f32 / args.height as f32);
    camera.initialize();

    let config = RenderConfig {
        image_width: args.width,
        image_height: args.height,
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        seed: args.seed,
    };

    let start = Instant::now();
    let image = render(&camera, &world, &config).context("render failed")?;
    log::info!("rendered in {:?}", start.elapsed());

    match args.output.extension().and_then(|ext| ext.to_str()) {
        Some("ppm") => {
            let file = File::create(&args.output)
                .with_context(|| format!("creating {}", args.output.display()))?;
            let mut writer = BufWriter::new(file);
            write_ppm(&mut writer, &image)
                .with_context(|| format!("writing {}", args.output.display()))?;
        }
        _ => {
            save_png(&args.output, &image)
                .with_context(|| format!("writing {}", args.output.display()))?;
        }
    }
    log::info!("wrote {}", args.output.display());

    Ok(())
}
