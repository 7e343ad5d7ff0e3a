//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard bounce limit
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - Bucketed parallel rendering over rayon

use crate::bucket::{
    bucket_rng, generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
use crate::sampling::gen_f32;
use crate::{Camera, Color, HitRecord, Hittable};
use lumen_math::{Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;
use thiserror::Error;

/// Offset of the hit search range, so a scattered ray cannot re-intersect
/// the surface it just left (shadow acne).
const T_MIN: f32 = 1e-4;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-bucket sample streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// Errors reported before any rendering work starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("maximum bounce depth must be at least 1")]
    NoDepth,
}

impl RenderConfig {
    /// Check the configuration preconditions.
    ///
    /// Rendering either starts with a valid configuration or not at all;
    /// there is no partial-failure path afterwards.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::NoDepth);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through the
/// scene, bouncing off surfaces and accumulating attenuation until the
/// bounce budget runs out, the ray is absorbed, or it escapes to the sky.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // The bounce limit is a hard cutoff, not Russian roulette
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
        // Ray escaped the scene - the sky is the only light source
        return sky_color(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            // Ray scattered - continue tracing
            let incoming = ray_color(&result.scattered, world, depth - 1, rng);
            result.attenuation * incoming
        }
        None => {
            // Ray was absorbed
            Color::ZERO
        }
    }
}

/// Procedural sky: white at the horizon blending to blue overhead.
fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert an averaged sample color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    // Apply gamma correction and convert to 0-255
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Render a single pixel with multi-sampling.
///
/// Pixel (0, 0) is the top-left corner of the image; viewport t runs
/// bottom-up, so the row index is flipped when mapping to camera
/// coordinates.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / (config.image_width - 1) as f32;
        let t = ((config.image_height - 1 - y) as f32 + gen_f32(rng))
            / (config.image_height - 1) as f32;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Image buffer for storing render output.
///
/// Row 0 is the top scanline; pixels are raster order, row-major.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGB bytes in raster order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the scene to an image buffer, fanning buckets out across the
/// rayon thread pool.
///
/// Each bucket draws from its own deterministically seeded generator, so
/// a fixed `RenderConfig::seed` reproduces the image bit for bit no
/// matter how the buckets are scheduled. All I/O happens after the
/// parallel phase; workers only touch their own bucket's pixels.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let buckets = generate_buckets(config.image_width, config.image_height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "rendering {}x{} at {} spp, {} buckets",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        buckets.len()
    );

    let results: Vec<_> = buckets
        .into_par_iter()
        .map(|bucket| {
            let mut rng = bucket_rng(config.seed, bucket.index);
            let pixels = render_bucket(&bucket, camera, world, config, &mut rng);
            BucketResult::new(bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for result in results {
        let bucket = result.bucket;
        let mut pixel = result.pixels.into_iter();
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                // render_bucket emits row-major within the bucket
                let color = pixel.next().unwrap_or(Color::ZERO);
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    Ok(image)
}
