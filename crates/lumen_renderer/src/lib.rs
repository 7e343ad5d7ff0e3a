//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for sphere scenes lit by a procedural sky.
//! Rays are jittered per pixel, bounced recursively through the scene and
//! averaged into gamma-corrected output.

mod bucket;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
mod sampling;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Material, ScatterResult};
pub use output::{save_png, write_ppm};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
    RenderError,
};
pub use sphere::Sphere;

/// Re-export the math types the renderer API speaks in
pub use lumen_math::{Interval, Ray, Vec3};
