//! Material model for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Result of a successful scatter: the surviving fraction of light per
/// channel and the outgoing ray.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// The closed set of surface behaviors.
///
/// A sphere holds one of these by shared reference; scattering is an
/// exhaustive match, so adding a variant is a compile error until every
/// use site handles it.
#[derive(Debug, Clone)]
pub enum Material {
    /// Diffuse surface scattering around the normal.
    Lambertian { albedo: Color },
    /// Mirror reflection, roughened by a fuzz factor in [0, 1].
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive surface (glass, water) with the given index of
    /// refraction.
    Dielectric { ior: f32 },
}

impl Material {
    /// Create a Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: the color of the metal
    /// - `fuzz`: roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric material.
    ///
    /// - `ior`: index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn dielectric(ior: f32) -> Self {
        Self::Dielectric { ior }
    }

    /// Scatter an incoming ray at a surface hit.
    ///
    /// Returns the attenuation and scattered ray, or None if the ray is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if scatter_direction.length_squared() < 1e-8 {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

                // Only scatter if the reflected ray is in the same
                // hemisphere as the normal; a fuzzed reflection below the
                // horizon is extinguished
                if scattered_dir.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, scattered_dir),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { ior } => {
                let refraction_ratio = if rec.front_face { 1.0 / ior } else { ior };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Check for total internal reflection
                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction =
                    if cannot_refract || reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
                        reflect(unit_direction, rec.normal)
                    } else {
                        refract(unit_direction, rec.normal, refraction_ratio)
                    };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn front_hit(normal: Vec3, material: &Material) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material,
            t: 1.0,
            front_face: true,
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let mat = Material::lambertian(Color::new(0.8, 0.3, 0.2));
        let rec = front_hit(Vec3::Y, &mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.2));
            assert!(result.scattered.direction().length_squared() > 0.0);
        }
    }

    #[test]
    fn test_attenuation_in_unit_range() {
        let lambertian = Material::lambertian(Color::new(0.1, 0.5, 0.9));
        let metal = Material::metal(Color::new(0.7, 0.6, 0.5), 0.2);
        let mut rng = StdRng::seed_from_u64(12);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.1));

        for mat in [&lambertian, &metal] {
            let rec = front_hit(Vec3::Y, mat);
            if let Some(result) = mat.scatter(&ray, &rec, &mut rng) {
                for channel in result.attenuation.to_array() {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }

    #[test]
    fn test_dielectric_attenuation_is_white() {
        let mat = Material::dielectric(1.5);
        let rec = front_hit(Vec3::Y, &mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..100 {
            // Never absorbed, regardless of the reflect/refract choice
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_metal_absorbs_tangent_reflection() {
        // Incoming direction perpendicular to the normal reflects to
        // itself, so scattered.dot(normal) is exactly zero
        let mat = Material::metal(Color::new(0.9, 0.9, 0.9), 0.0);
        let rec = front_hit(Vec3::Y, &mat);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(14);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Material::metal(Color::new(0.9, 0.9, 0.9), 0.0);
        let rec = front_hit(Vec3::Y, &mat);
        // 45 degree incidence in the xz=0 plane
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(15);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let dir = result.scattered.direction().normalize();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((dir - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        match Material::metal(Color::ONE, 7.5) {
            Material::Metal { fuzz, .. } => assert_eq!(fuzz, 1.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Exiting glass at a grazing angle: refraction_ratio * sin_theta > 1
        let mat = Material::dielectric(1.5);
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            material: &mat,
            t: 1.0,
            front_face: false,
        };
        let incoming = Vec3::new(0.9, -0.1, 0.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), incoming);
        let mut rng = StdRng::seed_from_u64(16);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        // Reflection keeps the direction above the surface
        let expected = reflect(incoming, Vec3::Y);
        assert!((result.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_refract_straight_through() {
        // Normal incidence is unchanged by refraction
        let refracted = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5);
        assert!((refracted - -Vec3::Y).length() < 1e-6);
    }
}
