//! Demo scene construction.

use lumen_renderer::{Color, HittableList, Material, Sphere, Vec3};
use rand::Rng;
use std::sync::Arc;

fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

/// Build the classic demo scene: a gray ground sphere, a grid of small
/// randomized spheres and three large feature spheres.
pub fn random_scene<R: Rng>(rng: &mut R) -> HittableList {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    // One glass material serves every glass sphere in the scene
    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep the area around the large metal sphere clear
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let radius = rng.gen_range(0.15..0.25);
            if choose_mat < 0.7 {
                // Diffuse
                let albedo = random_color(rng) * random_color(rng);
                world.add(Box::new(Sphere::new(
                    center,
                    radius,
                    Arc::new(Material::lambertian(albedo)),
                )));
            } else if choose_mat < 0.9 {
                // Metal
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                let fuzz = rng.gen_range(0.0..0.5);
                world.add(Box::new(Sphere::new(
                    center,
                    radius,
                    Arc::new(Material::metal(albedo, fuzz)),
                )));
            } else {
                // Glass
                world.add(Box::new(Sphere::new(center, radius, glass.clone())));
            }
        }
    }

    // Three feature spheres
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        rng.gen_range(0.9..1.1),
        glass,
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        rng.gen_range(0.9..1.1),
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        rng.gen_range(0.9..1.1),
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}
