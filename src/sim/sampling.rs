//! Random sampling helpers on top of the session RNG

use glam::{Quat, Vec3};
use rand::Rng;

/// Uniform point inside the unit sphere (rejection sampled)
pub fn in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere
pub fn on_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = in_unit_sphere(rng);
        // Too close to the origin to normalize reliably
        if p.length_squared() > 1e-4 {
            return p.normalize();
        }
    }
}

/// Uniform random rotation (Shoemake's method)
pub fn rotation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    use std::f32::consts::TAU;

    let u1: f32 = rng.random();
    let u2: f32 = rng.random();
    let u3: f32 = rng.random();
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(
        a * (TAU * u2).sin(),
        a * (TAU * u2).cos(),
        b * (TAU * u3).sin(),
        b * (TAU * u3).cos(),
    )
    .normalize()
}
