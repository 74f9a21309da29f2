use foundation::math::{Ecef, Vec3, WGS84_A, WGS84_B};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

/// First intersection of `ray` with the WGS84 ellipsoid.
///
/// Notes:
/// - The direction does not need to be normalized.
/// - Hits behind the origin are ignored; a ray starting inside the ellipsoid
///   returns its exit point.
/// - Returns `None` when the ray misses or points away from the ellipsoid.
pub fn ray_ellipsoid_hit(ray: Ray) -> Option<Ecef> {
    // Scale into a unit-sphere space: x/A, y/A, z/B.
    let o = Vec3::new(
        ray.origin.x / WGS84_A,
        ray.origin.y / WGS84_A,
        ray.origin.z / WGS84_B,
    );
    let d = Vec3::new(ray.dir.x / WGS84_A, ray.dir.y / WGS84_A, ray.dir.z / WGS84_B);

    let a = d.dot(d);
    if a <= 0.0 || !a.is_finite() {
        return None;
    }
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - 1.0;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let t0 = (-b - sqrt_disc) / (2.0 * a);
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t = if t0 >= 0.0 {
        t0
    } else if t1 >= 0.0 {
        t1
    } else {
        return None;
    };

    Some(Ecef::from(ray.at(t)))
}
