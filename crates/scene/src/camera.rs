//! Perspective globe camera used to derive the visible geodetic extent.

use foundation::math::{Ecef, Geodetic, Vec3, geodetic_to_ecef};

use crate::picking::{Ray, ray_ellipsoid_hit};
use crate::view::ViewProjector;

/// Default vertical field of view (60°).
pub const DEFAULT_FOV_Y_RAD: f64 = std::f64::consts::FRAC_PI_3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeCamera {
    /// Eye position in ECEF meters.
    pub eye: Vec3,
    /// Unit view direction.
    forward: Vec3,
    /// Unit screen-up direction, orthogonal to `forward`.
    up: Vec3,
    /// Unit screen-right direction.
    right: Vec3,
    pub fov_y_rad: f64,
    viewport_px: [f64; 2],
}

impl GlobeCamera {
    /// Camera at `eye` looking along `dir`, with `up_hint` used to orient the
    /// screen. Returns `None` if `dir` is degenerate or parallel to `up_hint`.
    pub fn with_direction(
        eye: Vec3,
        dir: Vec3,
        up_hint: Vec3,
        viewport_px: [f64; 2],
    ) -> Option<Self> {
        let forward = dir.normalize()?;
        let right = forward.cross(up_hint).normalize()?;
        let up = right.cross(forward);
        Some(Self {
            eye,
            forward,
            up,
            right,
            fov_y_rad: DEFAULT_FOV_Y_RAD,
            viewport_px: sanitize_viewport(viewport_px),
        })
    }

    /// Nadir camera `altitude_m` above `target`, north up, east to the right.
    pub fn looking_down_at(target: Geodetic, altitude_m: f64, viewport_px: [f64; 2]) -> Self {
        let (sin_lat, cos_lat) = target.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = target.lon_rad.sin_cos();

        let normal = Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
        let north = Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let east = Vec3::new(-sin_lon, cos_lon, 0.0);

        let eye = geodetic_to_ecef(Geodetic::new(target.lat_rad, target.lon_rad, altitude_m));
        Self {
            eye: eye.as_vec3(),
            forward: -normal,
            up: north,
            right: east,
            fov_y_rad: DEFAULT_FOV_Y_RAD,
            viewport_px: sanitize_viewport(viewport_px),
        }
    }

    pub fn with_fov_y(mut self, fov_y_rad: f64) -> Self {
        self.fov_y_rad = fov_y_rad;
        self
    }

    pub fn set_viewport(&mut self, viewport_px: [f64; 2]) {
        self.viewport_px = sanitize_viewport(viewport_px);
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// World-space ray through a screen pixel (origin top-left, y down).
    pub fn ray_through(&self, screen_px: [f64; 2]) -> Ray {
        let [w, h] = self.viewport_px;
        let ndc_x = 2.0 * screen_px[0] / w - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_px[1] / h;
        let tan_half = (self.fov_y_rad * 0.5).tan();
        let aspect = w / h;

        let dir = self.forward
            + self.right.scale(ndc_x * tan_half * aspect)
            + self.up.scale(ndc_y * tan_half);
        Ray::new(self.eye, dir)
    }
}

impl ViewProjector for GlobeCamera {
    fn viewport_px(&self) -> [f64; 2] {
        self.viewport_px
    }

    fn pick_ellipsoid(&self, screen_px: [f64; 2]) -> Option<Ecef> {
        ray_ellipsoid_hit(self.ray_through(screen_px))
    }
}

fn sanitize_viewport(viewport_px: [f64; 2]) -> [f64; 2] {
    [viewport_px[0].max(1.0), viewport_px[1].max(1.0)]
}
