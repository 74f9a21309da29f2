use foundation::GeoRect;
use foundation::math::{Geodetic, ecef_to_geodetic};
use scene::ViewProjector;
use serde::Serialize;
use tracing::trace;

use crate::graticule::spacing::target_grid_count;

/// Visible extent for one frame plus the grid density it calls for.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ViewExtent {
    pub rect: GeoRect,
    /// Target number of grid cells across the view.
    pub grid_count: f64,
    /// True when a probe missed the ellipsoid and `rect` is the whole globe.
    pub whole_globe: bool,
}

impl ViewExtent {
    /// Probe the corners of a square as wide as the larger viewport side.
    ///
    /// If any probe misses the ellipsoid the whole globe is returned and the
    /// grid density is derived from the smaller side instead.
    pub fn probe<V: ViewProjector>(view: &V, lines_per_kilopixel: f64) -> Self {
        let [w, h] = view.viewport_px();
        let side = w.max(h);

        let probes = [[0.0, 0.0], [side, 0.0], [0.0, side], [side, side]];
        let mut corners = Vec::with_capacity(probes.len());
        for px in probes {
            let Some(hit) = view.pick_ellipsoid(px) else {
                trace!(x = px[0], y = px[1], "extent probe missed the ellipsoid");
                return Self {
                    rect: GeoRect::MAX,
                    grid_count: target_grid_count(w.min(h), lines_per_kilopixel),
                    whole_globe: true,
                };
            };
            corners.push(ecef_to_geodetic(hit));
        }

        Self {
            rect: GeoRect::from_geodetic(&corners).unwrap_or(GeoRect::MAX),
            grid_count: target_grid_count(side, lines_per_kilopixel),
            whole_globe: false,
        }
    }
}

/// Geodetic position under the viewport centre, or 0°N 0°E when the centre
/// misses the ellipsoid.
pub fn screen_center<V: ViewProjector>(view: &V) -> Geodetic {
    match view.pick_ellipsoid(view.screen_center_px()) {
        Some(hit) => {
            let geo = ecef_to_geodetic(hit);
            Geodetic::surface(geo.lat_rad, geo.lon_rad)
        }
        None => {
            trace!("screen centre missed the ellipsoid, using 0°N 0°E");
            Geodetic::ORIGIN
        }
    }
}
