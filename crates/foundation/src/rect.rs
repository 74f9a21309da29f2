use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::math::Geodetic;

/// Geodetic bounding rectangle in radians.
///
/// Longitudes are in `[-PI, PI]`. A rectangle that crosses the antimeridian
/// has `east < west`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoRect {
    /// The whole globe.
    pub const MAX: Self = Self {
        west: -PI,
        south: -FRAC_PI_2,
        east: PI,
        north: FRAC_PI_2,
    };

    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::new(
            west.to_radians(),
            south.to_radians(),
            east.to_radians(),
            north.to_radians(),
        )
    }

    /// Smallest rectangle enclosing `points`.
    ///
    /// Longitudes are measured both directly and shifted into `[0, 2PI)`; the
    /// narrower of the two wins, so a cluster of points straddling the
    /// antimeridian yields a wrapped rectangle rather than one spanning the
    /// whole globe.
    pub fn from_geodetic(points: &[Geodetic]) -> Option<Self> {
        let first = points.first()?;

        let mut west = first.lon_rad;
        let mut east = first.lon_rad;
        let mut west_idl = shift_lon(first.lon_rad);
        let mut east_idl = west_idl;
        let mut south = first.lat_rad;
        let mut north = first.lat_rad;

        for p in &points[1..] {
            west = west.min(p.lon_rad);
            east = east.max(p.lon_rad);
            let shifted = shift_lon(p.lon_rad);
            west_idl = west_idl.min(shifted);
            east_idl = east_idl.max(shifted);
            south = south.min(p.lat_rad);
            north = north.max(p.lat_rad);
        }

        if east - west > east_idl - west_idl {
            west = west_idl;
            east = east_idl;
            if east > PI {
                east -= TAU;
            }
            if west > PI {
                west -= TAU;
            }
        }

        Some(Self::new(west, south, east, north))
    }

    /// True when the rectangle crosses the antimeridian.
    pub fn wraps(&self) -> bool {
        self.east < self.west
    }

    /// East edge unrolled past `PI` for wrapped rectangles, so that
    /// `west..east_unwrapped` is increasing.
    pub fn east_unwrapped(&self) -> f64 {
        if self.wraps() {
            self.east + TAU
        } else {
            self.east
        }
    }

    pub fn width(&self) -> f64 {
        self.east_unwrapped() - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Largest absolute difference between corresponding edges.
    pub fn max_edge_delta(&self, other: &Self) -> f64 {
        (self.west - other.west)
            .abs()
            .max((self.south - other.south).abs())
            .max((self.east - other.east).abs())
            .max((self.north - other.north).abs())
    }
}

fn shift_lon(lon: f64) -> f64 {
    if lon < 0.0 { lon + TAU } else { lon }
}

#[cfg(test)]
mod tests {
    use super::GeoRect;
    use crate::math::Geodetic;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn from_geodetic_encloses_points() {
        let pts = [
            Geodetic::from_degrees(10.0, -5.0, 0.0),
            Geodetic::from_degrees(-20.0, 30.0, 0.0),
            Geodetic::from_degrees(5.0, 12.0, 0.0),
        ];
        let r = GeoRect::from_geodetic(&pts).unwrap();
        assert_close(r.west.to_degrees(), -5.0, 1e-12);
        assert_close(r.east.to_degrees(), 30.0, 1e-12);
        assert_close(r.south.to_degrees(), -20.0, 1e-12);
        assert_close(r.north.to_degrees(), 10.0, 1e-12);
        assert!(!r.wraps());
    }

    #[test]
    fn from_geodetic_prefers_antimeridian_crossing_when_narrower() {
        let pts = [
            Geodetic::from_degrees(0.0, 170.0, 0.0),
            Geodetic::from_degrees(10.0, -170.0, 0.0),
        ];
        let r = GeoRect::from_geodetic(&pts).unwrap();
        assert!(r.wraps());
        assert_close(r.west.to_degrees(), 170.0, 1e-9);
        assert_close(r.east.to_degrees(), -170.0, 1e-9);
        assert_close(r.width().to_degrees(), 20.0, 1e-9);
    }

    #[test]
    fn from_geodetic_empty_is_none() {
        assert_eq!(GeoRect::from_geodetic(&[]), None);
    }

    #[test]
    fn max_edge_delta_picks_largest_edge() {
        let a = GeoRect::new(0.0, 0.0, 1.0, 1.0);
        let b = GeoRect::new(0.0005, 0.0, 1.0, 1.002);
        assert_close(a.max_edge_delta(&b), 0.002, 1e-12);
        assert_eq!(a.max_edge_delta(&a), 0.0);
    }

    #[test]
    fn whole_globe_width_and_height() {
        assert_close(GeoRect::MAX.width(), std::f64::consts::TAU, 1e-12);
        assert_close(GeoRect::MAX.height(), std::f64::consts::PI, 1e-12);
        assert!(!GeoRect::MAX.wraps());
    }
}
