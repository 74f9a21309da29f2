use std::f64::consts::{FRAC_PI_2, PI};

use foundation::GeoRect;
use serde::Serialize;

/// Iteration limits for one grid layout.
///
/// Limits are stored as step indices (integer multiples of the spacing), so
/// every line value is an exact multiple and the equator, prime meridian and
/// antimeridian are recognised by index rather than by float comparison.
///
/// When the extent crosses the antimeridian `max_lng_idx` may exceed the
/// half-turn index; longitudes past `PI` are unrolled and must be normalised
/// by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GridBounds {
    pub d_lat: f64,
    pub d_lng: f64,
    pub min_lat_idx: i64,
    pub max_lat_idx: i64,
    pub min_lng_idx: i64,
    pub max_lng_idx: i64,
    pub wraps: bool,
}

impl GridBounds {
    /// Round the extent edges to the spacing, pad by `padding_steps` on every
    /// side and clamp to the globe.
    ///
    /// Edges are truncated toward zero before padding, which moves them by
    /// less than one step, so the padded bounds always enclose the extent.
    pub fn compute(extent: &GeoRect, d_lat: f64, d_lng: f64, padding_steps: u32) -> Self {
        let pad = i64::from(padding_steps);
        let lat_quarter = quarter_turn_steps(d_lat);
        let lng_half = half_turn_steps(d_lng);

        let min_lat_idx = (truncated_index(extent.south, d_lat) - pad).max(-lat_quarter);
        let max_lat_idx = (truncated_index(extent.north, d_lat) + pad).min(lat_quarter);
        let min_lng_idx = (truncated_index(extent.west, d_lng) - pad).max(-lng_half);

        let wraps = extent.wraps();
        let max_lng_idx = if wraps {
            // One full turn at most; the last step would repeat `min_lng_idx`.
            (truncated_index(extent.east_unwrapped(), d_lng) + pad)
                .min(min_lng_idx + 2 * lng_half - 1)
        } else {
            (truncated_index(extent.east, d_lng) + pad).min(lng_half)
        };

        Self {
            d_lat,
            d_lng,
            min_lat_idx,
            max_lat_idx,
            min_lng_idx,
            max_lng_idx: max_lng_idx.max(min_lng_idx),
            wraps,
        }
    }

    pub fn min_lat(&self) -> f64 {
        self.lat_at(self.min_lat_idx)
    }

    pub fn max_lat(&self) -> f64 {
        self.lat_at(self.max_lat_idx)
    }

    pub fn min_lng(&self) -> f64 {
        self.lng_at(self.min_lng_idx)
    }

    /// Upper longitude bound; above `PI` for wrapped bounds.
    pub fn max_lng(&self) -> f64 {
        self.lng_at(self.max_lng_idx)
    }

    pub fn lat_at(&self, idx: i64) -> f64 {
        idx as f64 * self.d_lat
    }

    pub fn lng_at(&self, idx: i64) -> f64 {
        idx as f64 * self.d_lng
    }

    /// Index of the pole parallels (`PI/2 / d_lat`).
    pub fn lat_quarter_turn(&self) -> i64 {
        quarter_turn_steps(self.d_lat)
    }

    /// Index of the antimeridian (`PI / d_lng`).
    pub fn lng_half_turn(&self) -> i64 {
        half_turn_steps(self.d_lng)
    }

    /// Map an unrolled longitude index back into `(-half, half]`.
    pub fn normalize_lng_idx(&self, idx: i64) -> i64 {
        let half = self.lng_half_turn();
        let turn = 2 * half;
        let n = (idx + half).rem_euclid(turn) - half;
        // -half survives only when reached without unrolling, so the caller
        // can recognise the western duplicate of the antimeridian.
        if n == -half && idx != -half { half } else { n }
    }

    /// Step nearest the vertical middle, used to anchor meridian labels.
    pub fn mid_lat_idx(&self) -> i64 {
        self.min_lat_idx + (self.max_lat_idx - self.min_lat_idx) / 2
    }

    /// Step nearest the horizontal middle, used to anchor parallel labels.
    pub fn mid_lng_idx(&self) -> i64 {
        self.min_lng_idx + (self.max_lng_idx - self.min_lng_idx) / 2
    }
}

/// Ratios within this distance of an integer are treated as exact multiples.
const SNAP_EPS: f64 = 1e-9;

fn truncated_index(edge: f64, step: f64) -> i64 {
    let q = edge / step;
    let nearest = q.round();
    if (q - nearest).abs() < SNAP_EPS {
        nearest as i64
    } else {
        q.trunc() as i64
    }
}

fn half_turn_steps(step: f64) -> i64 {
    (PI / step).round() as i64
}

fn quarter_turn_steps(step: f64) -> i64 {
    (FRAC_PI_2 / step).round() as i64
}

#[cfg(test)]
mod tests {
    use super::GridBounds;
    use crate::graticule::spacing::STEP_TABLE;
    use foundation::GeoRect;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    const ONE_DEG: f64 = STEP_TABLE[8];
    const FIVE_DEG: f64 = STEP_TABLE[10];
    const TEN_DEG: f64 = STEP_TABLE[11];

    #[test]
    fn bounds_enclose_extent_with_padding() {
        let extent = GeoRect::from_degrees(-12.5, 3.2, 17.9, 21.4);
        let b = GridBounds::compute(&extent, ONE_DEG, ONE_DEG, 2);
        assert_eq!((b.min_lng_idx, b.max_lng_idx), (-14, 19));
        assert_eq!((b.min_lat_idx, b.max_lat_idx), (1, 23));
        assert!(b.min_lng() <= extent.west);
        assert!(b.max_lng() >= extent.east);
        assert!(b.min_lat() <= extent.south);
        assert!(b.max_lat() >= extent.north);
        assert!(!b.wraps);
    }

    #[test]
    fn whole_globe_is_clamped() {
        let b = GridBounds::compute(&GeoRect::MAX, TEN_DEG, TEN_DEG, 2);
        assert_eq!((b.min_lng_idx, b.max_lng_idx), (-18, 18));
        assert_eq!((b.min_lat_idx, b.max_lat_idx), (-9, 9));
        assert_close(b.min_lng().to_degrees(), -180.0, 1e-9);
        assert_close(b.max_lat().to_degrees(), 90.0, 1e-9);
    }

    #[test]
    fn wrapped_extent_iterates_monotonically_past_antimeridian() {
        let extent = GeoRect::from_degrees(170.0, -10.0, -170.0, 10.0);
        let b = GridBounds::compute(&extent, FIVE_DEG, FIVE_DEG, 2);
        assert!(b.wraps);
        assert_eq!(b.min_lng_idx, 32);
        assert_eq!(b.max_lng_idx, 40);
        assert!(b.max_lng() > b.min_lng());
        assert_close(b.max_lng().to_degrees(), 200.0, 1e-9);
    }

    #[test]
    fn wrapped_bounds_never_exceed_one_turn() {
        let extent = GeoRect::from_degrees(-175.0, -10.0, -176.0, 10.0);
        let b = GridBounds::compute(&extent, TEN_DEG, TEN_DEG, 2);
        assert!(b.wraps);
        assert_eq!(b.max_lng_idx - b.min_lng_idx, 2 * b.lng_half_turn() - 1);
    }

    #[test]
    fn normalize_lng_idx_folds_unrolled_steps() {
        let b = GridBounds::compute(&GeoRect::MAX, TEN_DEG, TEN_DEG, 2);
        assert_eq!(b.normalize_lng_idx(18), 18);
        assert_eq!(b.normalize_lng_idx(19), -17);
        assert_eq!(b.normalize_lng_idx(-18), -18);
        assert_eq!(b.normalize_lng_idx(36), 0);
        assert_eq!(b.normalize_lng_idx(54), 18);
        assert_eq!(b.normalize_lng_idx(5), 5);
    }

    #[test]
    fn mid_indices_sit_between_bounds() {
        let extent = GeoRect::from_degrees(0.0, 0.0, 20.0, 10.0);
        let b = GridBounds::compute(&extent, ONE_DEG, ONE_DEG, 2);
        assert_eq!(b.mid_lat_idx(), -2 + (12 + 2) / 2);
        assert_eq!(b.mid_lng_idx(), -2 + (22 + 2) / 2);
    }
}
