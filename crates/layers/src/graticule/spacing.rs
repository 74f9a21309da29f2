use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Candidate grid spacings in radians, ascending.
pub const STEP_TABLE: [f64; 12] = [
    0.0005 * DEG,
    0.001 * DEG,
    0.005 * DEG,
    0.01 * DEG,
    0.05 * DEG,
    0.1 * DEG,
    0.2 * DEG,
    0.5 * DEG,
    1.0 * DEG,
    2.0 * DEG,
    5.0 * DEG,
    10.0 * DEG,
];

/// Target number of grid cells across `pixels`.
pub fn target_grid_count(pixels: f64, lines_per_kilopixel: f64) -> f64 {
    pixels / 1000.0 * lines_per_kilopixel
}

/// Smallest table spacing that divides `span` into at most `target_count`
/// cells, falling back to the coarsest entry.
///
/// The result is always a `STEP_TABLE` value, so the grid does not jitter as
/// the span changes gradually.
pub fn select_spacing(span: f64, target_count: f64) -> f64 {
    let coarsest = STEP_TABLE[STEP_TABLE.len() - 1];
    if target_count.is_nan() || target_count <= 0.0 {
        return coarsest;
    }
    let wanted = span / target_count;
    if !wanted.is_finite() {
        return coarsest;
    }
    STEP_TABLE
        .iter()
        .copied()
        .find(|&step| step >= wanted)
        .unwrap_or(coarsest)
}

/// Decimal places worth showing for labels at `spacing_deg`.
pub fn grid_precision(spacing_deg: f64) -> usize {
    if spacing_deg < 0.01 {
        3
    } else if spacing_deg < 0.1 {
        2
    } else if spacing_deg < 1.0 {
        1
    } else {
        0
    }
}

/// Round `value` to `decimals` places.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
