use foundation::math::{Geodetic, normalize_lon};

use crate::graticule::bounds::GridBounds;
use crate::graticule::config::GraticuleConfig;
use crate::graticule::dms::degrees_to_dms;
use crate::graticule::spacing::{grid_precision, round_to};
use crate::labels::{GridLabel, LabelCollection};
use crate::lines::{GridAxis, GridLine, PolylineCollection};

/// Which reference line a grid line is, if any.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Landmark {
    Equator,
    PrimeMeridian,
    Antimeridian,
}

impl Landmark {
    fn name(self) -> &'static str {
        match self {
            Landmark::Equator => "Equator",
            Landmark::PrimeMeridian => "Prime Meridian",
            Landmark::Antimeridian => "Antimeridian",
        }
    }
}

/// Clear `lines` and `labels` and fill them with the grid for `bounds`.
pub(crate) fn build_grid(
    bounds: &GridBounds,
    config: &GraticuleConfig,
    lines: &mut PolylineCollection,
    labels: &mut LabelCollection,
) {
    lines.remove_all();
    labels.remove_all();

    let granularity = config.tessellation_deg.to_radians();
    build_meridians(bounds, config, granularity, lines, labels);
    build_parallels(bounds, config, granularity, lines, labels);
}

fn build_meridians(
    bounds: &GridBounds,
    config: &GraticuleConfig,
    granularity: f64,
    lines: &mut PolylineCollection,
    labels: &mut LabelCollection,
) {
    let half = bounds.lng_half_turn();
    let precision = spacing_precision(bounds.d_lng);
    let label_lat = bounds.lat_at(bounds.mid_lat_idx());
    let (min_lat, max_lat) = (bounds.min_lat(), bounds.max_lat());

    let mut ordinal = 0usize;
    for idx in bounds.min_lng_idx..=bounds.max_lng_idx {
        let mut norm = bounds.normalize_lng_idx(idx);
        if norm == -half {
            if bounds.max_lng_idx >= half {
                // 180°W duplicates 180°E, which is drawn later.
                continue;
            }
            norm = half;
        }
        let lng = bounds.lng_at(norm);
        let landmark = match norm {
            0 => Some(Landmark::PrimeMeridian),
            n if n == half => Some(Landmark::Antimeridian),
            _ => None,
        };

        let path = tessellate(min_lat, max_lat, granularity)
            .map(|lat| Geodetic::surface(lat, lng))
            .collect();
        lines.add(grid_line(GridAxis::Meridian, lng, path, landmark, config));

        if ordinal % 2 == 1 {
            let text = label_text(lng.to_degrees(), precision, false, landmark, config);
            labels.add(GridLabel::new(
                text,
                Geodetic::surface(label_lat, lng),
                false,
                config.label_style.clone(),
            ));
        }
        ordinal += 1;
    }
}

fn build_parallels(
    bounds: &GridBounds,
    config: &GraticuleConfig,
    granularity: f64,
    lines: &mut PolylineCollection,
    labels: &mut LabelCollection,
) {
    let quarter = bounds.lat_quarter_turn();
    let precision = spacing_precision(bounds.d_lat);
    let label_lng = normalize_lon(bounds.lng_at(bounds.mid_lng_idx()));
    let (min_lng, max_lng) = (bounds.min_lng(), bounds.max_lng());

    let mut ordinal = 0usize;
    for idx in bounds.min_lat_idx..=bounds.max_lat_idx {
        if idx.abs() >= quarter {
            // Parallels at the poles collapse to a point.
            continue;
        }
        let lat = bounds.lat_at(idx);
        let landmark = (idx == 0).then_some(Landmark::Equator);

        let path = tessellate(min_lng, max_lng, granularity)
            .map(|lng| Geodetic::surface(lat, normalize_lon(lng)))
            .collect();
        lines.add(grid_line(GridAxis::Parallel, lat, path, landmark, config));

        if ordinal % 2 == 1 {
            let text = label_text(lat.to_degrees(), precision, true, landmark, config);
            labels.add(GridLabel::new(
                text,
                Geodetic::surface(lat, label_lng),
                true,
                config.label_style.clone(),
            ));
        }
        ordinal += 1;
    }
}

fn grid_line(
    axis: GridAxis,
    value_rad: f64,
    path: Vec<Geodetic>,
    landmark: Option<Landmark>,
    config: &GraticuleConfig,
) -> GridLine {
    let style = if landmark.is_some() {
        config.highlight_style()
    } else {
        config.line_style()
    };
    GridLine::new(axis, value_rad, path, style).highlighted(landmark.is_some())
}

fn label_text(
    value_deg: f64,
    precision: usize,
    is_lat: bool,
    landmark: Option<Landmark>,
    config: &GraticuleConfig,
) -> String {
    match landmark {
        Some(landmark) if config.label_meridians => landmark.name().to_string(),
        _ => degrees_to_dms(round_to(value_deg, precision), is_lat),
    }
}

fn spacing_precision(spacing_rad: f64) -> usize {
    // Table steps are exact in degrees; strip the radian round-trip noise.
    grid_precision(round_to(spacing_rad.to_degrees(), 6))
}

/// Points from `start` toward `end` every `step`, always ending exactly on
/// `end`.
fn tessellate(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if end > start {
        ((end - start) / step).ceil() as usize
    } else {
        0
    };
    (0..count)
        .map(move |i| start + i as f64 * step)
        .filter(move |&v| v < end)
        .chain(std::iter::once(end))
}
