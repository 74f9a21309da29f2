use foundation::math::{Ecef, Geodetic, geodetic_to_ecef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font: String,
    pub font_size_px: f32,
    pub color: [f32; 4],
    pub halo_color: [f32; 4],
    pub halo_width_px: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: "bold Arial".to_string(),
            font_size_px: 16.0,
            color: [1.0, 1.0, 1.0, 1.0],
            halo_color: [0.0, 0.0, 0.0, 1.0],
            halo_width_px: 4.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalOrigin {
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalOrigin {
    Top,
    Center,
    Bottom,
}

/// Screen-space placement of a label relative to its anchor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub pixel_offset_px: [f32; 2],
    pub horizontal: HorizontalOrigin,
    pub vertical: VerticalOrigin,
}

impl LabelPlacement {
    /// Parallel labels sit just above their line; meridian labels just right of it.
    pub fn for_axis(is_lat: bool) -> Self {
        if is_lat {
            Self {
                pixel_offset_px: [0.0, -6.0],
                horizontal: HorizontalOrigin::Center,
                vertical: VerticalOrigin::Bottom,
            }
        } else {
            Self {
                pixel_offset_px: [4.0, 0.0],
                horizontal: HorizontalOrigin::Center,
                vertical: VerticalOrigin::Top,
            }
        }
    }
}

/// Text anchored to one grid line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLabel {
    pub text: String,
    /// True for parallels (fixed latitude), false for meridians.
    pub is_lat: bool,
    pub style: LabelStyle,
    pub placement: LabelPlacement,
    geodetic: Geodetic,
    #[serde(skip)]
    position: Ecef,
}

impl GridLabel {
    pub fn new(text: impl Into<String>, anchor: Geodetic, is_lat: bool, style: LabelStyle) -> Self {
        let geodetic = Geodetic::surface(anchor.lat_rad, anchor.lon_rad);
        Self {
            text: text.into(),
            is_lat,
            style,
            placement: LabelPlacement::for_axis(is_lat),
            geodetic,
            position: geodetic_to_ecef(geodetic),
        }
    }

    pub fn geodetic(&self) -> Geodetic {
        self.geodetic
    }

    pub fn position(&self) -> Ecef {
        self.position
    }

    /// Slide the label along its own line towards `center`.
    ///
    /// The fixed coordinate of the line is kept; the other one is taken from
    /// `center`.
    pub fn slide_to(&mut self, center: Geodetic) {
        if self.is_lat {
            self.geodetic.lon_rad = center.lon_rad;
        } else {
            self.geodetic.lat_rad = center.lat_rad;
        }
        self.position = geodetic_to_ecef(self.geodetic);
    }
}

/// Label set owned by one layer.
///
/// `generation` advances on every `remove_all`, so callers can tell a rebuilt
/// collection from one whose labels only moved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelCollection {
    labels: Vec<GridLabel>,
    generation: u64,
}

impl LabelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: GridLabel) -> usize {
        self.labels.push(label);
        self.labels.len() - 1
    }

    pub fn remove_all(&mut self) {
        self.labels.clear();
        self.generation += 1;
    }

    pub fn get(&self, index: usize) -> Option<&GridLabel> {
        self.labels.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridLabel> {
        self.labels.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, GridLabel> {
        self.labels.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn latitude_label_slides_in_longitude_only() {
        let mut label = GridLabel::new(
            "10°N",
            Geodetic::from_degrees(10.0, 5.0, 0.0),
            true,
            LabelStyle::default(),
        );
        label.slide_to(Geodetic::from_degrees(-30.0, 42.0, 0.0));
        assert_close(label.geodetic().lat_deg(), 10.0, 1e-12);
        assert_close(label.geodetic().lon_deg(), 42.0, 1e-12);
        assert_eq!(
            label.position(),
            geodetic_to_ecef(Geodetic::from_degrees(10.0, 42.0, 0.0))
        );
    }

    #[test]
    fn longitude_label_slides_in_latitude_only() {
        let mut label = GridLabel::new(
            "20°W",
            Geodetic::from_degrees(0.0, -20.0, 0.0),
            false,
            LabelStyle::default(),
        );
        label.slide_to(Geodetic::from_degrees(35.0, 100.0, 0.0));
        assert_close(label.geodetic().lat_deg(), 35.0, 1e-12);
        assert_close(label.geodetic().lon_deg(), -20.0, 1e-12);
    }

    #[test]
    fn remove_all_advances_generation() {
        let mut labels = LabelCollection::new();
        let g0 = labels.generation();
        labels.add(GridLabel::new("x", Geodetic::ORIGIN, true, LabelStyle::default()));
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.generation(), g0);
        labels.remove_all();
        assert!(labels.is_empty());
        assert_eq!(labels.generation(), g0 + 1);
    }

    #[test]
    fn placement_depends_on_axis() {
        assert_eq!(LabelPlacement::for_axis(true).vertical, VerticalOrigin::Bottom);
        assert_eq!(LabelPlacement::for_axis(false).vertical, VerticalOrigin::Top);
        assert_eq!(LabelPlacement::for_axis(false).pixel_offset_px, [4.0, 0.0]);
    }
}
