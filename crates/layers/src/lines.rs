use foundation::math::{Ecef, Geodetic, geodetic_to_ecef};
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width_px: f32,
    pub color: [f32; 4],
}

impl LineStyle {
    pub const fn new(width_px: f32, color: [f32; 4]) -> Self {
        Self { width_px, color }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width_px: 1.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridAxis {
    /// Line of constant longitude.
    Meridian,
    /// Line of constant latitude.
    Parallel,
}

/// One tessellated meridian or parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub axis: GridAxis,
    /// The fixed coordinate of the line (radians).
    pub value_rad: f64,
    pub highlighted: bool,
    pub style: LineStyle,
    pub path: Vec<Geodetic>,
    #[serde(skip)]
    pub positions: Vec<Ecef>,
}

impl GridLine {
    pub fn new(axis: GridAxis, value_rad: f64, path: Vec<Geodetic>, style: LineStyle) -> Self {
        let positions = path.iter().copied().map(geodetic_to_ecef).collect();
        Self {
            axis,
            value_rad,
            highlighted: false,
            style,
            path,
            positions,
        }
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

/// Polyline set owned by one layer. See `LabelCollection` for `generation`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PolylineCollection {
    lines: Vec<GridLine>,
    generation: u64,
}

impl PolylineCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, line: GridLine) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    pub fn remove_all(&mut self) {
        self.lines.clear();
        self.generation += 1;
    }

    pub fn get(&self, index: usize) -> Option<&GridLine> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_projects_path_to_ecef() {
        let path = vec![
            Geodetic::from_degrees(0.0, 0.0, 0.0),
            Geodetic::from_degrees(1.0, 0.0, 0.0),
        ];
        let line = GridLine::new(GridAxis::Meridian, 0.0, path.clone(), LineStyle::default());
        assert_eq!(line.positions.len(), 2);
        assert_eq!(line.positions[1], geodetic_to_ecef(path[1]));
        assert!(!line.highlighted);
    }

    #[test]
    fn remove_all_clears_and_advances_generation() {
        let mut lines = PolylineCollection::new();
        lines.add(GridLine::new(GridAxis::Parallel, 0.0, Vec::new(), LineStyle::default()));
        lines.remove_all();
        assert!(lines.is_empty());
        assert_eq!(lines.generation(), 1);
    }
}
