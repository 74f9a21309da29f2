use serde::{Deserialize, Serialize};

use crate::graticule::error::GraticuleError;
use crate::labels::LabelStyle;
use crate::lines::LineStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraticuleConfig {
    /// Target grid lines per 1000 viewport pixels.
    pub lines_per_kilopixel: f64,
    /// Minimum edge movement (radians) that triggers a rebuild.
    pub refresh_threshold_rad: f64,
    /// Extra steps drawn beyond each extent edge, covering tiles that have
    /// not refreshed yet.
    pub padding_steps: u32,
    /// Angular distance between tessellated points along a line.
    pub tessellation_deg: f64,
    /// Name the equator, prime meridian and antimeridian instead of
    /// printing their coordinates.
    pub label_meridians: bool,
    pub line_width_px: f32,
    pub line_color: [f32; 4],
    /// Colour of the equator, prime meridian and antimeridian.
    pub highlight_color: [f32; 4],
    pub label_style: LabelStyle,
}

impl Default for GraticuleConfig {
    fn default() -> Self {
        Self {
            lines_per_kilopixel: 25.0,
            refresh_threshold_rad: 0.001,
            padding_steps: 2,
            tessellation_deg: 1.0,
            label_meridians: false,
            line_width_px: 0.5,
            line_color: [1.0, 1.0, 1.0, 0.5],
            highlight_color: [1.0, 1.0, 0.0, 1.0],
            label_style: LabelStyle::default(),
        }
    }
}

impl GraticuleConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, GraticuleError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GraticuleError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GraticuleError> {
        if !(self.lines_per_kilopixel.is_finite() && self.lines_per_kilopixel > 0.0) {
            return Err(GraticuleError::InvalidConfig(format!(
                "lines_per_kilopixel must be positive, got {}",
                self.lines_per_kilopixel
            )));
        }
        if !(self.refresh_threshold_rad.is_finite() && self.refresh_threshold_rad >= 0.0) {
            return Err(GraticuleError::InvalidConfig(format!(
                "refresh_threshold_rad must be non-negative, got {}",
                self.refresh_threshold_rad
            )));
        }
        if !(self.tessellation_deg.is_finite()
            && self.tessellation_deg > 0.0
            && self.tessellation_deg <= 90.0)
        {
            return Err(GraticuleError::InvalidConfig(format!(
                "tessellation_deg must be in (0, 90], got {}",
                self.tessellation_deg
            )));
        }
        if !(self.line_width_px.is_finite() && self.line_width_px > 0.0) {
            return Err(GraticuleError::InvalidConfig(format!(
                "line_width_px must be positive, got {}",
                self.line_width_px
            )));
        }
        Ok(())
    }

    pub fn line_style(&self) -> LineStyle {
        LineStyle::new(self.line_width_px, self.line_color)
    }

    pub fn highlight_style(&self) -> LineStyle {
        LineStyle::new(self.line_width_px, self.highlight_color)
    }
}

#[cfg(test)]
mod tests {
    use super::GraticuleConfig;
    use crate::graticule::error::GraticuleError;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GraticuleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GraticuleConfig::from_json_str(r#"{ "label_meridians": true }"#).unwrap();
        assert!(cfg.label_meridians);
        assert_eq!(cfg.lines_per_kilopixel, 25.0);
        assert_eq!(cfg.padding_steps, 2);
        assert_eq!(cfg.label_style.halo_width_px, 4.0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GraticuleConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, GraticuleError::Parse(_)));
    }

    #[test]
    fn non_positive_density_is_rejected() {
        let err = GraticuleConfig::from_json_str(r#"{ "lines_per_kilopixel": 0 }"#).unwrap_err();
        assert!(matches!(err, GraticuleError::InvalidConfig(_)));
        assert!(err.to_string().contains("lines_per_kilopixel"));
    }

    #[test]
    fn tessellation_must_be_positive() {
        let cfg = GraticuleConfig {
            tessellation_deg: 0.0,
            ..GraticuleConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
