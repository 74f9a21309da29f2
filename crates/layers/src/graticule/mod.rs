//! Latitude/longitude reference grid drawn over the globe.
//!
//! The layer derives the visible extent from the camera every frame, picks a
//! grid spacing from a fixed table, and rebuilds its lines and labels only
//! when the extent has moved noticeably. Labels slide along their lines to
//! stay near the centre of the view.

pub mod bounds;
mod build;
pub mod config;
pub mod dms;
pub mod error;
pub mod extent;
pub mod spacing;

pub use bounds::GridBounds;
pub use config::GraticuleConfig;
pub use dms::degrees_to_dms;
pub use error::GraticuleError;
pub use extent::{ViewExtent, screen_center};
pub use spacing::{STEP_TABLE, grid_precision, select_spacing};

use foundation::GeoRect;
use runtime::{Clock, ListenerId, Tick};
use scene::ViewProjector;
use serde::Serialize;
use tracing::{debug, trace};

use crate::labels::LabelCollection;
use crate::layer::{Layer, LayerId};
use crate::lines::PolylineCollection;

/// What one frame did to the grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderOutcome {
    /// Lines and labels were cleared and regenerated.
    Rebuilt,
    /// The grid was kept; only label positions moved.
    Refreshed,
}

#[derive(Debug)]
pub struct Graticule {
    id: LayerId,
    config: GraticuleConfig,
    lines: PolylineCollection,
    labels: LabelCollection,
    current_extent: Option<GeoRect>,
    bounds: Option<GridBounds>,
    listener: Option<ListenerId>,
}

impl Graticule {
    pub fn new(id: u64, config: GraticuleConfig) -> Result<Self, GraticuleError> {
        config.validate()?;
        Ok(Self {
            id: LayerId(id),
            config,
            lines: PolylineCollection::new(),
            labels: LabelCollection::new(),
            current_extent: None,
            bounds: None,
            listener: None,
        })
    }

    pub fn config(&self) -> &GraticuleConfig {
        &self.config
    }

    pub fn lines(&self) -> &PolylineCollection {
        &self.lines
    }

    pub fn labels(&self) -> &LabelCollection {
        &self.labels
    }

    /// Extent the current grid was built for.
    pub fn current_extent(&self) -> Option<GeoRect> {
        self.current_extent
    }

    /// Layout the current grid was built from.
    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Start tracking the view: subscribe to the clock and draw immediately.
    pub fn on<V: ViewProjector>(&mut self, clock: &mut Clock, view: &V) -> RenderOutcome {
        if let Some(old) = self.listener.replace(clock.subscribe()) {
            clock.unsubscribe(old);
        }
        self.render(view)
    }

    /// Stop tracking: clear lines and labels and detach from the clock.
    ///
    /// Must follow a matching `on`.
    pub fn off(&mut self, clock: &mut Clock) {
        self.lines.remove_all();
        self.labels.remove_all();
        self.current_extent = None;
        self.bounds = None;
        if let Some(id) = self.listener.take() {
            clock.unsubscribe(id);
        }
    }

    /// Per-frame entry point; does nothing unless this layer is attached.
    pub fn on_tick<V: ViewProjector>(&mut self, tick: &Tick, view: &V) -> Option<RenderOutcome> {
        let id = self.listener?;
        if !tick.notifies(id) {
            return None;
        }
        Some(self.render(view))
    }

    /// Rebuild the grid if the view moved past the threshold, then slide the
    /// labels to the view centre.
    pub fn render<V: ViewProjector>(&mut self, view: &V) -> RenderOutcome {
        let extent = ViewExtent::probe(view, self.config.lines_per_kilopixel);

        let threshold = self.config.refresh_threshold_rad;
        let moved = self
            .current_extent
            .is_none_or(|prev| prev.max_edge_delta(&extent.rect) >= threshold);
        let outcome = if moved || self.labels.is_empty() {
            self.current_extent = Some(extent.rect);
            self.build_grid(&extent.rect, extent.grid_count);
            RenderOutcome::Rebuilt
        } else {
            RenderOutcome::Refreshed
        };

        self.refresh_label_positions(view);
        outcome
    }

    /// Clear the grid and regenerate it for `extent`, targeting `grid_count`
    /// cells along each axis.
    pub fn build_grid(&mut self, extent: &GeoRect, grid_count: f64) {
        let d_lat = select_spacing(extent.height(), grid_count);
        let d_lng = select_spacing(extent.width(), grid_count);
        let bounds = GridBounds::compute(extent, d_lat, d_lng, self.config.padding_steps);

        build::build_grid(&bounds, &self.config, &mut self.lines, &mut self.labels);
        self.bounds = Some(bounds);

        debug!(
            d_lat_deg = d_lat.to_degrees(),
            d_lng_deg = d_lng.to_degrees(),
            wraps = bounds.wraps,
            lines = self.lines.len(),
            labels = self.labels.len(),
            "graticule rebuilt"
        );
    }

    /// Slide every label along its line to the geodetic point under the
    /// viewport centre.
    pub fn refresh_label_positions<V: ViewProjector>(&mut self, view: &V) {
        let center = screen_center(view);
        for label in self.labels.iter_mut() {
            label.slide_to(center);
        }
        trace!(
            lat_deg = center.lat_deg(),
            lon_deg = center.lon_deg(),
            labels = self.labels.len(),
            "graticule labels refreshed"
        );
    }
}

impl Layer for Graticule {
    fn id(&self) -> LayerId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.listener.is_some()
    }
}
