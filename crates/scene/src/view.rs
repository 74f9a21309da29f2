use foundation::math::Ecef;

/// Camera/projection service the overlay layers read each frame.
///
/// Screen coordinates are pixels with the origin at the top-left corner.
pub trait ViewProjector {
    /// Viewport size in pixels `[width, height]`.
    fn viewport_px(&self) -> [f64; 2];

    /// Unproject a screen point onto the ellipsoid surface.
    ///
    /// Returns `None` when the view ray misses the ellipsoid.
    fn pick_ellipsoid(&self, screen_px: [f64; 2]) -> Option<Ecef>;

    /// Pixel at the centre of the viewport, rounded like a canvas would.
    fn screen_center_px(&self) -> [f64; 2] {
        let [w, h] = self.viewport_px();
        [(w / 2.0).round(), (h / 2.0).round()]
    }
}
