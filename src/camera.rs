use crate::sky::SkyPoint;
use crate::surface::{CanvasSize, ScreenPoint};

pub(crate) const MIN_ZOOM: f64 = 0.05;
pub(crate) const MAX_ZOOM: f64 = 500.0;
pub(crate) const ZOOM_STEP: f64 = 1.1;

/// Pan and zoom applied on top of the sky plane.
///
/// `offset_x` / `offset_y` are sky-plane pixels that land on the canvas
/// center. `zoom` stays in `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Camera {
    pub(crate) zoom: f64,
    pub(crate) offset_x: f64,
    pub(crate) offset_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Camera {
    pub(crate) fn world_to_screen(&self, p: SkyPoint, canvas: CanvasSize) -> ScreenPoint {
        let c = canvas.center();
        ScreenPoint {
            x: c.x + (p.x - self.offset_x) * self.zoom,
            y: c.y + (p.y - self.offset_y) * self.zoom,
        }
    }

    /// Center on `(x, y)` at `zoom` in one step. Returns false and leaves the
    /// camera alone when any input is unusable.
    pub(crate) fn zoom_to(&mut self, x: f64, y: f64, zoom: f64) -> bool {
        if !x.is_finite() || !y.is_finite() || !usable_zoom(zoom) {
            tracing::warn!(x, y, zoom, "rejected camera jump");
            return false;
        }
        self.offset_x = x;
        self.offset_y = y;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        true
    }

    pub(crate) fn reset(&mut self) {
        *self = Camera::default();
    }

    /// Multiply the zoom by `factor`, clamped to the zoom range.
    pub(crate) fn adjust_zoom(&mut self, factor: f64) -> bool {
        if !usable_zoom(factor) {
            tracing::warn!(factor, "rejected zoom factor");
            return false;
        }
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        true
    }
}

fn usable_zoom(z: f64) -> bool {
    z.is_finite() && z > 0.0
}
