use crate::catalog::Rgb;

/// Canvas dimensions in pixels, origin top-left, Y down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CanvasSize {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl CanvasSize {
    pub(crate) fn center(self) -> ScreenPoint {
        ScreenPoint { x: self.width / 2.0, y: self.height / 2.0 }
    }

    /// True when `p` lies inside the canvas grown by `margin` on every side.
    /// Non-finite points are never visible.
    pub(crate) fn is_near(self, p: ScreenPoint, margin: f64) -> bool {
        p.is_finite()
            && p.x > -margin
            && p.x < self.width + margin
            && p.y > -margin
            && p.y < self.height + margin
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScreenPoint {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl ScreenPoint {
    pub(crate) fn offset(self, dx: f64, dy: f64) -> ScreenPoint {
        ScreenPoint { x: self.x + dx, y: self.y + dy }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Drawing capability the render loop paints through.
pub(crate) trait Surface {
    fn size(&self) -> CanvasSize;
    /// Vertical distance between two HUD text lines.
    fn line_height(&self) -> f64;
    fn clear(&mut self);
    fn draw_circle(&mut self, center: ScreenPoint, radius: f64, color: Rgb);
    fn draw_ellipse(&mut self, center: ScreenPoint, rx: f64, ry: f64, color: Rgb);
    /// Open polyline through `points` in order.
    fn draw_polyline(&mut self, points: &[ScreenPoint], color: Rgb);
    fn draw_text(&mut self, at: ScreenPoint, text: &str, color: Rgb);
    fn present(&mut self) -> anyhow::Result<()>;
}
