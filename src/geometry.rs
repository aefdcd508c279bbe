/// A position in musical units: tick on the time axis, value on the
/// controller axis. Ticks may be fractional until an action snaps them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomainPoint {
    pub tick: f64,
    pub value: f64,
}

/// A position in device pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_x(self, dx: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered(center: PixelPoint, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
