//! Mapping between domain `(tick, value)` coordinates and pixels.
//!
//! The horizontal axis is owned by the piano roll (zoom and pan) and reaches
//! the graph through the [`TickTransform`] trait. The vertical axis is the
//! graph's own: a linear, inverted mapping of `[0, max_value]` onto the
//! drawing height minus `line_width` of padding at the top and bottom, so a
//! stroke of that width is never clipped.

use crate::error::{GraphError, Result};
use crate::geometry::{DomainPoint, PixelPoint};

/// Horizontal tick ↔ x mapping supplied by the piano roll.
///
/// `get_ticks` must invert `get_x` for pointer input to land where the user
/// clicked.
pub trait TickTransform: Send + Sync {
    fn get_x(&self, tick: f64) -> f64;
    fn get_ticks(&self, x: f64) -> f64;
}

/// Pixels per tick at zoom 1.
pub const BASE_PIXELS_PER_TICK: f64 = 0.1;

/// Constant-zoom transform used by the piano roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    pixels_per_tick: f64,
}

impl LinearTransform {
    pub fn new(pixels_per_tick: f64) -> Self {
        Self { pixels_per_tick }
    }

    /// Transform for a horizontal zoom factor.
    pub fn from_zoom(scale_x: f64) -> Self {
        Self::new(BASE_PIXELS_PER_TICK * scale_x)
    }

    pub fn pixels_per_tick(&self) -> f64 {
        self.pixels_per_tick
    }
}

impl Default for LinearTransform {
    fn default() -> Self {
        Self::from_zoom(1.0)
    }
}

impl TickTransform for LinearTransform {
    fn get_x(&self, tick: f64) -> f64 {
        tick * self.pixels_per_tick
    }

    fn get_ticks(&self, x: f64) -> f64 {
        x / self.pixels_per_tick
    }
}

/// Vertical value ↔ y mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    height: f64,
    line_width: f64,
    max_value: f64,
}

impl ValueAxis {
    /// Rejects geometry that leaves no drawable height or an empty value range.
    pub fn new(height: f64, line_width: f64, max_value: f64) -> Result<Self> {
        if !(max_value > 0.0) || !(height > line_width * 2.0) || line_width < 0.0 {
            return Err(GraphError::InvalidGeometry {
                height,
                line_width,
                max_value,
            });
        }
        Ok(Self {
            height,
            line_width,
            max_value,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    fn drawable_height(&self) -> f64 {
        self.height - self.line_width * 2.0
    }

    /// Pixel row for `value`, snapped to whole pixels.
    pub fn value_to_y(&self, value: f64) -> f64 {
        ((1.0 - value / self.max_value) * self.drawable_height()).round() + self.line_width
    }

    /// Unsnapped row; [`ValueAxis::y_to_value`] inverts this exactly.
    pub fn value_to_y_exact(&self, value: f64) -> f64 {
        (1.0 - value / self.max_value) * self.drawable_height() + self.line_width
    }

    pub fn y_to_value(&self, y: f64) -> f64 {
        (1.0 - (y - self.line_width) / self.drawable_height()) * self.max_value
    }
}

/// Both axes together: the graph's forward and inverse transform.
#[derive(Clone, Copy)]
pub struct CoordinateTransform<'a> {
    ticks: &'a dyn TickTransform,
    values: ValueAxis,
}

impl<'a> CoordinateTransform<'a> {
    pub fn new(ticks: &'a dyn TickTransform, values: ValueAxis) -> Self {
        Self { ticks, values }
    }

    pub fn to_pixel(&self, tick: f64, value: f64) -> PixelPoint {
        PixelPoint {
            x: self.ticks.get_x(tick).round(),
            y: self.values.value_to_y(value),
        }
    }

    pub fn to_domain(&self, position: PixelPoint) -> DomainPoint {
        DomainPoint {
            tick: self.ticks.get_ticks(position.x),
            value: self.values.y_to_value(position.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_transform_zoom() {
        let t = LinearTransform::from_zoom(2.0);
        assert!((t.get_x(480.0) - 96.0).abs() < 1e-9);
        assert!((t.get_ticks(96.0) - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_axis_extremes_respect_padding() {
        let axis = ValueAxis::new(200.0, 2.0, 100.0).unwrap();
        assert_eq!(axis.value_to_y(100.0), 2.0);
        assert_eq!(axis.value_to_y(0.0), 198.0);
    }

    #[test]
    fn test_pointer_scenario() {
        let ticks = LinearTransform::new(1.0);
        let axis = ValueAxis::new(200.0, 2.0, 100.0).unwrap();
        let transform = CoordinateTransform::new(&ticks, axis);
        let point = transform.to_domain(PixelPoint::new(170.0, 40.0));
        assert_eq!(point.tick, ticks.get_ticks(170.0));
        assert!((point.value - (1.0 - 38.0 / 196.0) * 100.0).abs() < 1e-9);
        assert!((point.value - 80.6).abs() < 0.05);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(ValueAxis::new(4.0, 2.0, 100.0).is_err());
        assert!(ValueAxis::new(100.0, 2.0, 0.0).is_err());
        assert!(ValueAxis::new(100.0, 2.0, f64::NAN).is_err());
    }

    #[test]
    fn test_forward_rounds_x() {
        let ticks = LinearTransform::new(0.1);
        let axis = ValueAxis::new(100.0, 2.0, 127.0).unwrap();
        let p = CoordinateTransform::new(&ticks, axis).to_pixel(123.0, 127.0);
        assert_eq!(p.x, 12.0);
        assert_eq!(p.y, 2.0);
    }
}
