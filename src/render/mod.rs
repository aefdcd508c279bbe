//! Drawing for the automation graphs
//!
//! This module turns pixel-space data into draw commands:
//! - [`GraphRenderer`] builds one [`Frame`] per render call and submits it
//! - [`DrawContext`] is the drawing surface the renderer is bound to
//! - [`RecordingContext`] keeps submitted frames, for tests and tooling
//! - [`TextCanvas`] rasterises frames into a character grid
//!
//! A renderer owns its context. When the surface is remounted the owning
//! control drops the renderer and builds a new one around the new context.

mod recording;
mod text;
mod theme;

pub use recording::RecordingContext;
pub use text::TextCanvas;
pub use theme::{Color, Theme};

use crate::geometry::{PixelPoint, Rect};
use log::{debug, info};

/// Alpha applied to the divider colour for beats that are not downbeats.
const BEAT_LINE_ALPHA: u8 = 0x66;

/// What a draw command depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    BeatLine,
    BarLine,
    Marker,
    Series,
    Point,
    Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
        layer: Layer,
    },
    Polyline {
        points: Vec<PixelPoint>,
        width: f64,
        color: Color,
        layer: Layer,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> Layer {
        match self {
            DrawCommand::Clear(_) => Layer::Background,
            DrawCommand::FillRect { layer, .. } | DrawCommand::Polyline { layer, .. } => *layer,
        }
    }
}

/// A complete picture of the graph, drawn back to front.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn count(&self, layer: Layer) -> usize {
        self.commands.iter().filter(|c| c.layer() == layer).count()
    }
}

/// A drawing surface that accepts whole frames.
pub trait DrawContext {
    /// Surface size in pixels.
    fn size(&self) -> (f64, f64);
    fn submit(&mut self, frame: &Frame);
}

/// Draws the line graph of one automation lane.
pub struct GraphRenderer<C: DrawContext> {
    context: C,
    pub theme: Theme,
}

impl<C: DrawContext> GraphRenderer<C> {
    pub fn new(context: C) -> Self {
        let (width, height) = context.size();
        info!("Creating graph renderer for {}x{} surface", width, height);
        Self {
            context,
            theme: Theme::default(),
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Builds the frame `render` would submit, without drawing it.
    ///
    /// Every x coordinate is in content space and is shifted by
    /// `-scroll_left`; `extra_markers` are y positions of horizontal guides.
    #[allow(clippy::too_many_arguments)]
    pub fn frame(
        &self,
        line_width: f64,
        points: &[PixelPoint],
        non_highlighted_x: &[f64],
        highlighted_x: &[f64],
        extra_markers: &[f64],
        cursor_x: f64,
        scroll_left: f64,
    ) -> Frame {
        let (width, height) = self.context.size();
        let theme = &self.theme;
        let mut commands = vec![DrawCommand::Clear(theme.background_color)];

        let vertical = |x: f64, color: Color, layer: Layer| DrawCommand::FillRect {
            rect: Rect::new(x - scroll_left, 0.0, 1.0, height),
            color,
            layer,
        };
        let beat_color = theme.divider_color.with_alpha(BEAT_LINE_ALPHA);
        commands.extend(
            non_highlighted_x
                .iter()
                .map(|&x| vertical(x, beat_color, Layer::BeatLine)),
        );
        commands.extend(
            highlighted_x
                .iter()
                .map(|&x| vertical(x, theme.divider_color, Layer::BarLine)),
        );
        commands.extend(extra_markers.iter().map(|&y| DrawCommand::FillRect {
            rect: Rect::new(0.0, y, width, 1.0),
            color: theme.divider_color,
            layer: Layer::Marker,
        }));

        let shifted: Vec<PixelPoint> = points.iter().map(|p| p.offset_x(-scroll_left)).collect();
        if !shifted.is_empty() {
            commands.push(DrawCommand::Polyline {
                points: step_path(&shifted, width),
                width: line_width,
                color: theme.theme_color,
                layer: Layer::Series,
            });
        }
        commands.extend(shifted.iter().map(|&p| DrawCommand::FillRect {
            rect: Rect::centered(p, line_width * 2.0),
            color: theme.theme_color,
            layer: Layer::Point,
        }));

        commands.push(vertical(cursor_x, theme.cursor_color, Layer::Cursor));

        Frame {
            width,
            height,
            commands,
        }
    }

    /// Redraws the whole graph.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        line_width: f64,
        points: &[PixelPoint],
        non_highlighted_x: &[f64],
        highlighted_x: &[f64],
        extra_markers: &[f64],
        cursor_x: f64,
        scroll_left: f64,
    ) {
        let frame = self.frame(
            line_width,
            points,
            non_highlighted_x,
            highlighted_x,
            extra_markers,
            cursor_x,
            scroll_left,
        );
        debug!(
            "Rendering graph frame: {} points, {} commands",
            points.len(),
            frame.commands.len()
        );
        self.context.submit(&frame);
    }
}

/// Path holding each value until the next point, the last value running
/// to the right edge.
fn step_path(points: &[PixelPoint], right_edge: f64) -> Vec<PixelPoint> {
    let mut path = Vec::with_capacity(points.len() * 2 + 1);
    for (i, p) in points.iter().enumerate() {
        path.push(*p);
        match points.get(i + 1) {
            Some(next) => path.push(PixelPoint::new(next.x, p.y)),
            None if right_edge > p.x => path.push(PixelPoint::new(right_edge, p.y)),
            None => {}
        }
    }
    path
}
