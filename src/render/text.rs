use super::{DrawCommand, DrawContext, Frame, Layer};
use crate::geometry::{PixelPoint, Rect};
use std::fmt;

/// Drawing surface backed by a grid of characters, one cell per pixel.
pub struct TextCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

fn glyph(layer: Layer) -> char {
    match layer {
        Layer::Background => ' ',
        Layer::BeatLine => '·',
        Layer::BarLine => '¦',
        Layer::Marker => '-',
        Layer::Series => '─',
        Layer::Point => '●',
        Layer::Cursor => '│',
    }
}

impl TextCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width].iter().collect()
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    fn plot(&mut self, x: f64, y: f64, c: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x.floor() as usize, y.floor() as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }

    fn fill_rect(&mut self, rect: &Rect, c: char) {
        let x0 = rect.x.floor().max(0.0) as usize;
        let y0 = rect.y.floor().max(0.0) as usize;
        let x1 = (rect.right().ceil().max(0.0) as usize).min(self.width);
        let y1 = (rect.bottom().ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * self.width + x] = c;
            }
        }
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, c: char) {
        let steps = (to.x - from.x).abs().max((to.y - from.y).abs()).ceil().max(1.0);
        let n = steps as usize;
        for i in 0..=n {
            let t = i as f64 / steps;
            self.plot(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
                c,
            );
        }
    }
}

impl DrawContext for TextCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn submit(&mut self, frame: &Frame) {
        for command in &frame.commands {
            match command {
                DrawCommand::Clear(_) => self.cells.fill(glyph(Layer::Background)),
                DrawCommand::FillRect { rect, layer, .. } => self.fill_rect(rect, glyph(*layer)),
                DrawCommand::Polyline { points, layer, .. } => {
                    for pair in points.windows(2) {
                        self.line(pair[0], pair[1], glyph(*layer));
                    }
                }
            }
        }
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            writeln!(f, "{}", self.row(y))?;
        }
        Ok(())
    }
}
