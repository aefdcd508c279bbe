use crate::config::AppConfig;
use crate::control::{GraphSize, PointerEvent};
use crate::error::Result;
use crate::graphs::Lane;
use crate::quantize::QuantizeSelector;
use crate::render::TextCanvas;
use crate::store::{create_shared_store, lock_store, PianoRollStore};
use crate::transform::LinearTransform;
use clap::{Parser, Subcommand, ValueEnum};
use std::cell::Cell;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how a quantize value decomposes, optionally stepping it
    Quantize {
        /// Encoded quantize value, e.g. 8, 12 (eighth triplet) or 5.333
        value: f64,

        /// Step the denominator as a mouse wheel would
        #[arg(long, value_enum)]
        wheel: Option<WheelDirection>,

        /// Pick the value from the quantize popup
        #[arg(long)]
        interactive: bool,
    },

    /// Render an automation lane as text
    Render {
        /// `pitch`, `volume`, `pan`, `expression`, `modulation` or `cc:<n>`
        #[arg(long, default_value = "pitch")]
        lane: Lane,

        /// Existing event as TICK:VALUE (repeatable)
        #[arg(long = "point", value_parser = parse_point)]
        points: Vec<(u32, f64)>,

        /// Pointer-down at X,Y on the drawing surface (repeatable)
        #[arg(long = "click", value_parser = parse_click, allow_hyphen_values = true)]
        clicks: Vec<(f64, f64)>,

        /// Click the axis label at INDEX (repeatable)
        #[arg(long = "axis")]
        axis_clicks: Vec<usize>,

        /// Player position in ticks
        #[arg(long, default_value_t = 0)]
        position: u32,

        /// Horizontal scroll offset in pixels
        #[arg(long, default_value_t = 0.0)]
        scroll_left: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Browser-style wheel delta: scrolling up is negative.
    pub fn delta_y(self) -> f64 {
        match self {
            WheelDirection::Up => -1.0,
            WheelDirection::Down => 1.0,
        }
    }
}

/// Parses `TICK:VALUE`.
pub fn parse_point(s: &str) -> std::result::Result<(u32, f64), String> {
    let (tick, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TICK:VALUE, got '{}'", s))?;
    let tick = tick
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid tick '{}': {}", tick, e))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value '{}': {}", value, e))?;
    Ok((tick, value))
}

/// Parses `X,Y`.
pub fn parse_click(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid x '{}': {}", x, e))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid y '{}': {}", y, e))?;
    Ok((x, y))
}

/// Builds a selector for `value` whose selections land in the returned cell.
pub fn quantize_selector(value: f64) -> (QuantizeSelector, Rc<Cell<f64>>) {
    let selected = Rc::new(Cell::new(value));
    let sink = selected.clone();
    let selector = QuantizeSelector::new(value, Box::new(move |v| sink.set(v)));
    (selector, selected)
}

/// Applies an optional wheel step to `value` and returns the new value.
pub fn step_quantize(value: f64, wheel: Option<WheelDirection>) -> f64 {
    let (mut selector, selected) = quantize_selector(value);
    if let Some(direction) = wheel {
        selector.on_wheel(direction.delta_y());
    }
    selected.get()
}

/// Everything the `render` subcommand needs besides configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub lane: Lane,
    pub points: Vec<(u32, f64)>,
    pub clicks: Vec<(f64, f64)>,
    pub axis_clicks: Vec<usize>,
    pub position: u32,
    pub scroll_left: f64,
}

impl RenderRequest {
    pub fn new(lane: Lane) -> Self {
        Self {
            lane,
            points: Vec::new(),
            clicks: Vec::new(),
            axis_clicks: Vec::new(),
            position: 0,
            scroll_left: 0.0,
        }
    }
}

/// Builds a store and a lane graph from `config`, replays the requested
/// input and renders the lane into a [`TextCanvas`]. Each canvas row is
/// followed by the axis label drawn at that height, and the lane's events
/// are listed below the graph.
pub fn render_lane(request: &RenderRequest, config: &AppConfig) -> Result<String> {
    let timing = &config.timing;
    let size = GraphSize::new(config.graph.width, config.graph.height)
        .with_line_width(config.graph.line_width);
    let kind = request.lane.kind();

    let mut store = PianoRollStore::new(timing.timebase, timing.beats_per_bar);
    store.set_transform(Arc::new(LinearTransform::from_zoom(timing.zoom)));
    store.set_quantize(timing.quantize);
    store.set_canvas_width(size.width);
    store.set_scroll_left(request.scroll_left);
    store.set_player_position(request.position);
    for &(tick, value) in &request.points {
        store.create_or_update(kind, tick, kind.clamp(value));
    }
    let store = create_shared_store(store);

    let mut control = request.lane.graph::<TextCanvas>(size, store.clone())?;
    control.set_theme(config.theme.to_theme()?);

    for &(x, y) in &request.clicks {
        control.on_mouse_down(PointerEvent::new(x, y));
    }
    for &index in &request.axis_clicks {
        if !control.on_click_axis(index) {
            log::warn!("No axis label at index {}", index);
        }
    }

    control.on_create_context(TextCanvas::new(
        size.width.max(0.0) as usize,
        size.height.max(0.0) as usize,
    ));
    control.pump();

    let labels = control.axis_labels();
    let mut output = String::new();
    if let Some(canvas) = control.on_destroy_context() {
        for (row, line) in canvas.to_string().lines().enumerate() {
            let label = labels
                .iter()
                .find(|l| l.y.round() as usize == row)
                .map(|l| l.text.as_str())
                .unwrap_or("");
            let _ = writeln!(output, "{} {}", line, label);
        }
    }

    let _ = writeln!(output, "{} events:", request.lane);
    for event in lock_store(&store).events_of(kind) {
        let _ = writeln!(
            output,
            "  {} tick {} value {}",
            event.id, event.tick, event.value
        );
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("480:64"), Ok((480, 64.0)));
        assert!(parse_point("480").is_err());
        assert!(parse_point("-1:64").is_err());
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(parse_click("12.5, 3"), Ok((12.5, 3.0)));
        assert!(parse_click("12.5").is_err());
        assert!(parse_click("a,b").is_err());
    }

    #[test]
    fn test_step_quantize() {
        assert_eq!(step_quantize(8.0, None), 8.0);
        assert_eq!(step_quantize(8.0, Some(WheelDirection::Up)), 16.0);
        assert_eq!(step_quantize(8.0, Some(WheelDirection::Down)), 4.0);
    }
}
