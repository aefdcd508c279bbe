//! Line-graph control for one automation lane
//!
//! [`LineGraphControl`] is the composition root of a lane: it reads the
//! piano-roll store, projects the lane's events to pixels, draws them through
//! a [`GraphRenderer`], and turns pointer input back into domain points for
//! the event-creation callback.
//!
//! Redraws are driven by an explicit dirty check rather than a timer: every
//! [`LineGraphControl::update`] recomputes the render inputs (renderer,
//! scroll, beat grid, cursor, projected points, theme) and only draws when
//! they differ from the last frame drawn.

mod axis;

pub use axis::{AxisLabel, GraphAxis, OnClickAxis};

use crate::config::DEFAULT_LINE_WIDTH;
use crate::error::Result;
use crate::event::{EventId, EventKind};
use crate::geometry::{DomainPoint, PixelPoint};
use crate::render::{DrawContext, GraphRenderer, Theme};
use crate::store::{lock_store, MappedBeat, PianoRollStore, SharedStore, StoreChange};
use crate::transform::{CoordinateTransform, ValueAxis};
use crossbeam::channel::Receiver;
use log::{debug, info};

/// Receives the domain point under a pointer-down.
pub type CreateEvent = Box<dyn FnMut(DomainPoint)>;

/// Drawing-surface size and stroke width of a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSize {
    pub width: f64,
    pub height: f64,
    pub line_width: f64,
}

impl GraphSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Static configuration of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphProps {
    pub width: f64,
    pub height: f64,
    pub max_value: f64,
    pub line_width: f64,
    pub axis: Vec<f64>,
    /// Added to an axis label to get its raw value.
    pub axis_offset: f64,
    pub kind: EventKind,
}

impl GraphProps {
    pub fn new(size: GraphSize, max_value: f64, kind: EventKind) -> Self {
        Self {
            width: size.width,
            height: size.height,
            max_value,
            line_width: size.line_width,
            axis: Vec::new(),
            axis_offset: 0.0,
            kind,
        }
    }

    pub fn with_axis(mut self, axis: Vec<f64>) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_axis_offset(mut self, offset: f64) -> Self {
        self.axis_offset = offset;
        self
    }
}

/// An event projected to pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphItem {
    pub id: EventId,
    pub x: f64,
    pub y: f64,
}

/// Pointer position relative to the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PointerEvent {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }
}

/// Everything a frame depends on.
#[derive(Debug, Clone, PartialEq)]
struct RenderInputs {
    generation: u64,
    theme: Theme,
    scroll_left: f64,
    cursor_x: f64,
    mapped_beats: Vec<MappedBeat>,
    items: Vec<GraphItem>,
}

pub struct LineGraphControl<C: DrawContext> {
    props: GraphProps,
    values: ValueAxis,
    store: SharedStore,
    changes: Receiver<StoreChange>,
    create_event: CreateEvent,
    axis: GraphAxis,
    theme: Theme,
    renderer: Option<GraphRenderer<C>>,
    generation: u64,
    last_rendered: Option<RenderInputs>,
}

impl<C: DrawContext> LineGraphControl<C> {
    /// Fails when the props describe no drawable value range.
    pub fn new(
        props: GraphProps,
        store: SharedStore,
        create_event: CreateEvent,
        on_click_axis: OnClickAxis,
    ) -> Result<Self> {
        let values = ValueAxis::new(props.height, props.line_width, props.max_value)?;
        let changes = lock_store(&store).subscribe();
        let axis = GraphAxis::new(props.axis.clone(), props.axis_offset, on_click_axis);
        info!(
            "Creating {} graph ({}x{}, max value {})",
            props.kind, props.width, props.height, props.max_value
        );
        Ok(Self {
            props,
            values,
            store,
            changes,
            create_event,
            axis,
            theme: Theme::default(),
            renderer: None,
            generation: 0,
            last_rendered: None,
        })
    }

    pub fn props(&self) -> &GraphProps {
        &self.props
    }

    pub fn value_axis(&self) -> &ValueAxis {
        &self.values
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The theme is handed to the renderer before each draw.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn renderer(&self) -> Option<&GraphRenderer<C>> {
        self.renderer.as_ref()
    }

    /// Binds a freshly mounted drawing surface, disposing of the renderer
    /// built for the previous one.
    pub fn on_create_context(&mut self, context: C) {
        if self.renderer.take().is_some() {
            info!("Disposing graph renderer of replaced context");
        }
        self.renderer = Some(GraphRenderer::new(context));
        self.generation += 1;
    }

    /// Unbinds the drawing surface and hands it back.
    pub fn on_destroy_context(&mut self) -> Option<C> {
        self.last_rendered = None;
        self.renderer.take().map(GraphRenderer::into_context)
    }

    /// Converts the pointer position to a domain point and requests an event
    /// there. The control itself does not change; the store will.
    pub fn on_mouse_down(&mut self, event: PointerEvent) {
        let (scroll_left, transform) = {
            let store = lock_store(&self.store);
            (store.scroll_left(), store.transform())
        };
        let local = PixelPoint::new(event.offset_x + scroll_left, event.offset_y);
        let point = CoordinateTransform::new(transform.as_ref(), self.values).to_domain(local);
        debug!(
            "Pointer down at ({}, {}) -> tick {}, value {}",
            local.x, local.y, point.tick, point.value
        );
        (self.create_event)(point);
    }

    fn items_from(&self, store: &PianoRollStore) -> Vec<GraphItem> {
        let transform = store.transform();
        let coords = CoordinateTransform::new(transform.as_ref(), self.values);
        store
            .events_of(self.props.kind)
            .into_iter()
            .map(|e| {
                let p = coords.to_pixel(f64::from(e.tick), f64::from(e.value));
                GraphItem {
                    id: e.id,
                    x: p.x,
                    y: p.y,
                }
            })
            .collect()
    }

    /// The lane's events in pixel space, recomputed from the store.
    pub fn items(&self) -> Vec<GraphItem> {
        self.items_from(&lock_store(&self.store))
    }

    fn render_inputs(&self) -> RenderInputs {
        let store = lock_store(&self.store);
        let viewport = store.viewport();
        RenderInputs {
            generation: self.generation,
            theme: self.theme,
            scroll_left: viewport.scroll_left,
            cursor_x: viewport.cursor_x,
            mapped_beats: viewport.mapped_beats,
            items: self.items_from(&store),
        }
    }

    /// True when the renderer or theme changed since the last frame.
    pub fn is_dirty(&self) -> bool {
        match &self.last_rendered {
            Some(last) => last.generation != self.generation || last.theme != self.theme,
            None => self.renderer.is_some(),
        }
    }

    /// Draws a frame if any render input changed. Returns whether it drew.
    pub fn update(&mut self) -> bool {
        let inputs = self.render_inputs();
        if self.last_rendered.as_ref() == Some(&inputs) {
            return false;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return false;
        };

        let (highlighted, non_highlighted): (Vec<&MappedBeat>, Vec<&MappedBeat>) =
            inputs.mapped_beats.iter().partition(|b| b.beat == 0);
        let highlighted_x: Vec<f64> = highlighted.iter().map(|b| b.x).collect();
        let non_highlighted_x: Vec<f64> = non_highlighted.iter().map(|b| b.x).collect();
        let points: Vec<PixelPoint> = inputs
            .items
            .iter()
            .map(|i| PixelPoint::new(i.x, i.y))
            .collect();

        renderer.theme = self.theme;
        renderer.render(
            self.props.line_width,
            &points,
            &non_highlighted_x,
            &highlighted_x,
            &[],
            inputs.cursor_x,
            inputs.scroll_left,
        );
        self.last_rendered = Some(inputs);
        true
    }

    /// Drains store notifications and redraws if anything relevant changed.
    pub fn pump(&mut self) -> bool {
        let pending = self.changes.try_iter().count();
        if pending == 0 && !self.is_dirty() {
            return false;
        }
        debug!("Graph pump: {} store changes pending", pending);
        self.update()
    }

    pub fn axis(&self) -> &GraphAxis {
        &self.axis
    }

    pub fn axis_labels(&self) -> Vec<AxisLabel> {
        self.axis.labels(&self.values)
    }

    /// Forwards a click on the axis label at `index`.
    pub fn on_click_axis(&mut self, index: usize) -> bool {
        self.axis.click(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingContext;
    use crate::store::{create_shared_store, PianoRollStore};
    use crate::transform::LinearTransform;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn control() -> (
        LineGraphControl<RecordingContext>,
        SharedStore,
        Rc<RefCell<Vec<DomainPoint>>>,
    ) {
        let mut store = PianoRollStore::default();
        store.set_transform(Arc::new(LinearTransform::new(1.0)));
        let store = create_shared_store(store);
        let created = Rc::new(RefCell::new(Vec::new()));
        let sink = created.clone();
        let props = GraphProps::new(
            GraphSize::new(400.0, 200.0),
            100.0,
            EventKind::ControlChange { controller: 7 },
        );
        let control = LineGraphControl::new(
            props,
            store.clone(),
            Box::new(move |p| sink.borrow_mut().push(p)),
            Box::new(|_| {}),
        )
        .unwrap();
        (control, store, created)
    }

    #[test]
    fn test_mouse_down_adds_scroll_and_inverts() {
        let (mut control, store, created) = control();
        lock_store(&store).set_scroll_left(50.0);

        control.on_mouse_down(PointerEvent::new(120.0, 40.0));

        let created = created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].tick, 170.0);
        assert!((created[0].value - (1.0 - 38.0 / 196.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mouse_down_leaves_store_untouched() {
        let (mut control, store, _) = control();
        control.on_mouse_down(PointerEvent::new(10.0, 10.0));
        assert_eq!(lock_store(&store).revision(), 0);
    }

    #[test]
    fn test_update_without_renderer_draws_nothing() {
        let (mut control, _, _) = control();
        assert!(!control.update());
        assert!(!control.is_dirty());
    }

    #[test]
    fn test_invalid_props_rejected() {
        let store = create_shared_store(PianoRollStore::default());
        let props = GraphProps::new(GraphSize::new(100.0, 4.0), 127.0, EventKind::PitchBend);
        let result: Result<LineGraphControl<RecordingContext>> =
            LineGraphControl::new(props, store, Box::new(|_| {}), Box::new(|_| {}));
        assert!(result.is_err());
    }

    #[test]
    fn test_items_follow_store_events() {
        let (control, store, _) = control();
        lock_store(&store).create_or_update(EventKind::ControlChange { controller: 7 }, 30, 100);
        lock_store(&store).create_or_update(EventKind::PitchBend, 40, 100);

        let items = control.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].x, 30.0);
        assert_eq!(items[0].y, 2.0);
    }
}
