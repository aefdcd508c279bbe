use crate::actions::create_control_change;
use crate::control::{GraphProps, GraphSize, LineGraphControl};
use crate::error::Result;
use crate::event::{EventKind, CONTROLLER_MAX};
use crate::render::DrawContext;
use crate::store::SharedStore;

pub const MODULATION: u8 = 1;
pub const VOLUME: u8 = 7;
pub const PAN: u8 = 10;
pub const EXPRESSION: u8 = 11;

pub const CONTROLLER_MAX_VALUE: f64 = CONTROLLER_MAX as f64;
pub const CONTROLLER_AXIS: [f64; 5] = [0.0, 32.0, 64.0, 96.0, 127.0];

/// Control-change lane for `controller`.
pub fn controller_graph<C: DrawContext>(
    size: GraphSize,
    controller: u8,
    store: SharedStore,
) -> Result<LineGraphControl<C>> {
    let mut create_at_point = create_control_change(store.clone(), controller);
    let mut create_at_cursor = create_control_change(store.clone(), controller);
    let props = GraphProps::new(
        size,
        CONTROLLER_MAX_VALUE,
        EventKind::ControlChange { controller },
    )
    .with_axis(CONTROLLER_AXIS.to_vec());
    LineGraphControl::new(
        props,
        store,
        Box::new(move |point| {
            create_at_point(point.value, Some(point.tick));
        }),
        Box::new(move |value| {
            create_at_cursor(value, None);
        }),
    )
}

pub fn volume_graph<C: DrawContext>(
    size: GraphSize,
    store: SharedStore,
) -> Result<LineGraphControl<C>> {
    controller_graph(size, VOLUME, store)
}

pub fn pan_graph<C: DrawContext>(
    size: GraphSize,
    store: SharedStore,
) -> Result<LineGraphControl<C>> {
    controller_graph(size, PAN, store)
}

pub fn expression_graph<C: DrawContext>(
    size: GraphSize,
    store: SharedStore,
) -> Result<LineGraphControl<C>> {
    controller_graph(size, EXPRESSION, store)
}

pub fn modulation_graph<C: DrawContext>(
    size: GraphSize,
    store: SharedStore,
) -> Result<LineGraphControl<C>> {
    controller_graph(size, MODULATION, store)
}
