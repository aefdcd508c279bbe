use crate::actions::create_pitch_bend;
use crate::control::{GraphProps, GraphSize, LineGraphControl};
use crate::error::Result;
use crate::event::{EventKind, PITCH_BEND_CENTER};
use crate::render::DrawContext;
use crate::store::SharedStore;

pub const PITCH_MAX_VALUE: f64 = 0x4000 as f64;

/// Axis labels in bend units, centre at zero.
pub const PITCH_AXIS: [f64; 5] = [
    -(0x2000 as f64),
    -(0x1000 as f64),
    0.0,
    0x1000 as f64,
    (0x2000 - 1) as f64,
];

/// Pitch-bend lane. Axis labels are centred on zero, so a clicked label is
/// shifted by the bend centre before it is stored at the player position.
pub fn pitch_graph<C: DrawContext>(
    size: GraphSize,
    store: SharedStore,
) -> Result<LineGraphControl<C>> {
    let mut create_at_point = create_pitch_bend(store.clone());
    let mut create_at_cursor = create_pitch_bend(store.clone());
    let props = GraphProps::new(size, PITCH_MAX_VALUE, EventKind::PitchBend)
        .with_axis(PITCH_AXIS.to_vec())
        .with_axis_offset(f64::from(PITCH_BEND_CENTER));
    LineGraphControl::new(
        props,
        store,
        Box::new(move |point| {
            create_at_point(point.value, Some(point.tick));
        }),
        Box::new(move |value| {
            create_at_cursor(value + f64::from(PITCH_BEND_CENTER), None);
        }),
    )
}
