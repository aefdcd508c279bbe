//! Store mutations used as event-creation callbacks.
//!
//! Both actions snap the tick onto the current quantize grid, round and
//! clamp the value to the event's raw range, and update an existing event
//! at the same tick instead of stacking a duplicate on it.

use crate::event::{EventId, EventKind};
use crate::store::{lock_store, SharedStore};
use log::info;

fn create_event(store: &SharedStore, kind: EventKind, value: f64, tick: Option<f64>) -> EventId {
    let mut store = lock_store(store);
    let position = tick.unwrap_or_else(|| f64::from(store.player_position()));
    let snapped = store.quantizer().round(position).clamp(0.0, f64::from(u32::MAX));
    let value = kind.clamp(value);
    info!("Creating {} event at tick {} with value {}", kind, snapped, value);
    store.create_or_update(kind, snapped as u32, value)
}

/// Returns a callback creating a pitch-bend event from a raw 14-bit value.
/// Without a tick the event lands at the player position.
pub fn create_pitch_bend(store: SharedStore) -> impl FnMut(f64, Option<f64>) -> EventId {
    move |value, tick| create_event(&store, EventKind::PitchBend, value, tick)
}

/// Returns a callback creating control-change events for `controller`.
pub fn create_control_change(
    store: SharedStore,
    controller: u8,
) -> impl FnMut(f64, Option<f64>) -> EventId {
    move |value, tick| create_event(&store, EventKind::ControlChange { controller }, value, tick)
}
