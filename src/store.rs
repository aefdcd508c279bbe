//! Piano-roll state read by the automation graphs.
//!
//! The store is the single source of truth for scroll, zoom, cursor and the
//! controller/pitch-bend events. Graph controls receive it explicitly as a
//! [`SharedStore`], take a [`ViewportState`] snapshot per render, and learn
//! about mutations through [`PianoRollStore::subscribe`].

use crate::config::{BEATS_PER_BAR, TIMEBASE};
use crate::event::{EventId, EventKind, GraphEvent};
use crate::quantize::Quantizer;
use crate::transform::{LinearTransform, TickTransform};
use crossbeam::channel::{unbounded, Receiver, Sender};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type SharedStore = Arc<Mutex<PianoRollStore>>;

pub fn create_shared_store(store: PianoRollStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Locks the store. A panic while the lock was held leaves plain data
/// behind, so a poisoned lock is recovered rather than propagated.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, PianoRollStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Events,
    Scroll,
    Transform,
    Cursor,
    Quantize,
    Canvas,
}

/// A beat boundary in ticks. `beat` is the index within its bar, 0 being
/// the downbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatTick {
    pub tick: u32,
    pub beat: u32,
}

/// A beat boundary projected onto the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedBeat {
    pub x: f64,
    pub beat: u32,
}

/// Read-only snapshot handed to a graph for one render pass.
#[derive(Clone)]
pub struct ViewportState {
    pub scroll_left: f64,
    pub transform: Arc<dyn TickTransform>,
    pub mapped_beats: Vec<MappedBeat>,
    pub cursor_x: f64,
}

/// Beat boundaries within `[start_tick, end_tick]`.
pub fn beats_in_range(
    timebase: u32,
    beats_per_bar: u32,
    start_tick: u32,
    end_tick: u32,
) -> Vec<BeatTick> {
    if timebase == 0 || beats_per_bar == 0 {
        return Vec::new();
    }
    // u64 so the beat after the last one below u32::MAX is still representable
    let timebase = u64::from(timebase);
    let first = u64::from(start_tick).div_ceil(timebase);
    (first..)
        .map(|index| (index * timebase, index % u64::from(beats_per_bar)))
        .take_while(|&(tick, _)| tick <= u64::from(end_tick))
        .map(|(tick, beat)| BeatTick {
            tick: tick as u32,
            beat: beat as u32,
        })
        .collect()
}

pub struct PianoRollStore {
    events: Vec<GraphEvent>,
    next_id: u64,
    revision: u64,
    scroll_left: f64,
    canvas_width: f64,
    transform: Arc<dyn TickTransform>,
    player_position: u32,
    timebase: u32,
    beats_per_bar: u32,
    quantize: f64,
    subscribers: Vec<Sender<StoreChange>>,
}

impl Default for PianoRollStore {
    fn default() -> Self {
        Self::new(TIMEBASE, BEATS_PER_BAR)
    }
}

impl PianoRollStore {
    pub fn new(timebase: u32, beats_per_bar: u32) -> Self {
        Self {
            events: Vec::new(),
            next_id: 0,
            revision: 0,
            scroll_left: 0.0,
            canvas_width: 1000.0,
            transform: Arc::new(LinearTransform::default()),
            player_position: 0,
            timebase,
            beats_per_bar,
            quantize: 8.0,
            subscribers: Vec::new(),
        }
    }

    /// Returns a receiver that gets one message per mutation.
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, change: StoreChange) {
        debug!("Store changed: {:?}", change);
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    pub fn set_scroll_left(&mut self, scroll_left: f64) {
        self.scroll_left = scroll_left.max(0.0);
        self.notify(StoreChange::Scroll);
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn set_canvas_width(&mut self, width: f64) {
        self.canvas_width = width;
        self.notify(StoreChange::Canvas);
    }

    pub fn transform(&self) -> Arc<dyn TickTransform> {
        self.transform.clone()
    }

    pub fn set_transform(&mut self, transform: Arc<dyn TickTransform>) {
        self.transform = transform;
        self.notify(StoreChange::Transform);
    }

    pub fn player_position(&self) -> u32 {
        self.player_position
    }

    pub fn set_player_position(&mut self, tick: u32) {
        self.player_position = tick;
        self.notify(StoreChange::Cursor);
    }

    pub fn timebase(&self) -> u32 {
        self.timebase
    }

    pub fn quantize(&self) -> f64 {
        self.quantize
    }

    pub fn set_quantize(&mut self, quantize: f64) {
        self.quantize = quantize;
        self.notify(StoreChange::Quantize);
    }

    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.timebase, self.quantize)
    }

    pub fn cursor_x(&self) -> f64 {
        self.transform.get_x(f64::from(self.player_position)).round()
    }

    /// Beat lines for the visible range `[scroll_left, scroll_left + canvas_width]`.
    /// Ticks past `u32::MAX` carry no beats.
    pub fn mapped_beats(&self) -> Vec<MappedBeat> {
        let max_tick = f64::from(u32::MAX);
        let start = self.transform.get_ticks(self.scroll_left).floor().max(0.0);
        if !(start <= max_tick) {
            return Vec::new();
        }
        let end = self
            .transform
            .get_ticks(self.scroll_left + self.canvas_width)
            .ceil()
            .clamp(start, max_tick);
        beats_in_range(self.timebase, self.beats_per_bar, start as u32, end as u32)
            .into_iter()
            .map(|b| MappedBeat {
                x: self.transform.get_x(f64::from(b.tick)).round(),
                beat: b.beat,
            })
            .collect()
    }

    pub fn viewport(&self) -> ViewportState {
        ViewportState {
            scroll_left: self.scroll_left,
            transform: self.transform.clone(),
            mapped_beats: self.mapped_beats(),
            cursor_x: self.cursor_x(),
        }
    }

    /// Bumped on every event mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Events of one lane, in tick order.
    pub fn events_of(&self, kind: EventKind) -> Vec<GraphEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// Updates the event of `kind` at `tick` if there is one, otherwise
    /// inserts a new event keeping the list sorted by tick.
    pub fn create_or_update(&mut self, kind: EventKind, tick: u32, value: i32) -> EventId {
        let existing = self
            .events
            .iter()
            .position(|e| e.kind == kind && e.tick == tick);
        let id = if let Some(index) = existing {
            let event = &mut self.events[index];
            event.value = value;
            debug!("Updated {} event {} at tick {} to {}", kind, event.id, tick, value);
            event.id
        } else {
            let id = EventId(self.next_id);
            self.next_id += 1;
            let index = self.events.partition_point(|e| e.tick <= tick);
            self.events.insert(
                index,
                GraphEvent {
                    id,
                    tick,
                    kind,
                    value,
                },
            );
            debug!("Created {} event {} at tick {} with {}", kind, id, tick, value);
            id
        };
        self.revision += 1;
        self.notify(StoreChange::Events);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_in_range_marks_downbeats() {
        let beats = beats_in_range(480, 4, 0, 1920);
        let indices: Vec<u32> = beats.iter().map(|b| b.beat).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 0]);
        assert_eq!(beats[4].tick, 1920);
    }

    #[test]
    fn test_beats_in_range_starts_at_next_boundary() {
        let beats = beats_in_range(480, 4, 500, 1500);
        assert_eq!(beats.first().map(|b| b.tick), Some(960));
        assert_eq!(beats.len(), 2);
    }

    #[test]
    fn test_beats_in_range_degenerate() {
        assert!(beats_in_range(0, 4, 0, 100).is_empty());
        assert!(beats_in_range(480, 0, 0, 100).is_empty());
    }

    #[test]
    fn test_beats_in_range_at_tick_limit() {
        let beats = beats_in_range(480, 4, u32::MAX - 10, u32::MAX);
        assert!(beats.is_empty());

        let beats = beats_in_range(480, 4, u32::MAX - 500, u32::MAX);
        assert_eq!(beats.len(), 1);
        assert_eq!(beats[0].tick, 8_947_848 * 480);
    }

    #[test]
    fn test_subscribers_are_notified_and_pruned() {
        let mut store = PianoRollStore::default();
        let rx = store.subscribe();
        let dropped = store.subscribe();
        drop(dropped);

        store.set_scroll_left(10.0);
        assert_eq!(rx.try_recv(), Ok(StoreChange::Scroll));
        assert_eq!(store.subscribers.len(), 1);
    }

    #[test]
    fn test_create_or_update_keeps_ticks_sorted() {
        let mut store = PianoRollStore::default();
        store.create_or_update(EventKind::PitchBend, 960, 100);
        store.create_or_update(EventKind::PitchBend, 0, 200);
        let again = store.create_or_update(EventKind::PitchBend, 960, 300);

        let events = store.events_of(EventKind::PitchBend);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].tick, 0);
        assert_eq!(events[1].id, again);
        assert_eq!(events[1].value, 300);
        assert_eq!(store.revision(), 3);
    }
}
