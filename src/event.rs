use std::fmt;

/// Pitch-bend centre (no bend) in the raw 14-bit range.
pub const PITCH_BEND_CENTER: i32 = 0x2000;
/// Largest raw pitch-bend value.
pub const PITCH_BEND_MAX: i32 = 0x3FFF;
/// Largest controller value.
pub const CONTROLLER_MAX: i32 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which automation lane an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ControlChange { controller: u8 },
    PitchBend,
}

impl EventKind {
    /// Inclusive range of raw values the kind can carry.
    pub fn value_range(&self) -> (i32, i32) {
        match self {
            EventKind::ControlChange { .. } => (0, CONTROLLER_MAX),
            EventKind::PitchBend => (0, PITCH_BEND_MAX),
        }
    }

    pub fn clamp(&self, value: f64) -> i32 {
        let (min, max) = self.value_range();
        (value.round() as i32).clamp(min, max)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ControlChange { controller } => write!(f, "cc{}", controller),
            EventKind::PitchBend => write!(f, "pitch bend"),
        }
    }
}

/// A controller or pitch-bend point on a track.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEvent {
    pub id: EventId,
    pub tick: u32,
    pub kind: EventKind,
    pub value: i32,
}
