//! Graph adapters binding [`LineGraphControl`] to one kind of event.

mod controller;
mod pitch;

pub use controller::{
    controller_graph, expression_graph, modulation_graph, pan_graph, volume_graph,
    CONTROLLER_AXIS, CONTROLLER_MAX_VALUE, EXPRESSION, MODULATION, PAN, VOLUME,
};
pub use pitch::{pitch_graph, PITCH_AXIS, PITCH_MAX_VALUE};

use crate::control::{GraphSize, LineGraphControl};
use crate::event::EventKind;
use crate::error::{GraphError, Result};
use crate::render::DrawContext;
use crate::store::SharedStore;
use std::fmt;
use std::str::FromStr;

/// An automation lane selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    PitchBend,
    Controller(u8),
}

impl Lane {
    pub fn kind(self) -> EventKind {
        match self {
            Lane::PitchBend => EventKind::PitchBend,
            Lane::Controller(controller) => EventKind::ControlChange { controller },
        }
    }

    pub fn graph<C: DrawContext>(
        self,
        size: GraphSize,
        store: SharedStore,
    ) -> Result<LineGraphControl<C>> {
        match self {
            Lane::PitchBend => pitch_graph(size, store),
            Lane::Controller(controller) => controller_graph(size, controller, store),
        }
    }
}

impl FromStr for Lane {
    type Err = GraphError;

    /// Accepts `pitch`, `volume`, `pan`, `expression`, `modulation` or
    /// `cc:<0-127>`.
    fn from_str(s: &str) -> Result<Self> {
        let lane = match s.to_ascii_lowercase().as_str() {
            "pitch" | "pitchbend" => Lane::PitchBend,
            "volume" => Lane::Controller(VOLUME),
            "pan" => Lane::Controller(PAN),
            "expression" => Lane::Controller(EXPRESSION),
            "modulation" => Lane::Controller(MODULATION),
            other => other
                .strip_prefix("cc:")
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| *n <= 127)
                .map(Lane::Controller)
                .ok_or_else(|| GraphError::InvalidLane(s.to_string()))?,
        };
        Ok(lane)
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::PitchBend => write!(f, "pitch"),
            Lane::Controller(n) => write!(f, "cc:{}", n),
        }
    }
}
