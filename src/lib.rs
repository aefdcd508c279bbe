pub mod actions;
pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod geometry;
pub mod graphs;
pub mod logging;
pub mod quantize;
pub mod render;
pub mod store;
pub mod transform;

// Re-export commonly used items
pub use cli::{Args, Command, WheelDirection};
pub use config::AppConfig;
pub use control::{GraphProps, GraphSize, LineGraphControl, PointerEvent};
pub use error::{GraphError, Result};
pub use event::{EventId, EventKind, GraphEvent};
pub use geometry::{DomainPoint, PixelPoint};
pub use graphs::{pitch_graph, Lane};
pub use quantize::{calc_quantize, decompose, Quantize, QuantizeSelector, Quantizer};
pub use render::{DrawContext, GraphRenderer, RecordingContext, TextCanvas, Theme};
pub use store::{create_shared_store, lock_store, PianoRollStore, SharedStore};
pub use transform::{CoordinateTransform, LinearTransform, TickTransform, ValueAxis};
