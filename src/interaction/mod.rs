//! Selection-driven interaction: the viewer state machine, the events that
//! drive it and the commands it sends to the rendering engine.

mod controller;
mod engine;
mod event;

pub use controller::{Selection, Viewer, ViewerError};
pub use engine::{
    ElementData, ElementView, FIT_DURATION_MS, LayoutOptions, RELEASED_MIN_ZOOM, RenderCommand,
    RenderEngine, elements,
};
pub use event::{Event, EventKind};
