use crate::assets::AssetTicket;

/// Everything that can happen to a viewer. Each kind has exactly one handler
/// in [`Viewer::handle`](super::Viewer::handle).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TapNode { id: String },
    /// Tap on empty canvas.
    TapBackground,
    /// The automatic layout finished at this zoom level.
    LayoutComplete { zoom: f64 },
    ScopeFileReady { filename: String, content: String },
    AssetFileReady { ticket: AssetTicket, content: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TapNode,
    TapBackground,
    LayoutComplete,
    ScopeFileReady,
    AssetFileReady,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::TapNode { .. } => EventKind::TapNode,
            Event::TapBackground => EventKind::TapBackground,
            Event::LayoutComplete { .. } => EventKind::LayoutComplete,
            Event::ScopeFileReady { .. } => EventKind::ScopeFileReady,
            Event::AssetFileReady { .. } => EventKind::AssetFileReady,
        }
    }
}
