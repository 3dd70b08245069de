pub mod assets;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod interaction;
pub mod labels;
pub mod model;
pub mod panel;
pub mod server;
pub mod style;

pub use assets::{AssetTicket, AttachOutcome};
pub use cli::Cli;
pub use commands::{cmd_init, cmd_serve};
pub use config::Config;
pub use interaction::{Event, RenderCommand, RenderEngine, Selection, Viewer, ViewerError};
pub use model::{FormatError, Generation, Neighborhood, ScopeGraph};
pub use panel::InfoView;
