use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scope-viewer")]
#[command(about = "Interactive viewer for retrosynthesis scope graphs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the viewer in a browser session
    Serve(ServeArgs),

    /// Generate a starter .scope-viewer.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Scope file to load on startup
    #[arg(long)]
    pub scope: Option<PathBuf>,

    /// Directory of compound depictions (<node id>.svg), re-read after each load
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port for HTTP server (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Do not animate the viewport onto a selection
    #[arg(long)]
    pub no_animation: bool,

    /// Config file (defaults to .scope-viewer.toml in the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create .scope-viewer.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}
