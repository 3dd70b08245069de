use crate::fs::{FileSystem, default_fs};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".scope-viewer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Animate the viewport onto a selection's neighborhood.
    pub animate: bool,
    /// Directory of compound depictions, re-read after every scope load.
    pub svg_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    server: Option<RawServer>,
    view: Option<RawView>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    open_browser: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawView {
    animate: Option<bool>,
    svg_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8650,
            open_browser: false,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            animate: true,
            svg_dir: None,
        }
    }
}

impl Config {
    /// Load `.scope-viewer.toml` from `dir`, or defaults if there is none.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(&dir.join(CONFIG_FILE_NAME), default_fs())
    }

    /// Load an explicit config file; a missing file falls back to defaults.
    pub fn load_with_fs(path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }
        let content = fs.read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let server_defaults = ServerConfig::default();
        let view_defaults = ViewConfig::default();

        let server = match raw.server {
            Some(s) => ServerConfig {
                host: s.host.unwrap_or(server_defaults.host),
                port: s.port.unwrap_or(server_defaults.port),
                open_browser: s.open_browser.unwrap_or(server_defaults.open_browser),
            },
            None => server_defaults,
        };

        let view = match raw.view {
            Some(v) => ViewConfig {
                animate: v.animate.unwrap_or(view_defaults.animate),
                svg_dir: v.svg_dir,
            },
            None => view_defaults,
        };

        Ok(Self { server, view })
    }
}

pub fn generate_config_template() -> String {
    let defaults = Config::default();
    format!(
        r#"# scope-viewer configuration

[server]
host = "{host}"
port = {port}
# Open the viewer in a browser on startup
open_browser = {open}

[view]
# Animate the viewport onto the neighborhood of a selected node
animate = {animate}
# Directory of compound depictions (<node id>.svg), re-read after each scope load
# svg_dir = "out/svg"
"#,
        host = defaults.server.host,
        port = defaults.server.port,
        open = defaults.server.open_browser,
        animate = defaults.view.animate,
    )
}
