use crate::cli::ServeArgs;
use crate::config::{CONFIG_FILE_NAME, Config, ConfigError};
use crate::fs::{FileSystem, default_fs};
use crate::interaction::{Event, Viewer};
use crate::server::{self, ServeOptions, SessionError, SessionHandle};
use crate::style;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Server failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not load {file}: {source}")]
    Format { file: String, source: SessionError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitialScope {
    pub filename: String,
    pub content: String,
}

/// Everything `serve` needs, with config and flags already merged.
#[derive(Debug, Clone)]
pub struct ServePlan {
    pub options: ServeOptions,
    pub animate: bool,
    pub svg_dir: Option<PathBuf>,
    pub scope: Option<InitialScope>,
}

impl ServePlan {
    /// Merge the config file under the command-line flags. Flags win.
    pub fn resolve(args: &ServeArgs, fs: &dyn FileSystem) -> Result<Self, ServeError> {
        let config = match &args.config {
            // An explicit config file has to exist
            Some(path) => {
                let content = read(fs, path)?;
                Config::parse(&content)?
            }
            None => Config::load_with_fs(Path::new(CONFIG_FILE_NAME), fs)?,
        };

        let scope = match &args.scope {
            Some(path) => Some(InitialScope {
                filename: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
                content: read(fs, path)?,
            }),
            None => None,
        };

        Ok(Self {
            options: ServeOptions {
                host: args.host.clone().unwrap_or(config.server.host),
                port: args.port.unwrap_or(config.server.port),
                open_browser: args.open || config.server.open_browser,
            },
            animate: config.view.animate && !args.no_animation,
            svg_dir: args.svg_dir.clone().or(config.view.svg_dir),
            scope,
        })
    }

    /// Spawn the session and load the initial scope, if any. Must run inside
    /// a tokio runtime.
    pub async fn start(self) -> Result<(SessionHandle, ServeOptions), ServeError> {
        let viewer = Viewer::new(Vec::new()).with_animation(self.animate);
        let session = server::spawn(viewer, self.svg_dir);

        if let Some(scope) = self.scope {
            let event = Event::ScopeFileReady {
                filename: scope.filename.clone(),
                content: scope.content,
            };
            let update = session
                .dispatch(event)
                .await
                .map_err(|source| ServeError::Format {
                    file: scope.filename.clone(),
                    source,
                })?;
            style::status(&format!(
                "Loaded {} (generation {})",
                scope.filename, update.generation
            ));
        }

        Ok((session, self.options))
    }

    pub async fn run(self) -> Result<(), ServeError> {
        let (session, options) = self.start().await?;
        server::serve(session, options).await?;
        Ok(())
    }
}

fn read(fs: &dyn FileSystem, path: &Path) -> Result<String, ServeError> {
    fs.read_to_string(path).map_err(|source| ServeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn cmd_serve(args: ServeArgs) -> i32 {
    cmd_serve_with_fs(args, default_fs())
}

pub fn cmd_serve_with_fs(args: ServeArgs, fs: &dyn FileSystem) -> i32 {
    let plan = match ServePlan::resolve(&args, fs) {
        Ok(plan) => plan,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            style::error(&format!("Failed to create tokio runtime: {}", e));
            return 1;
        }
    };

    if let Err(e) = rt.block_on(plan.run()) {
        style::error(&e.to_string());
        return 1;
    }

    0
}
