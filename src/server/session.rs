//! The session task.
//!
//! One task owns the [`Viewer`] and applies every event in arrival order, so
//! the model needs no locking. HTTP handlers and file reads talk to it over a
//! channel. Depiction reads run as independent tasks and may finish in any
//! order, possibly after the scope they were issued for has been replaced;
//! their tickets take care of that.

use crate::assets::{self, AssetTicket};
use crate::interaction::{Event, RenderCommand, Viewer, ViewerError};
use crate::model::Generation;
use crate::panel::{self, InfoView};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

const QUEUE_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Viewer(#[from] ViewerError),
    #[error("Viewer session has stopped")]
    Closed,
}

/// What the front-end needs after an event: commands to replay on the
/// renderer, and the panel as it should now look.
#[derive(Debug, Clone, Serialize)]
pub struct Update {
    pub generation: Generation,
    pub commands: Vec<RenderCommand>,
    pub panel: String,
    pub view: InfoView,
}

type Reply = oneshot::Sender<Result<Update, SessionError>>;

enum Request {
    Dispatch { event: Event, reply: Option<Reply> },
    SetAnimation { enabled: bool, reply: Reply },
    Ticket { filename: String, reply: oneshot::Sender<AssetTicket> },
    Poll { reply: Reply },
    Sync { reply: Reply },
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
    requests: mpsc::Sender<Request>,
}

impl SessionHandle {
    pub async fn dispatch(&self, event: Event) -> Result<Update, SessionError> {
        self.call(|reply| Request::Dispatch {
            event,
            reply: Some(reply),
        })
        .await
    }

    pub async fn set_animation(&self, enabled: bool) -> Result<Update, SessionError> {
        self.call(|reply| Request::SetAnimation { enabled, reply })
            .await
    }

    /// Pending commands and the current panel, without any state change.
    pub async fn poll(&self) -> Result<Update, SessionError> {
        self.call(|reply| Request::Poll { reply }).await
    }

    /// Full state for a front-end that has just connected. Commands still
    /// pending for an earlier client are superseded and discarded.
    pub async fn sync(&self) -> Result<Update, SessionError> {
        self.call(|reply| Request::Sync { reply }).await
    }

    /// Ticket for a read that starts now, bound to the scope active now.
    pub async fn ticket(&self, filename: impl Into<String>) -> Result<AssetTicket, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(Request::Ticket {
                filename: filename.into(),
                reply: tx,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    async fn call(
        &self,
        request: impl FnOnce(Reply) -> Request,
    ) -> Result<Update, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(request(tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }
}

struct Session {
    viewer: Viewer<Vec<RenderCommand>>,
    svg_dir: Option<PathBuf>,
    requests: mpsc::WeakSender<Request>,
}

/// Start the session task. With `svg_dir` set, depictions are re-read from
/// it after every successful scope load.
pub fn spawn(viewer: Viewer<Vec<RenderCommand>>, svg_dir: Option<PathBuf>) -> SessionHandle {
    let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
    let session = Session {
        viewer,
        svg_dir,
        requests: tx.downgrade(),
    };
    tokio::spawn(session.run(rx));
    SessionHandle { requests: tx }
}

impl Session {
    async fn run(mut self, mut requests: mpsc::Receiver<Request>) {
        while let Some(request) = requests.recv().await {
            self.process(request);
        }
        debug!("viewer session stopped");
    }

    fn process(&mut self, request: Request) {
        match request {
            Request::Dispatch { event, reply } => {
                let is_load = matches!(event, Event::ScopeFileReady { .. });
                let result = self.viewer.handle(event);
                if result.is_ok() && is_load {
                    if let Some(dir) = &self.svg_dir {
                        spawn_asset_reads(
                            self.requests.clone(),
                            dir.clone(),
                            self.viewer.generation(),
                        );
                    }
                }
                if let Some(reply) = reply {
                    let _ = reply.send(result.map(|_| self.update()).map_err(Into::into));
                }
            }
            Request::SetAnimation { enabled, reply } => {
                self.viewer.set_animation_enabled(enabled);
                let _ = reply.send(Ok(self.update()));
            }
            Request::Ticket { filename, reply } => {
                let _ = reply.send(self.viewer.asset_ticket(filename));
            }
            Request::Poll { reply } => {
                let _ = reply.send(Ok(self.update()));
            }
            Request::Sync { reply } => {
                self.viewer.engine_mut().clear();
                self.viewer.replay();
                let _ = reply.send(Ok(self.update()));
            }
        }
    }

    fn update(&mut self) -> Update {
        let view = self.viewer.panel();
        Update {
            generation: self.viewer.generation(),
            commands: std::mem::take(self.viewer.engine_mut()),
            panel: panel::render_html(&view),
            view,
        }
    }
}

fn spawn_asset_reads(
    requests: mpsc::WeakSender<Request>,
    dir: PathBuf,
    generation: Generation,
) {
    tokio::spawn(async move {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot list depiction directory");
                return;
            }
        };
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "stopped listing depictions");
                    break;
                }
            };
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !assets::is_svg(&filename) {
                continue;
            }
            let ticket = AssetTicket::new(generation, filename);
            tokio::spawn(read_asset(requests.clone(), entry.path(), ticket));
        }
    });
}

async fn read_asset(requests: mpsc::WeakSender<Request>, path: PathBuf, ticket: AssetTicket) {
    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cannot read depiction");
            return;
        }
    };
    // The session may be gone by the time the read finishes
    if let Some(requests) = requests.upgrade() {
        let _ = requests
            .send(Request::Dispatch {
                event: Event::AssetFileReady { ticket, content },
                reply: None,
            })
            .await;
    }
}
