//! HTTP front for a viewer session.

mod assets;
mod routes;
mod session;

pub use routes::{AppState, ServeOptions, router, serve};
pub use session::{SessionError, SessionHandle, Update, spawn};
