mod init;
mod serve;

pub use init::{cmd_init, cmd_init_with_fs};
pub use serve::{InitialScope, ServeError, ServePlan, cmd_serve, cmd_serve_with_fs};
