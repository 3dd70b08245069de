//! Filesystem access for configuration and scope files, behind a trait so
//! commands can be tested against an in-memory tree.
//!
//! Depiction files are not read through here: they stream in asynchronously
//! through the session task.

use std::io;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` with `content`.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

pub fn default_fs() -> &'static RealFs {
    static INSTANCE: RealFs = RealFs;
    &INSTANCE
}
