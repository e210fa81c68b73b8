//! Access to the route source.

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// The two filesystem reads the loader needs.
pub trait SourceReader: Send + Sync {
    /// Last modification time of the source.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Full contents of the source.
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads the route source from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl SourceReader for FsSource {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

#[cfg(test)]
pub(crate) use memory::MemorySource;
