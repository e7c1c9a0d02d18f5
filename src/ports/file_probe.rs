use bytes::Bytes;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use thiserror::Error;

/// Error type for file probe operations
///
/// "Missing" and "is a directory" are not errors; they are ordinary probe
/// outcomes reported through [`Probed`]. Only unclassified IO failures
/// (permissions and the like) surface here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProbeError {
    /// Error when encountering an IO issue
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for file probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Metadata for a probed regular file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Best-guess MIME type, `None` when undeterminable
    pub mime: Option<String>,
}

/// Tagged outcome of probing a filesystem path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probed {
    /// No filesystem entry exists at the path
    Missing,
    /// The path is a directory
    Directory,
    /// The path is a regular file
    File(FileInfo),
}

/// Type alias for async probe outcomes
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = ProbeResult<Probed>> + Send + 'a>>;

/// Type alias for async file content reads
pub type ReadFuture<'a> = Pin<Box<dyn Future<Output = ProbeResult<Bytes>> + Send + 'a>>;

/// FileProbe defines the port (interface) for inspecting and reading files
pub trait FileProbe: Send + Sync + 'static {
    /// Report whether `path` is missing, a directory, or a regular file
    ///
    /// # Arguments
    /// * `path` - The filesystem path to inspect
    ///
    /// # Returns
    /// A future that resolves to the tagged probe outcome or an IO error
    fn probe<'a>(&'a self, path: &'a Path) -> ProbeFuture<'a>;

    /// Read the full content of the regular file at `path`
    ///
    /// Content is produced fresh per call and never cached.
    fn read<'a>(&'a self, path: &'a Path) -> ReadFuture<'a>;
}
