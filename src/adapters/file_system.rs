use bytes::Bytes;
use std::io::ErrorKind;
use std::path::Path;

use crate::ports::file_probe::{FileInfo, FileProbe, ProbeFuture, Probed, ReadFuture};

/// A file probe backed by tokio's filesystem primitives
#[derive(Debug, Default, Clone)]
pub struct TokioFileProbe;

impl TokioFileProbe {
    /// Creates a new TokioFileProbe
    ///
    /// This is equivalent to calling `Default::default()` since TokioFileProbe has no state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileProbe for TokioFileProbe {
    fn probe<'a>(&'a self, path: &'a Path) -> ProbeFuture<'a> {
        Box::pin(async move {
            let metadata = match tokio::fs::metadata(path).await {
                Ok(metadata) => metadata,
                // A lookup through a non-directory (e.g. `file.txt/child`)
                // reports NotADirectory; both cases mean nothing servable
                // exists at the path.
                Err(err)
                    if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) =>
                {
                    return Ok(Probed::Missing);
                }
                Err(err) => return Err(err.into()),
            };

            if metadata.is_dir() {
                return Ok(Probed::Directory);
            }

            if !metadata.is_file() {
                // Sockets, fifos and the like are never servable
                return Ok(Probed::Missing);
            }

            let mime = mime_guess::from_path(path).first().map(|m| m.to_string());
            Ok(Probed::File(FileInfo { mime }))
        })
    }

    fn read<'a>(&'a self, path: &'a Path) -> ReadFuture<'a> {
        Box::pin(async move {
            let content = tokio::fs::read(path).await?;
            Ok(Bytes::from(content))
        })
    }
}
