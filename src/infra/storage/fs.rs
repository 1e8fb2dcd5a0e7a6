//! Flat-directory file storage.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncRead;
use tracing::{debug, warn};

use crate::core::PipelineError;
use crate::upload::{FileName, StorageSink};

/// Stores every upload as `<root>/<name>`. No index, no sidecar metadata.
///
/// Concurrent uploads with the same name race; the last writer wins.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Use `root` as the storage directory, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Storage directory ready");
        Ok(Self { root })
    }

    /// Storage directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination path for a validated name.
    #[must_use]
    pub fn path_for(&self, name: &FileName) -> PathBuf {
        self.root.join(name)
    }

    /// Names of the regular files in the storage directory, sorted.
    ///
    /// Files whose names are not valid UTF-8 cannot be addressed by a
    /// download request; they are logged and left out.
    ///
    /// # Errors
    ///
    /// [`PipelineError::List`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>, PipelineError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(PipelineError::List)? {
            let entry = entry.map_err(PipelineError::List)?;
            if !entry.file_type().map_err(PipelineError::List)?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(
                    name = %raw.to_string_lossy(),
                    "Skipping stored file with a non UTF-8 name"
                ),
            }
        }
        names.sort_unstable();
        Ok(names)
    }

    /// Path of an existing file, looked up by exact name.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidName`] or [`PipelineError::NotFound`].
    pub fn locate(&self, filename: &str) -> Result<PathBuf, PipelineError> {
        let path = self.path_for(&FileName::parse(filename)?);
        if path.is_file() {
            Ok(path)
        } else {
            Err(PipelineError::NotFound(filename.to_owned()))
        }
    }

    /// Open an existing file for streaming it back to a client.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidName`], [`PipelineError::NotFound`], or
    /// [`PipelineError::Open`] for other failures.
    pub fn open(&self, filename: &str) -> Result<std::fs::File, PipelineError> {
        let path = self.locate(filename)?;
        std::fs::File::open(path).map_err(|e| Self::read_error(filename, e))
    }

    /// Full contents of an existing file.
    ///
    /// # Errors
    ///
    /// Same as [`FsStorage::open`].
    pub fn read(&self, filename: &str) -> Result<Vec<u8>, PipelineError> {
        let path = self.locate(filename)?;
        std::fs::read(path).map_err(|e| Self::read_error(filename, e))
    }

    /// Map a failure after a successful `locate`. `NotFound` here means the
    /// file vanished between the lookup and the read.
    fn read_error(filename: &str, err: io::Error) -> PipelineError {
        match err.kind() {
            io::ErrorKind::NotFound => PipelineError::NotFound(filename.to_owned()),
            _ => PipelineError::Open(err),
        }
    }
}

#[async_trait]
impl StorageSink for FsStorage {
    async fn persist(
        &self,
        name: &FileName,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, PipelineError> {
        let path = self.path_for(name);
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(PipelineError::Create)?;
        let bytes = tokio::io::copy(reader, &mut file)
            .await
            .map_err(PipelineError::Write)?;
        // tokio buffers writes on a blocking thread; sync before reporting.
        file.sync_all().await.map_err(PipelineError::Write)?;
        Ok(bytes)
    }
}
