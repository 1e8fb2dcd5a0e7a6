//! Upload domain: validated names, payload sources, the storage executor and
//! the service context that ties them to a worker pool.

pub mod executor;
pub mod name;
pub mod outcome;
pub mod service;
pub mod source;
pub mod storage;

use std::fmt;

pub use executor::StorageExecutor;
pub use name::FileName;
pub use outcome::UploadOutcome;
pub use service::UploadService;
pub use source::{FileSource, MemorySource, UploadReader, UploadSource};
pub use storage::StorageSink;

use crate::core::PipelineError;

/// Job payload: the declared name plus the unread stream.
pub struct Upload {
    name: FileName,
    source: Box<dyn UploadSource>,
}

impl Upload {
    /// Validate `filename` and bind it to `source`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidName`] if the name fails validation.
    pub fn new(filename: &str, source: impl UploadSource) -> Result<Self, PipelineError> {
        Ok(Self::from_parts(FileName::parse(filename)?, Box::new(source)))
    }

    /// Bind an already validated name to a boxed source.
    #[must_use]
    pub fn from_parts(name: FileName, source: Box<dyn UploadSource>) -> Self {
        Self { name, source }
    }

    /// Declared name.
    #[must_use]
    pub const fn name(&self) -> &FileName {
        &self.name
    }

    /// Split into name and source.
    #[must_use]
    pub fn into_parts(self) -> (FileName, Box<dyn UploadSource>) {
        (self.name, self.source)
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
