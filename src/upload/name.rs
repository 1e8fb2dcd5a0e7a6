//! Validated storage file names.

use std::fmt;
use std::path::{Component, Path};

use crate::core::PipelineError;

/// A declared upload name reduced to the base name it is stored under.
///
/// Directory parts are dropped, so `dir/a.txt` and `C:\fakepath\a.txt`
/// both store as `a.txt`. A name that tries to leave the storage root is
/// rejected with [`PipelineError::InvalidName`] instead: any `..` part, a
/// leading separator, a drive-prefixed base, a NUL byte, or a base name that
/// is empty or `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileName(String);

impl FileName {
    /// Sanitize `raw` to its base name.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidName`] if `raw` escapes the root or has no
    /// usable base name.
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let invalid = || PipelineError::InvalidName(raw.to_owned());

        if raw.contains('\0') || raw.starts_with(['/', '\\']) {
            return Err(invalid());
        }

        if raw.split(['/', '\\']).any(|part| part == "..") {
            return Err(invalid());
        }
        let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
        if base.is_empty() || base == "." || has_drive_prefix(base) {
            return Err(invalid());
        }

        let mut components = Path::new(base).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == base => Ok(Self(base.to_owned())),
            _ => Err(invalid()),
        }
    }

    /// The validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl AsRef<Path> for FileName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
