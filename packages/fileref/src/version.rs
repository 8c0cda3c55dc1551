//! Library version numbers and the load-time compatibility gate.

use std::fmt;

use crate::{FileRefError, Result};

/// A `major.minor.patch` version of the metadata library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Check a runtime library against the version it was compiled for.
///
/// A different major version is fatal. A runtime older in minor version than
/// the compiled one only logs a warning.
pub fn check_compatible(compiled: Version, runtime: Version) -> Result<()> {
    if compiled.major != runtime.major {
        return Err(FileRefError::VersionMismatch {
            compiled: compiled.to_string(),
            runtime: runtime.to_string(),
        });
    }
    if compiled.minor > runtime.minor {
        log::warn!(
            "library runtime version {} is older than compile-time version {}",
            runtime,
            compiled
        );
    }
    Ok(())
}
