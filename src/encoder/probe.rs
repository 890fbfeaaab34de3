//! Encoder availability probing
//!
//! Availability is read at call time and never cached, so installing or
//! removing a tool is picked up by the next resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::kind::{EncoderBackend, EncoderKind};

/// Reports whether an encoder candidate can run on this host
pub trait EncoderProbe: Send + Sync {
    fn is_available(&self, kind: EncoderKind) -> bool;
}

/// Probe that looks the backend binary up on the host
///
/// Uses `PATH` unless an explicit search path is given.
#[derive(Debug, Clone, Default)]
pub struct HostProbe {
    search_path: Option<Vec<PathBuf>>,
}

impl HostProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search only the given directories
    pub fn with_search_path<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_path: Some(dirs.into_iter().map(Into::into).collect()),
        }
    }

    /// Locate an executable by name
    pub fn find_binary(&self, name: &str) -> Option<PathBuf> {
        let dirs: Vec<PathBuf> = match &self.search_path {
            Some(dirs) => dirs.clone(),
            None => std::env::var_os("PATH")
                .map(|path| std::env::split_paths(&path).collect())
                .unwrap_or_default(),
        };

        dirs.iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

impl EncoderProbe for HostProbe {
    fn is_available(&self, kind: EncoderKind) -> bool {
        self.find_binary(kind.backend.binary_name()).is_some()
    }
}

/// Probe with a fixed answer
///
/// Useful when the host has already been probed elsewhere, or to pin the
/// outcome in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    backends: HashSet<EncoderBackend>,
    kinds: HashSet<EncoderKind>,
}

impl StaticProbe {
    /// Nothing available
    pub fn none() -> Self {
        Self::default()
    }

    /// Every candidate of every backend available
    pub fn all() -> Self {
        Self::none()
            .with_backend(EncoderBackend::Ffmpeg)
            .with_backend(EncoderBackend::Avconv)
    }

    /// Mark every candidate of a backend available
    pub fn with_backend(mut self, backend: EncoderBackend) -> Self {
        self.backends.insert(backend);
        self
    }

    /// Mark a single candidate available
    pub fn with_kind(mut self, kind: EncoderKind) -> Self {
        self.kinds.insert(kind);
        self
    }
}

impl EncoderProbe for StaticProbe {
    fn is_available(&self, kind: EncoderKind) -> bool {
        self.backends.contains(&kind.backend) || self.kinds.contains(&kind)
    }
}
