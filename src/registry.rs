use std::path::{Path, PathBuf};

/// Directory searched for executables when nothing else has been configured.
pub const DEFAULT_PATH: &str = "/bin";

/// Ordered list of directories searched for external commands.
///
/// The list is only ever replaced as a whole; duplicates are kept and an empty list
/// means that no external command can be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRegistry {
    dirs: Vec<PathBuf>,
}

impl PathRegistry {
    /// Create a registry holding exactly `dirs`, in order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the whole directory list.
    pub fn set<I, P>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
    }

    /// Current directories in search order.
    pub fn list(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

impl Default for PathRegistry {
    fn default() -> Self {
        Self::new([DEFAULT_PATH])
    }
}
