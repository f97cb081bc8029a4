use std::path::{Path, PathBuf};
use tracing::debug;

use crate::compat;
use crate::ClcError;

/// How missing path information is treated when a library is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Missing paths fail the insertion.
    Strict,
    /// Missing paths are recorded and only fail if the library is requested
    /// by a class loader context.
    Deferred,
}

/// Build and install location of a single `<uses-library>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPath {
    pub name: String,
    /// Path to the library's dex jar on the build host.
    pub build_path: Option<PathBuf>,
    /// Path the library is installed to on the device.
    pub install_path: Option<String>,
}

impl LibraryPath {
    pub fn is_resolved(&self) -> bool {
        self.build_path.is_some() && self.install_path.is_some()
    }
}

/// Libraries known to a module, in declaration order.
///
/// Lookups return the first entry recorded for a name. Merged tables are
/// appended as-is, so later duplicates are shadowed rather than removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryPaths {
    entries: Vec<LibraryPath>,
}

impl LibraryPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a library, validating its paths according to `mode`.
    ///
    /// Compatibility libraries without an install path get the default
    /// framework location. A name that is already present keeps its first
    /// entry.
    pub fn insert(
        &mut self,
        name: &str,
        build_path: Option<PathBuf>,
        install_path: Option<String>,
        mode: InsertMode,
    ) -> Result<(), ClcError> {
        if build_path.is_none() && mode == InsertMode::Strict {
            return Err(ClcError::UnknownBuildPath(name.to_string()));
        }

        let install_path = match install_path {
            Some(path) => Some(path),
            None => match compat::default_install_path(name) {
                Some(default) => Some(default),
                None if mode == InsertMode::Strict => {
                    return Err(ClcError::UnknownInstallPath(name.to_string()));
                }
                None => None,
            },
        };

        if self.get(name).is_some() {
            debug!(library = %name, "library already recorded, keeping first entry");
            return Ok(());
        }

        self.entries.push(LibraryPath {
            name: name.to_string(),
            build_path,
            install_path,
        });
        Ok(())
    }

    /// Strict insertion for a library whose paths are expected to be known.
    pub fn add_library_path(
        &mut self,
        name: &str,
        build_path: Option<PathBuf>,
        install_path: Option<String>,
    ) -> Result<(), ClcError> {
        self.insert(name, build_path, install_path, InsertMode::Strict)
    }

    /// Deferred insertion for a dependency that may not be a library at all.
    ///
    /// Nothing is recorded when the name is unknown.
    pub fn insert_if_named(
        &mut self,
        name: Option<&str>,
        build_path: Option<PathBuf>,
        install_path: Option<String>,
    ) -> Result<(), ClcError> {
        match name {
            Some(name) => self.insert(name, build_path, install_path, InsertMode::Deferred),
            None => Ok(()),
        }
    }

    /// Append all of `other`'s entries after the current ones.
    pub fn merge(&mut self, other: &LibraryPaths) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn get(&self, name: &str) -> Option<&LibraryPath> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryPath> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build path recorded for `name`, if it is known.
    pub fn build_path(&self, name: &str) -> Option<&Path> {
        self.get(name).and_then(|entry| entry.build_path.as_deref())
    }
}

impl<'a> IntoIterator for &'a LibraryPaths {
    type Item = &'a LibraryPath;
    type IntoIter = std::slice::Iter<'a, LibraryPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
