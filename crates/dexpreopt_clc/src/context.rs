use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::{ClcError, LibraryPaths};

/// Compilation tier a library list applies to.
///
/// The derived ordering is the serialization order: conditional tiers by
/// ascending SDK version, then the unconditional tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextTier {
    /// Applies to apps targeting an SDK version below the given one.
    Conditional(u32),
    /// Applies regardless of target SDK version.
    Unconditional,
}

impl ContextTier {
    pub fn is_conditional(self) -> bool {
        matches!(self, ContextTier::Conditional(_))
    }
}

impl fmt::Display for ContextTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextTier::Conditional(sdk) => write!(f, "{sdk}"),
            ContextTier::Unconditional => f.write_str("any"),
        }
    }
}

/// Library with fully resolved paths, as it appears in a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLoaderContextEntry {
    pub name: String,
    pub build_path: PathBuf,
    pub install_path: String,
}

/// Libraries per compilation tier for a single dexpreopted module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLoaderContextMap {
    pub(crate) tiers: BTreeMap<ContextTier, Vec<ClassLoaderContextEntry>>,
}

impl ClassLoaderContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `names` to `tier`, resolving each against `library_paths`.
    ///
    /// Returns `Ok(false)` when at least one name is not in the table; the
    /// remaining names are still added. A name whose recorded paths are
    /// incomplete aborts the call, leaving previously appended entries in
    /// place.
    pub fn add_libs<I, S>(
        &mut self,
        tier: ContextTier,
        library_paths: &LibraryPaths,
        names: I,
    ) -> Result<bool, ClcError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut complete = true;

        for name in names {
            let name = name.as_ref();
            let Some(library) = library_paths.get(name) else {
                debug!(library = %name, tier = %tier, "no path information for library");
                complete = false;
                continue;
            };

            let (Some(build_path), Some(install_path)) =
                (&library.build_path, &library.install_path)
            else {
                return Err(ClcError::UnresolvedLibraryPath(name.to_string()));
            };

            self.tiers.entry(tier).or_default().push(ClassLoaderContextEntry {
                name: name.to_string(),
                build_path: build_path.clone(),
                install_path: install_path.clone(),
            });
        }

        Ok(complete)
    }

    /// Entries of `tier` in insertion order, if the tier is present.
    pub fn get(&self, tier: ContextTier) -> Option<&[ClassLoaderContextEntry]> {
        self.tiers.get(&tier).map(Vec::as_slice)
    }

    /// Present tiers in serialization order.
    pub fn tiers(&self) -> impl Iterator<Item = (ContextTier, &[ClassLoaderContextEntry])> {
        self.tiers
            .iter()
            .map(|(tier, entries)| (*tier, entries.as_slice()))
    }

    /// Whether `name` appears in any tier.
    pub fn contains(&self, name: &str) -> bool {
        self.tiers
            .values()
            .flatten()
            .any(|entry| entry.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }

    /// Libraries of the unconditional tier, in insertion order.
    ///
    /// This is the list the manifest fixer adds as `<uses-library>` tags;
    /// conditional libraries are provided by the platform.
    pub fn uses_libs(&self) -> Vec<String> {
        self.get(ContextTier::Unconditional)
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }
}
