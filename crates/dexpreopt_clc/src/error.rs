use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a class loader context.
///
/// Every variant points at a metadata inconsistency upstream, so callers are
/// expected to abort the module's dexpreopt step rather than recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClcError {
    #[error("unknown build path to <uses-library> '{0}'")]
    UnknownBuildPath(String),
    #[error("unknown install path to <uses-library> '{0}'")]
    UnknownInstallPath(String),
    #[error("dexpreopt cannot find path for <uses-library> '{0}'")]
    UnresolvedLibraryPath(String),
}

/// Errors raised while loading a module description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read module config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid module config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
