// dexpreopt_clc - Class loader context construction for dexpreopt

//! A class loader context (CLC) lists, per compilation tier, the
//! `<uses-library>` dependencies that dex2oat must see when compiling an
//! application ahead of time. The unconditional tier applies to every device;
//! conditional tiers apply only to apps targeting an SDK below the tier's
//! version, where the platform still adds compatibility libraries implicitly.
//!
//! Typical flow:
//!
//! 1. Fill a [`LibraryPaths`] table from module metadata.
//! 2. Request libraries per tier with [`ClassLoaderContextMap::add_libs`].
//! 3. Reconcile tiers with [`fix_conditional_class_loader_context`].
//! 4. Render with [`compute_class_loader_context`] and
//!    [`ClassLoaderContextMap::uses_libs`].
//!
//! [`generate_class_loader_context`] runs the whole flow for a
//! [`ModuleConfig`].

pub mod compat;
mod config;
mod context;
mod error;
mod fixup;
mod generate;
mod library_paths;
mod serialize;

pub use config::{GlobalSection, LibraryDeclaration, ModuleConfig, ModuleSection};
pub use context::{ClassLoaderContextEntry, ClassLoaderContextMap, ContextTier};
pub use error::{ClcError, ConfigError};
pub use fixup::fix_conditional_class_loader_context;
pub use generate::{
    generate_class_loader_context, GeneratedContext, UNKNOWN_CLASS_LOADER_CONTEXT_ARG,
};
pub use library_paths::{InsertMode, LibraryPath, LibraryPaths};
pub use serialize::{compute_class_loader_context, ClassLoaderContext};
