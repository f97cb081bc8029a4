use std::path::PathBuf;
use tracing::{debug, warn};

use crate::compat::COMPAT_TIERS;
use crate::{
    compute_class_loader_context, fix_conditional_class_loader_context, ClassLoaderContext,
    ClassLoaderContextMap, ClcError, ContextTier, LibraryPaths, ModuleConfig,
};

/// dex2oat argument that disables the class loader context check.
pub const UNKNOWN_CLASS_LOADER_CONTEXT_ARG: &str = " --class-loader-context=&";

/// Outcome of computing a module's class loader context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedContext {
    Known {
        context: ClassLoaderContext,
        /// Libraries the manifest fixer adds as `<uses-library>`.
        uses_libs: Vec<String>,
    },
    /// The context could not be determined; dex2oat skips its check and the
    /// runtime verifies at load time instead.
    Unknown,
}

impl GeneratedContext {
    pub fn is_known(&self) -> bool {
        matches!(self, GeneratedContext::Known { .. })
    }

    pub fn dex2oat_args(&self) -> &str {
        match self {
            GeneratedContext::Known { context, .. } => &context.flags,
            GeneratedContext::Unknown => UNKNOWN_CLASS_LOADER_CONTEXT_ARG,
        }
    }

    pub fn build_paths(&self) -> &[PathBuf] {
        match self {
            GeneratedContext::Known { context, .. } => &context.build_paths,
            GeneratedContext::Unknown => &[],
        }
    }

    pub fn uses_libs(&self) -> &[String] {
        match self {
            GeneratedContext::Known { uses_libs, .. } => uses_libs,
            GeneratedContext::Unknown => &[],
        }
    }
}

/// Compute the class loader context for `module` from `library_paths`.
///
/// System server jars see every jar that precedes them on the system server
/// classpath. Other modules need `<uses-library>` enforcement; their context
/// consists of the declared libraries plus the compatibility tiers. If any
/// requested library is missing from `library_paths` the context is
/// reported as unknown.
pub fn generate_class_loader_context(
    module: &ModuleConfig,
    library_paths: &LibraryPaths,
) -> Result<GeneratedContext, ClcError> {
    let name = module.name();
    let mut map = ClassLoaderContextMap::new();

    let system_server_jars = &module.global.system_server_jars;
    if let Some(index) = system_server_jars.iter().position(|jar| jar == name) {
        debug!(module = %name, index, "computing system server class loader context");
        let preceding = &system_server_jars[..index];
        if !map.add_libs(ContextTier::Unconditional, library_paths, preceding)? {
            warn!(module = %name, "missing system server jar paths, class loader context is unknown");
            return Ok(GeneratedContext::Unknown);
        }
    } else if module.module.enforce_uses_libraries {
        let declared = module
            .module
            .uses_libraries
            .iter()
            .chain(&module.module.optional_uses_libraries);
        if !map.add_libs(ContextTier::Unconditional, library_paths, declared)? {
            warn!(module = %name, "missing <uses-library> paths, class loader context is unknown");
            return Ok(GeneratedContext::Unknown);
        }

        for (sdk, libraries) in COMPAT_TIERS {
            let tier = ContextTier::Conditional(*sdk);
            if !map.add_libs(tier, library_paths, libraries.iter())? {
                warn!(
                    module = %name,
                    tier = %tier,
                    "missing compatibility library paths, class loader context is unknown"
                );
                return Ok(GeneratedContext::Unknown);
            }
        }
    } else {
        debug!(module = %name, "<uses-library> checks are not enforced");
        return Ok(GeneratedContext::Unknown);
    }

    fix_conditional_class_loader_context(&mut map);

    Ok(GeneratedContext::Known {
        context: compute_class_loader_context(&map),
        uses_libs: map.uses_libs(),
    })
}
