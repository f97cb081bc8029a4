use std::path::PathBuf;

use crate::{ClassLoaderContextEntry, ClassLoaderContextMap};

/// Rendered class loader context for a dex2oat invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLoaderContext {
    /// `--host-context-for-sdk` / `--target-context-for-sdk` flags, each
    /// preceded by a single space.
    pub flags: String,
    /// Build paths of every library in the context, in flag order. The
    /// dexpreopt rule depends on all of them.
    pub build_paths: Vec<PathBuf>,
}

/// Render `map` into compiler flags and dependency paths.
///
/// Tiers are emitted in ascending SDK order with the unconditional tier
/// (`any`) last. Empty tiers are skipped.
pub fn compute_class_loader_context(map: &ClassLoaderContextMap) -> ClassLoaderContext {
    let mut context = ClassLoaderContext::default();

    for (tier, entries) in map.tiers() {
        if entries.is_empty() {
            continue;
        }

        let host = pcl_chain(entries, |entry| entry.build_path.display().to_string());
        let target = pcl_chain(entries, |entry| entry.install_path.clone());
        context
            .flags
            .push_str(&format!(" --host-context-for-sdk {tier} {host}"));
        context
            .flags
            .push_str(&format!(" --target-context-for-sdk {tier} {target}"));

        context
            .build_paths
            .extend(entries.iter().map(|entry| entry.build_path.clone()));
    }

    context
}

fn pcl_chain<F>(entries: &[ClassLoaderContextEntry], path_of: F) -> String
where
    F: Fn(&ClassLoaderContextEntry) -> String,
{
    entries
        .iter()
        .map(|entry| format!("PCL[{}]", path_of(entry)))
        .collect::<Vec<_>>()
        .join("#")
}
