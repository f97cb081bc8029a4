use std::collections::HashSet;
use tracing::debug;

use crate::compat;
use crate::ClassLoaderContextMap;

/// Reconcile conditional tiers with the unconditional one.
///
/// - Duplicate names within a tier keep their first occurrence.
/// - Libraries already in the unconditional tier are dropped from every
///   conditional tier, since they are loaded anyway.
/// - Conditional compatibility libraries whose companion library is absent
///   from the whole context are dropped. Libraries the module declares
///   itself in the unconditional tier are always kept.
/// - Tiers left without entries are removed.
pub fn fix_conditional_class_loader_context(map: &mut ClassLoaderContextMap) {
    let unconditional: HashSet<String> = map.uses_libs().into_iter().collect();
    let present: HashSet<String> = map
        .tiers
        .values()
        .flatten()
        .map(|entry| entry.name.clone())
        .collect();

    for (tier, entries) in map.tiers.iter_mut() {
        let tier = *tier;
        let mut seen = HashSet::new();
        entries.retain(|entry| {
            let name = entry.name.as_str();
            if !seen.insert(name.to_string()) {
                debug!(library = %name, tier = %tier, "dropping duplicate library");
                return false;
            }
            if tier.is_conditional() && unconditional.contains(name) {
                debug!(
                    library = %name,
                    tier = %tier,
                    "dropping conditional library already in unconditional context"
                );
                return false;
            }
            if let Some(companion) = compat::required_companion(name) {
                if tier.is_conditional() && !present.contains(companion) {
                    debug!(
                        library = %name,
                        companion = %companion,
                        tier = %tier,
                        "dropping compatibility library without its companion"
                    );
                    return false;
                }
            }
            true
        });
    }

    map.tiers.retain(|tier, entries| {
        if entries.is_empty() {
            debug!(tier = %tier, "dropping empty class loader context");
        }
        !entries.is_empty()
    });
}
