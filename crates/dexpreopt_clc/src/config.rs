use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ClcError, ConfigError, InsertMode, LibraryPaths};

/// Dexpreopt description of a single module, usually read from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    pub module: ModuleSection,
    #[serde(default)]
    pub global: GlobalSection,
    /// Libraries available to the module, in declaration order.
    #[serde(default)]
    pub libraries: IndexMap<String, LibraryDeclaration>,
}

/// The `[module]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
    pub name: String,
    /// Whether the module declares its `<uses-library>` dependencies
    /// explicitly. Without this the context cannot be computed.
    #[serde(default)]
    pub enforce_uses_libraries: bool,
    #[serde(default)]
    pub uses_libraries: Vec<String>,
    #[serde(default)]
    pub optional_uses_libraries: Vec<String>,
}

/// The `[global]` section: settings shared by every module of a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalSection {
    /// Non-updatable system server jars in classpath order.
    #[serde(default)]
    pub system_server_jars: Vec<String>,
}

/// A `[libraries.<name>]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryDeclaration {
    pub build_path: Option<PathBuf>,
    pub install_path: Option<String>,
    /// Defer path validation until the library is actually requested.
    #[serde(default)]
    pub optional: bool,
}

impl ModuleConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn name(&self) -> &str {
        &self.module.name
    }

    /// Build the module's library table from its declarations.
    pub fn library_paths(&self) -> Result<LibraryPaths, ClcError> {
        let mut paths = LibraryPaths::new();
        for (name, declaration) in &self.libraries {
            let mode = if declaration.optional {
                InsertMode::Deferred
            } else {
                InsertMode::Strict
            };
            paths.insert(
                name,
                declaration.build_path.clone(),
                declaration.install_path.clone(),
                mode,
            )?;
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[module]
name = "app"
enforce_uses_libraries = true
uses_libraries = ["b", "a"]
optional_uses_libraries = ["c"]

[libraries.b]
build_path = "out/b.jar"
install_path = "/system/b.jar"

[libraries.a]
build_path = "out/a.jar"
install_path = "/system/a.jar"

[libraries.c]
optional = true
"#;

    #[test]
    fn libraries_keep_declaration_order() {
        let config = ModuleConfig::from_toml_str(SAMPLE).expect("config should parse");
        assert_eq!(config.name(), "app");
        assert!(config.global.system_server_jars.is_empty());

        let paths = config.library_paths().expect("library paths");
        assert_eq!(paths.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(paths.build_path("a"), Some(Path::new("out/a.jar")));
    }

    #[test]
    fn optional_library_may_omit_paths() {
        let config = ModuleConfig::from_toml_str(SAMPLE).expect("config should parse");
        let paths = config.library_paths().expect("library paths");
        let c = paths.get("c").expect("c is recorded");
        assert!(!c.is_resolved());
    }

    #[test]
    fn required_library_without_build_path_is_rejected() {
        let config = ModuleConfig::from_toml_str(
            r#"
[module]
name = "app"

[libraries.a]
install_path = "/system/a.jar"
"#,
        )
        .expect("config should parse");

        let error = config.library_paths().expect_err("missing build path");
        assert_eq!(error, ClcError::UnknownBuildPath("a".to_string()));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = ModuleConfig::from_toml_str(
            r#"
[module]
name = "app"
uses_library = ["a"]
"#,
        )
        .expect_err("typo should be reported");
        assert!(error.to_string().contains("uses_library"));
    }
}
