use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::config_dir;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Object classes known up front; each gets a thumbnail row in the dock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

impl Default for ClassCatalog {
    fn default() -> Self {
        let class = |name: &str, color: &str| ClassDefinition {
            name: name.to_string(),
            color: Some(color.to_string()),
        };
        Self {
            classes: vec![
                class("person", "#ff0000"),
                class("car", "#00ff00"),
                class("bicycle", "#0000ff"),
                class("dog", "#ffff00"),
            ],
        }
    }
}

impl ClassCatalog {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.classes
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.color.as_deref())
    }

    /// Add a class if it is not known yet. Returns `true` if it was added.
    pub fn ensure(&mut self, name: &str) -> bool {
        if self.classes.iter().any(|c| c.name == name) {
            return false;
        }
        self.classes.push(ClassDefinition {
            name: name.to_string(),
            color: None,
        });
        true
    }
}

/// Load the class catalog from YAML.
pub fn load_classes(path: Option<&str>) -> ClassCatalog {
    load_classes_with_source(path).0
}

/// Like [`load_classes`], also returning the file the catalog came from
/// (`None` for the bundled default).
pub fn load_classes_with_source(path: Option<&str>) -> (ClassCatalog, Option<PathBuf>) {
    // Search order:
    //   1) explicit path (if provided)
    //   2) ./classes.yaml
    //   3) classes.yaml in the user config directory
    let mut search_paths: Vec<PathBuf> = Vec::new();
    if let Some(p) = path {
        search_paths.push(PathBuf::from(shellexpand::tilde(p).as_ref()));
    }
    search_paths.push(PathBuf::from("./classes.yaml"));
    if let Some(user) = user_classes_path() {
        search_paths.push(user);
    }

    for candidate in search_paths {
        if !candidate.exists() {
            continue;
        }

        match try_load_class_file(&candidate) {
            Ok(catalog) => {
                debug!("loaded {} classes from {}", catalog.classes.len(), candidate.display());
                return (catalog, Some(candidate));
            }
            Err(e) => warn!("failed to load class catalog '{}': {e}", candidate.display()),
        }
    }

    // Bundled default, compiled in.
    let catalog = parse_class_content(include_str!("../classes.yaml")).unwrap_or_else(|e| {
        warn!("bundled class catalog invalid ({e}); using built-in defaults");
        ClassCatalog::default()
    });
    (catalog, None)
}

/// `classes.yaml` next to `config.toml` in the user config directory.
pub fn user_classes_path() -> Option<PathBuf> {
    config_dir().ok().map(|dir| dir.join("classes.yaml"))
}

/// Add `name` to the catalog and write it to `target` if it was new.
/// Returns `true` if the class was added.
pub fn remember_class(catalog: &mut ClassCatalog, name: &str, target: &Path) -> Result<bool, ConfigError> {
    if !catalog.ensure(name) {
        return Ok(false);
    }
    save_classes(catalog, &target.to_string_lossy())?;
    Ok(true)
}

fn try_load_class_file(path: &Path) -> Result<ClassCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_class_content(&content)
}

/// Parse class YAML, accepting either a bare list or a `classes:` mapping.
pub fn parse_class_content(content: &str) -> Result<ClassCatalog, ConfigError> {
    if let Ok(classes) = serde_yaml::from_str::<Vec<ClassDefinition>>(content) {
        return Ok(ClassCatalog { classes });
    }
    Ok(serde_yaml::from_str::<ClassCatalog>(content)?)
}

pub fn save_classes(catalog: &ClassCatalog, path: &str) -> Result<(), ConfigError> {
    let expanded = shellexpand::tilde(path);
    let path = Path::new(expanded.as_ref());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let yaml = serde_yaml::to_string(catalog)?;
    std::fs::write(path, yaml).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
