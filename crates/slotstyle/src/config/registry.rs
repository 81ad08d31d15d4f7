//! Named config registry for file-based style loading.
//!
//! Applications usually keep one style file per component next to each
//! other (`styles/button.yaml`, `styles/dialog.yaml`) and look them up by
//! name when building styled definitions.
//!
//! # Resolution
//!
//! 1. **Inline configs** (added via [`ConfigRegistry::add_inline`] or
//!    [`ConfigRegistry::add_config`]) have highest priority
//! 2. **File configs** are searched in directory registration order (first
//!    directory wins)
//! 3. Names can be given with or without extension: `"button"` resolves to
//!    the winning file, `"button.json"` to that exact file when it exists
//!    (falling back to `"button"` otherwise)
//!
//! Names of files in subdirectories are their relative path without
//! extension, using `/` as separator (`forms/checkbox`).
//!
//! # Extension Priority
//!
//! See [`CONFIG_EXTENSIONS`]: if `button.yaml` and `button.json` both exist
//! in one directory, `button.yaml` wins. Only the winner is parsed when the
//! directory is added, so a broken shadowed file never fails [`ConfigRegistry::add_dir`].
//!
//! # Example
//!
//! ```rust
//! use slotstyle::ConfigRegistry;
//!
//! let mut registry = ConfigRegistry::new();
//! registry.add_inline("badge", "base:\n  root: { bold: true }\n").unwrap();
//!
//! assert!(registry.contains("badge"));
//! assert!(registry.get("badge").unwrap().base.is_some());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::loader::CONFIG_EXTENSIONS;
use super::StyledConfig;
use crate::error::ConfigError;

/// A config loaded from disk, with the file it came from.
#[derive(Debug, Clone)]
struct FileEntry {
    /// Relative path with extension, `/`-separated.
    name_with_ext: String,
    path: PathBuf,
    config: StyledConfig,
}

/// Configs found in one directory walk.
///
/// Only the highest-priority file per base name is parsed. Lower-priority
/// siblings are kept by path and parsed on explicit request.
#[derive(Debug, Default)]
struct LoadedDir {
    files: IndexMap<String, FileEntry>,
    shadowed: IndexMap<String, PathBuf>,
}

enum Found<'a> {
    Inline(&'a StyledConfig),
    File(&'a FileEntry),
    Shadowed(&'a Path),
}

/// Registry of named author configs.
///
/// Names iterate in a stable order: inline configs in insertion order, then
/// file configs in directory registration order, sorted by name within each.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    inline: IndexMap<String, StyledConfig>,
    dirs: Vec<PathBuf>,
    files: IndexMap<String, FileEntry>,
    shadowed: IndexMap<String, PathBuf>,
}

impl ConfigRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline config from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn add_inline(&mut self, name: impl Into<String>, yaml: &str) -> Result<(), ConfigError> {
        let config = StyledConfig::from_yaml(yaml)?;
        self.inline.insert(name.into(), config);
        Ok(())
    }

    /// Adds a pre-built config.
    pub fn add_config(&mut self, name: impl Into<String>, config: StyledConfig) {
        self.inline.insert(name.into(), config);
    }

    /// Adds a directory of config files and loads them.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or a file that wins
    /// its name fails to parse. Shadowed files are not parsed.
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(ConfigError::load(format!(
                "Config directory not found: {}",
                path.display()
            )));
        }
        let loaded = load_dir(path)?;
        absorb(&mut self.files, &mut self.shadowed, loaded);
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    /// Gets a config by name.
    ///
    /// A name with an extension (`button.json`) selects that exact file when
    /// it exists, and otherwise falls back to the base name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no config has that name, or a
    /// load/parse error when an explicitly requested shadowed file is broken.
    pub fn get(&self, name: &str) -> Result<StyledConfig, ConfigError> {
        match self.find(name) {
            Some(Found::Inline(config)) => Ok(config.clone()),
            Some(Found::File(entry)) => Ok(entry.config.clone()),
            Some(Found::Shadowed(path)) => StyledConfig::from_file(path),
            None => Err(ConfigError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Returns the source file of a file-based config.
    pub fn source_path(&self, name: &str) -> Option<&Path> {
        match self.find(name)? {
            Found::Inline(_) => None,
            Found::File(entry) => Some(entry.path.as_path()),
            Found::Shadowed(path) => Some(path),
        }
    }

    /// Returns true if a config with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Iterates over all registered base names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inline
            .keys()
            .chain(self.files.keys().filter(|k| !self.inline.contains_key(*k)))
            .map(String::as_str)
    }

    /// Returns the number of distinct names.
    pub fn len(&self) -> usize {
        self.names().count()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.files.is_empty()
    }

    /// Re-reads every registered directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read or a file fails to parse.
    /// The registry is left unchanged in that case.
    pub fn refresh(&mut self) -> Result<(), ConfigError> {
        let mut files = IndexMap::new();
        let mut shadowed = IndexMap::new();
        for dir in &self.dirs {
            absorb(&mut files, &mut shadowed, load_dir(dir)?);
        }
        self.files = files;
        self.shadowed = shadowed;
        Ok(())
    }

    fn find(&self, name: &str) -> Option<Found<'_>> {
        if let Some(config) = self.inline.get(name) {
            return Some(Found::Inline(config));
        }
        let base_name = strip_extension(name);
        if base_name != name {
            let exact = self.files.get(base_name).filter(|e| e.name_with_ext == name);
            if let Some(entry) = exact {
                return Some(Found::File(entry));
            }
            if let Some(path) = self.shadowed.get(name) {
                return Some(Found::Shadowed(path.as_path()));
            }
        }
        self.inline
            .get(base_name)
            .map(Found::Inline)
            .or_else(|| self.files.get(base_name).map(Found::File))
    }
}

/// Merges one directory's configs; names already present win.
fn absorb(
    files: &mut IndexMap<String, FileEntry>,
    shadowed: &mut IndexMap<String, PathBuf>,
    loaded: LoadedDir,
) {
    for (name, entry) in loaded.files {
        match files.entry(name) {
            Entry::Occupied(_) => {
                shadowed.entry(entry.name_with_ext).or_insert(entry.path);
            }
            Entry::Vacant(e) => {
                e.insert(entry);
            }
        }
    }
    for (name_with_ext, path) in loaded.shadowed {
        shadowed.entry(name_with_ext).or_insert(path);
    }
}

/// Strips a recognized config extension from a name.
fn strip_extension(name: &str) -> &str {
    CONFIG_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

fn extension_priority(file_name: &str) -> Option<usize> {
    CONFIG_EXTENSIONS
        .iter()
        .position(|ext| file_name.ends_with(ext))
}

struct Candidate {
    name: String,
    name_with_ext: String,
    priority: usize,
    path: PathBuf,
}

fn collect_candidates(root: &Path) -> Result<Vec<Candidate>, ConfigError> {
    let mut candidates = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read = fs::read_dir(&dir)
            .map_err(|e| ConfigError::load(format!("Failed to read {}: {}", dir.display(), e)))?;

        for item in read {
            let item = item.map_err(|e| ConfigError::load(e.to_string()))?;
            let path = item.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }

            let Some(priority) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(extension_priority)
            else {
                continue;
            };

            let relative = path.strip_prefix(root).unwrap_or(&path);
            let name_with_ext = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let name = strip_extension(&name_with_ext).to_string();

            candidates.push(Candidate {
                name,
                name_with_ext,
                priority,
                path,
            });
        }
    }

    Ok(candidates)
}

fn load_dir(root: &Path) -> Result<LoadedDir, ConfigError> {
    let mut candidates = collect_candidates(root)?;
    // Directory listing order is unspecified; the winner per name must not depend on it.
    candidates.sort_by(|a, b| a.name.cmp(&b.name).then(a.priority.cmp(&b.priority)));

    let mut loaded = LoadedDir::default();
    for candidate in candidates {
        if loaded.files.contains_key(&candidate.name) {
            loaded
                .shadowed
                .insert(candidate.name_with_ext, candidate.path);
            continue;
        }
        let config = StyledConfig::from_file(&candidate.path)?;
        loaded.files.insert(
            candidate.name,
            FileEntry {
                name_with_ext: candidate.name_with_ext,
                path: candidate.path,
                config,
            },
        );
    }

    Ok(loaded)
}
