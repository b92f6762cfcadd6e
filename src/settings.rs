//! Settings infrastructure for quotesel.
//!
//! Loads `quotesel.toml` from the workspace to toggle which LSP features the
//! server advertises and how the select-inside-quotes command applies its
//! result. Every field is optional; missing values take the defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// File name searched for during settings discovery.
pub const SETTINGS_FILE: &str = "quotesel.toml";

/// Root settings structure loaded from `quotesel.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `textDocument/selectionRange` behavior.
    pub selection: SelectionSettings,

    /// `workspace/executeCommand` behavior.
    pub command: CommandSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Advertise the selection range provider (default: true).
    pub range_provider: bool,

    /// Chain the whole document as the parent of each quote range (default: true).
    pub document_parent: bool,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            range_provider: true,
            document_parent: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandSettings {
    /// Ask the client to apply the selection via `window/showDocument` (default: true).
    pub show_document: bool,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            show_document: true,
        }
    }
}

/// Load settings from a `quotesel.toml` file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover `quotesel.toml` by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found file. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let found = start_dir
        .ancestors()
        .find_map(|dir| settings_in(dir).map(|settings| (settings, dir.to_path_buf())));
    if let Some(found) = found {
        return found;
    }

    std::fs::read_dir(start_dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .find_map(|dir| settings_in(&dir).map(|settings| (settings, dir)))
        .unwrap_or_else(|| (Settings::default(), start_dir.to_path_buf()))
}

/// Load the settings file sitting directly in `dir`, if any.
fn settings_in(dir: &Path) -> Option<Settings> {
    let candidate = dir.join(SETTINGS_FILE);
    candidate.is_file().then(|| {
        debug!(path = %candidate.display(), "found settings");
        load_settings(&candidate)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let settings = Settings::default();
        assert!(settings.selection.range_provider);
        assert!(settings.selection.document_parent);
        assert!(settings.command.show_document);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[selection]\ndocument_parent = false\n").unwrap();
        assert!(settings.selection.range_provider);
        assert!(!settings.selection.document_parent);
        assert!(settings.command.show_document);
    }

    #[test]
    fn empty_file_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.selection.range_provider);
        assert!(settings.command.show_document);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "[command]\nshow_document = \"sometimes\"\n").unwrap();

        let settings = load_settings(&path);
        assert!(settings.command.show_document);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join(SETTINGS_FILE));
        assert!(settings.selection.range_provider);
    }

    #[test]
    fn settings_in_ignores_directories_without_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(SETTINGS_FILE)).unwrap();
        assert!(settings_in(dir.path()).is_none());

        let empty = tempfile::tempdir().unwrap();
        assert!(settings_in(empty.path()).is_none());
    }

    #[test]
    fn discover_settings_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[command]\nshow_document = false\n",
        )
        .unwrap();

        let (settings, settings_dir) = discover_settings(dir.path());
        assert_eq!(settings_dir, dir.path());
        assert!(!settings.command.show_document);
    }

    #[test]
    fn discover_settings_in_parent_dir() {
        let parent = tempfile::tempdir().unwrap();
        let child = parent.path().join("subdir");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(
            parent.path().join(SETTINGS_FILE),
            "[selection]\nrange_provider = false\n",
        )
        .unwrap();

        let (settings, settings_dir) = discover_settings(&child);
        assert_eq!(settings_dir, parent.path());
        assert!(!settings.selection.range_provider);
    }

    #[test]
    fn discover_settings_in_child_dir() {
        let parent = tempfile::tempdir().unwrap();
        let child = parent.path().join("config");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(
            child.join(SETTINGS_FILE),
            "[selection]\ndocument_parent = false\n",
        )
        .unwrap();

        let (settings, settings_dir) = discover_settings(parent.path());
        assert_eq!(settings_dir, child);
        assert!(!settings.selection.document_parent);
    }

    #[test]
    fn discover_settings_parent_preferred_over_child() {
        let parent = tempfile::tempdir().unwrap();
        let child = parent.path().join("nested");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(
            parent.path().join(SETTINGS_FILE),
            "[command]\nshow_document = false\n",
        )
        .unwrap();
        std::fs::write(child.join(SETTINGS_FILE), "[command]\nshow_document = true\n").unwrap();

        let (settings, settings_dir) = discover_settings(parent.path());
        assert_eq!(settings_dir, parent.path());
        assert!(!settings.command.show_document);
    }
}
