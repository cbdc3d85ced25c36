use crate::lister::Entry;
use std::path::{Path, PathBuf};

pub const FOLDER_MARKER: &str = "📁";
pub const FILE_MARKER: &str = "📄";
pub const SELECTED_MARKER: &str = "✔";

fn normalize_windows_display(text: &str) -> String {
    #[cfg(windows)]
    {
        if let Some(rest) = text.strip_prefix(r"\\?\UNC\") {
            return format!(r"\\{}", rest);
        }
        if let Some(rest) = text.strip_prefix(r"\\?\") {
            return rest.to_string();
        }
    }
    text.to_string()
}

/// Path text for labels and stdout, without Windows verbatim prefixes.
pub fn normalize_path_for_display(path: &Path) -> String {
    normalize_windows_display(&path.to_string_lossy())
}

pub fn row_marker(entry: &Entry, selected: bool) -> &'static str {
    if selected {
        SELECTED_MARKER
    } else if entry.is_dir {
        FOLDER_MARKER
    } else {
        FILE_MARKER
    }
}

pub fn row_label(entry: &Entry, selected: bool) -> String {
    format!("{} {}", row_marker(entry, selected), entry.name)
}

/// Newline-separated paths as printed by the host binary.
pub fn paths_text(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| normalize_path_for_display(p))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn empty_hint(query: &str, has_extension_filter: bool) -> String {
    if !query.is_empty() {
        return format!("No items match \"{query}\"");
    }
    if has_extension_filter {
        return "No matching files in this folder".to_string();
    }
    "This folder is empty".to_string()
}
