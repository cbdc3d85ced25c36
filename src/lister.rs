use anyhow::{Context, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    pub fn new(dir: &Path, name: impl Into<String>, is_dir: bool) -> Self {
        let name = name.into();
        Self {
            path: dir.join(&name),
            name,
            is_dir,
        }
    }

    /// Suffix from the last `.` of the name, dot included. Empty when the name
    /// has no dot.
    pub fn extension(&self) -> &str {
        extension_of(&self.name)
    }
}

pub fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|idx| &name[idx..]).unwrap_or("")
}

/// Lowercases extensions and adds the leading dot when it is missing.
pub fn normalize_extensions<I, S>(exts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for raw in exts {
        let ext = raw.as_ref().trim().to_lowercase();
        let ext = if ext.is_empty() || ext.starts_with('.') {
            ext
        } else {
            format!(".{ext}")
        };
        if !out.contains(&ext) {
            out.push(ext);
        }
    }
    out
}

fn accepts(entry: &Entry, exts: &[String]) -> bool {
    if entry.is_dir || exts.is_empty() {
        return true;
    }
    let ext = entry.extension();
    exts.iter().any(|accepted| eq_fold(accepted, ext))
}

/// Case-insensitive comparison with simple case folding: each char goes
/// through its upper then lower case form, so `ς`, `σ` and `Σ` compare
/// equal. Chars whose case forms are not a single char compare as is.
fn eq_fold(a: &str, b: &str) -> bool {
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    let (Some(u), None) = (upper.next(), upper.next()) else {
        return c;
    };
    let mut lower = u.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

pub fn sort_entries(entries: &mut [Entry]) {
    // `sort_by` is stable, so equal keys keep enumeration order.
    entries.sort_by(compare_entries);
}

/// Lists the immediate children of `dir`, dropping files whose extension is
/// not in `exts` (normalized, see [`normalize_extensions`]). Directories are
/// never dropped by extension.
pub fn try_list_dir(dir: &Path, exts: &[String]) -> Result<Vec<Entry>> {
    let read = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut out = Vec::new();
    for item in read {
        let Ok(item) = item else {
            continue;
        };
        let path = item.path();
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "skipping entry without metadata");
                continue;
            }
        };
        let entry = Entry {
            name: item.file_name().to_string_lossy().to_string(),
            path,
            is_dir: metadata.is_dir(),
        };
        if accepts(&entry, exts) {
            out.push(entry);
        }
    }

    sort_entries(&mut out);
    Ok(out)
}

/// Fail-soft variant of [`try_list_dir`]: an unreadable directory lists as empty.
pub fn list_dir(dir: &Path, exts: &[String]) -> Vec<Entry> {
    match try_list_dir(dir, exts) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("{err:#}");
            Vec::new()
        }
    }
}
