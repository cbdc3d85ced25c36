use crate::last_dir::{resolve_start_dir, LastDirStore};
use crate::lister::{normalize_extensions, try_list_dir, Entry};
use crate::search::filter_entries;
use crate::selection::{Selection, SelectionMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const DEFAULT_DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// How a click on a row is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenMode {
    /// A click opens a folder; in single-select mode it also confirms a file.
    SingleClick,
    /// A click selects or highlights; a double click opens or confirms.
    DoubleClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStatus {
    Browsing,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct DialogOptions {
    pub title: String,
    pub extensions: Vec<String>,
    pub multi_select: bool,
    pub open_mode: OpenMode,
    pub double_click_interval: Duration,
    pub last_dir_file: Option<PathBuf>,
    pub start_dir: Option<PathBuf>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            title: "Open File".to_string(),
            extensions: Vec::new(),
            multi_select: false,
            open_mode: OpenMode::SingleClick,
            double_click_interval: DEFAULT_DOUBLE_CLICK_INTERVAL,
            last_dir_file: None,
            start_dir: None,
        }
    }
}

impl DialogOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Accepted file extensions, with or without the leading dot.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = normalize_extensions(exts);
        self
    }

    pub fn multi_select(mut self, yes: bool) -> Self {
        self.multi_select = yes;
        self
    }

    pub fn open_mode(mut self, mode: OpenMode) -> Self {
        self.open_mode = mode;
        self
    }

    pub fn double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_interval = interval;
        self
    }

    /// Overrides where the last confirmed directory is stored.
    pub fn last_dir_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.last_dir_file = Some(file.into());
        self
    }

    /// Opens in `dir` instead of the stored last directory.
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    fn selection_mode(&self) -> SelectionMode {
        if self.multi_select {
            SelectionMode::Multi
        } else {
            SelectionMode::Single
        }
    }

    /// Store named by `last_dir_file`, or the per-mode default.
    pub fn store(&self) -> LastDirStore {
        match &self.last_dir_file {
            Some(file) => LastDirStore::new(file),
            None => LastDirStore::for_mode(self.open_mode),
        }
    }
}

/// Detects two clicks on the same entry within `interval`.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    interval: Duration,
    last: Option<(PathBuf, Instant)>,
}

impl ClickTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Records a click and reports whether it completes a double click.
    /// A completed double click does not arm the next one.
    pub fn register(&mut self, path: &Path, now: Instant) -> bool {
        if let Some((last_path, at)) = self.last.take() {
            if last_path == path && now.saturating_duration_since(at) <= self.interval {
                return true;
            }
        }
        self.last = Some((path.to_path_buf(), now));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

pub type SelectCallback = Box<dyn FnMut(Vec<PathBuf>)>;

/// Browsing state of one open-file dialog, independent of the UI toolkit.
///
/// The egui layer feeds user gestures into this type and draws what it
/// exposes; see `OpenFileDialog::show`.
pub struct OpenFileDialog {
    pub(crate) options: DialogOptions,
    store: LastDirStore,
    dir: PathBuf,
    query: String,
    listing: Vec<Entry>,
    visible: Vec<Entry>,
    selection: Selection,
    highlighted: Option<PathBuf>,
    clicks: ClickTracker,
    notice: String,
    status_line: String,
    status: DialogStatus,
    on_select: SelectCallback,
    pub(crate) scroll_to_top: bool,
    /// Distinguishes the egui window of this dialog from any other open one.
    pub(crate) instance: u64,
}

impl OpenFileDialog {
    pub fn new(options: DialogOptions, on_select: impl FnMut(Vec<PathBuf>) + 'static) -> Self {
        let store = options.store();
        let dir = match &options.start_dir {
            Some(dir) => dir.clone(),
            None => resolve_start_dir(store.load()),
        };
        let mut dialog = Self {
            selection: Selection::new(options.selection_mode()),
            clicks: ClickTracker::new(options.double_click_interval),
            options,
            store,
            dir: PathBuf::new(),
            query: String::new(),
            listing: Vec::new(),
            visible: Vec::new(),
            highlighted: None,
            notice: String::new(),
            status_line: String::new(),
            status: DialogStatus::Browsing,
            on_select: Box::new(on_select),
            scroll_to_top: true,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        };
        dialog.navigate_to(dir);
        dialog
    }

    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn entries(&self) -> &[Entry] {
        &self.visible
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_highlighted(&self, entry: &Entry) -> bool {
        self.highlighted.as_deref() == Some(entry.path.as_path())
    }

    pub fn status(&self) -> DialogStatus {
        self.status
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn notice(&self) -> &str {
        &self.notice
    }

    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.selection.selected_paths(&self.dir, &self.visible)
    }

    fn refresh_status_line(&mut self) {
        let filtered = if self.query.is_empty() {
            String::new()
        } else {
            format!(" of {}", self.listing.len())
        };
        let selected = if self.selection.is_empty() {
            String::new()
        } else {
            format!(" | Selected: {}", self.selection.len())
        };
        let notice = if self.notice.is_empty() {
            String::new()
        } else {
            format!(" | {}", self.notice)
        };
        self.status_line = format!(
            "Items: {}{}{}{}",
            self.visible.len(),
            filtered,
            selected,
            notice
        );
    }

    fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = notice.into();
        self.refresh_status_line();
    }

    fn reset_marks(&mut self) {
        self.selection.clear();
        self.highlighted = None;
        self.clicks.reset();
        self.scroll_to_top = true;
    }

    fn apply_filter(&mut self) {
        self.visible = filter_entries(&self.listing, &self.query);
        self.reset_marks();
        self.refresh_status_line();
    }

    /// Lists `dir` and makes it current. Unreadable directories list as
    /// empty and leave a notice. A relative `dir` is resolved against the
    /// working directory so callers always receive absolute paths.
    pub fn navigate_to(&mut self, dir: impl Into<PathBuf>) {
        self.dir = absolute_dir(dir.into());
        self.notice.clear();
        self.listing = match try_list_dir(&self.dir, &self.options.extensions) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("{err:#}");
                self.notice = format!("Cannot read folder: {}", root_cause(&err));
                Vec::new()
            }
        };
        tracing::debug!(dir = %self.dir.display(), entries = self.listing.len(), "listed");
        self.apply_filter();
    }

    pub fn refresh(&mut self) {
        let dir = self.dir.clone();
        self.navigate_to(dir);
    }

    /// Moves to the parent directory. Returns false at a filesystem root.
    pub fn go_back(&mut self) -> bool {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return false;
        };
        if parent.as_os_str().is_empty() || parent == self.dir {
            return false;
        }
        self.navigate_to(parent);
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.apply_filter();
    }

    /// Handles a click on the visible row at `position`.
    pub fn click(&mut self, position: usize, now: Instant) {
        if self.status != DialogStatus::Browsing {
            return;
        }
        let Some(entry) = self.visible.get(position).cloned() else {
            return;
        };

        match self.options.open_mode {
            OpenMode::SingleClick => {
                if entry.is_dir {
                    self.navigate_to(entry.path);
                } else if self.selection.mode() == SelectionMode::Single {
                    self.selection.set_only(&entry);
                    self.confirm();
                } else {
                    self.selection.toggle(&entry);
                    self.highlighted = Some(entry.path);
                    self.refresh_status_line();
                }
            }
            OpenMode::DoubleClick => {
                if self.clicks.register(&entry.path, now) {
                    self.open_entry(position);
                    return;
                }
                self.selection.select(&entry);
                self.highlighted = Some(entry.path);
                self.refresh_status_line();
            }
        }
    }

    /// Opens a folder or confirms with a file, as a double click does.
    pub fn open_entry(&mut self, position: usize) {
        let Some(entry) = self.visible.get(position).cloned() else {
            return;
        };
        if entry.is_dir {
            self.navigate_to(entry.path);
            return;
        }
        self.selection.insert(&entry);
        self.confirm();
    }

    /// Persists the current directory and hands the selected files to the
    /// callback. Does nothing while no file is selected.
    pub fn confirm(&mut self) -> bool {
        if self.status != DialogStatus::Browsing {
            return false;
        }
        let paths = self.selected_paths();
        if paths.is_empty() {
            self.set_notice("Select at least one file");
            return false;
        }

        if let Err(err) = self.store.save(&self.dir) {
            tracing::warn!("{err:#}");
        }
        tracing::info!(count = paths.len(), dir = %self.dir.display(), "selection confirmed");
        self.status = DialogStatus::Confirmed;
        (self.on_select)(paths);
        true
    }

    pub fn cancel(&mut self) {
        if self.status == DialogStatus::Browsing {
            tracing::debug!("dialog cancelled");
            self.status = DialogStatus::Cancelled;
        }
    }
}

/// Absolute paths are kept as given so a folder entered through a symlink
/// keeps the link in its path. Relative ones are joined onto the working
/// directory and canonicalized when they exist.
fn absolute_dir(dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    let joined = match std::env::current_dir() {
        Ok(cwd) => cwd.join(&dir),
        Err(err) => {
            tracing::warn!(dir = %dir.display(), %err, "cannot resolve relative directory");
            return dir;
        }
    };
    joined.canonicalize().unwrap_or(joined)
}

fn root_cause(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn test_root(name: &str) -> PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("ofd-dialog-{name}-{nonce}"))
    }

    fn sample_tree(name: &str) -> PathBuf {
        let root = test_root(name);
        fs::create_dir_all(root.join("Docs")).expect("create docs");
        fs::write(root.join("Docs").join("inner.txt"), "i").expect("write inner");
        fs::write(root.join("a.txt"), "a").expect("write a");
        fs::write(root.join("b.txt"), "b").expect("write b");
        fs::write(root.join("c.png"), "c").expect("write c");
        root
    }

    type Calls = Rc<RefCell<Vec<Vec<PathBuf>>>>;

    fn open(root: &Path, options: DialogOptions) -> (OpenFileDialog, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let options = options
            .start_dir(root)
            .last_dir_file(root.join("last-dir.txt"));
        let dialog = OpenFileDialog::new(options, move |paths| sink.borrow_mut().push(paths));
        (dialog, calls)
    }

    fn position(dialog: &OpenFileDialog, name: &str) -> usize {
        dialog
            .entries()
            .iter()
            .position(|e| e.name == name)
            .expect("entry is visible")
    }

    #[test]
    fn single_click_on_folder_navigates_and_clears_selection() {
        let root = sample_tree("nav");
        let (mut dialog, _) = open(&root, DialogOptions::new("t").multi_select(true));
        dialog.click(position(&dialog, "a.txt"), Instant::now());
        assert_eq!(dialog.selection().len(), 1);

        dialog.click(position(&dialog, "Docs"), Instant::now());
        assert_eq!(dialog.dir(), root.join("Docs"));
        assert!(dialog.selection().is_empty());
        assert_eq!(dialog.entries().len(), 1);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn single_click_single_select_confirms_file_immediately() {
        let root = sample_tree("single-confirm");
        let (mut dialog, calls) = open(&root, DialogOptions::new("t"));
        dialog.click(position(&dialog, "b.txt"), Instant::now());

        assert_eq!(dialog.status(), DialogStatus::Confirmed);
        assert_eq!(*calls.borrow(), vec![vec![root.join("b.txt")]]);
        let stored = LastDirStore::new(root.join("last-dir.txt")).load();
        assert_eq!(stored, Some(root.clone()));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn multi_select_toggle_twice_excludes_file() {
        let root = sample_tree("multi-toggle");
        let (mut dialog, calls) = open(&root, DialogOptions::new("t").multi_select(true));
        let a = position(&dialog, "a.txt");
        let b = position(&dialog, "b.txt");
        dialog.click(a, Instant::now());
        dialog.click(b, Instant::now());
        dialog.click(a, Instant::now());

        assert!(dialog.confirm());
        assert_eq!(*calls.borrow(), vec![vec![root.join("b.txt")]]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn double_click_mode_single_select_replaces_selection() {
        let root = sample_tree("dbl-single");
        let options = DialogOptions::new("t").open_mode(OpenMode::DoubleClick);
        let (mut dialog, calls) = open(&root, options);
        let start = Instant::now();
        dialog.click(position(&dialog, "a.txt"), start);
        dialog.click(position(&dialog, "b.txt"), start + Duration::from_millis(50));
        assert_eq!(dialog.status(), DialogStatus::Browsing);
        assert_eq!(dialog.selected_paths(), vec![root.join("b.txt")]);

        assert!(dialog.confirm());
        assert_eq!(*calls.borrow(), vec![vec![root.join("b.txt")]]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn double_click_opens_folder_and_confirms_file() {
        let root = sample_tree("dbl-open");
        let options = DialogOptions::new("t")
            .open_mode(OpenMode::DoubleClick)
            .multi_select(true);
        let (mut dialog, calls) = open(&root, options);
        let start = Instant::now();

        let docs = position(&dialog, "Docs");
        dialog.click(docs, start);
        assert_eq!(dialog.dir(), root.as_path());
        assert!(dialog.selection().is_empty());
        dialog.click(docs, start + Duration::from_millis(200));
        assert_eq!(dialog.dir(), root.join("Docs"));

        let inner = position(&dialog, "inner.txt");
        dialog.click(inner, start + Duration::from_millis(1000));
        dialog.click(inner, start + Duration::from_millis(1100));
        assert_eq!(dialog.status(), DialogStatus::Confirmed);
        assert_eq!(*calls.borrow(), vec![vec![root.join("Docs").join("inner.txt")]]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn slow_second_click_is_not_a_double_click() {
        let root = sample_tree("dbl-slow");
        let options = DialogOptions::new("t").open_mode(OpenMode::DoubleClick);
        let (mut dialog, calls) = open(&root, options);
        let docs = position(&dialog, "Docs");
        let start = Instant::now();
        dialog.click(docs, start);
        dialog.click(docs, start + Duration::from_millis(401));
        assert_eq!(dialog.dir(), root.as_path());
        assert!(calls.borrow().is_empty());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn query_change_filters_and_clears_selection() {
        let root = sample_tree("query");
        let (mut dialog, _) = open(&root, DialogOptions::new("t").multi_select(true));
        dialog.click(position(&dialog, "a.txt"), Instant::now());
        dialog.set_query("B.T");

        assert!(dialog.selection().is_empty());
        let names: Vec<&str> = dialog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt"]);

        dialog.set_query("");
        assert_eq!(dialog.entries().len(), 4);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn query_survives_navigation() {
        let root = sample_tree("query-nav");
        let (mut dialog, _) = open(&root, DialogOptions::new("t").multi_select(true));
        dialog.set_query("inner");
        assert!(dialog.entries().is_empty());
        dialog.navigate_to(root.join("Docs"));
        assert_eq!(dialog.entries().len(), 1);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn extension_filter_applies_to_listing() {
        let root = sample_tree("exts");
        let (dialog, _) = open(&root, DialogOptions::new("t").extensions(["PNG"]));
        let names: Vec<&str> = dialog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Docs", "c.png"]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn confirm_without_files_is_a_noop_with_notice() {
        let root = sample_tree("empty-confirm");
        let options = DialogOptions::new("t").open_mode(OpenMode::DoubleClick);
        let (mut dialog, calls) = open(&root, options);
        dialog.click(position(&dialog, "Docs"), Instant::now());

        assert!(!dialog.confirm());
        assert_eq!(dialog.status(), DialogStatus::Browsing);
        assert!(calls.borrow().is_empty());
        assert!(dialog.status_line().contains("Select at least one file"));
        assert!(LastDirStore::new(root.join("last-dir.txt")).load().is_none());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn cancel_never_invokes_callback() {
        let root = sample_tree("cancel");
        let (mut dialog, calls) = open(&root, DialogOptions::new("t").multi_select(true));
        dialog.click(position(&dialog, "a.txt"), Instant::now());
        dialog.cancel();

        assert_eq!(dialog.status(), DialogStatus::Cancelled);
        assert!(!dialog.confirm());
        assert!(calls.borrow().is_empty());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn go_back_moves_to_parent_and_clears_selection() {
        let root = sample_tree("back");
        let (mut dialog, _) = open(&root, DialogOptions::new("t").multi_select(true));
        dialog.navigate_to(root.join("Docs"));
        dialog.click(position(&dialog, "inner.txt"), Instant::now());

        assert!(dialog.go_back());
        assert_eq!(dialog.dir(), root.as_path());
        assert!(dialog.selection().is_empty());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    #[cfg(unix)]
    fn go_back_stops_at_filesystem_root() {
        let root = sample_tree("back-root");
        let (mut dialog, _) = open(&root, DialogOptions::new("t"));
        dialog.navigate_to("/");
        assert!(!dialog.go_back());
        assert_eq!(dialog.dir(), Path::new("/"));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn unreadable_directory_lists_empty_with_notice() {
        let root = sample_tree("unreadable");
        let (mut dialog, _) = open(&root, DialogOptions::new("t"));
        dialog.navigate_to(root.join("missing"));

        assert!(dialog.entries().is_empty());
        assert!(dialog.notice().starts_with("Cannot read folder"));
        dialog.navigate_to(&root);
        assert!(dialog.notice().is_empty());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn stored_directory_is_used_when_no_start_dir_given() {
        let root = sample_tree("stored");
        let file = root.join("stored.txt");
        LastDirStore::new(&file)
            .save(&root.join("Docs"))
            .expect("save");

        let dialog = OpenFileDialog::new(DialogOptions::new("t").last_dir_file(&file), |_| {});
        assert_eq!(dialog.dir(), root.join("Docs"));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn relative_start_dir_yields_absolute_paths() {
        let root = test_root("relative-dot");
        fs::create_dir_all(&root).expect("create root");
        let cwd = std::env::current_dir()
            .expect("cwd")
            .canonicalize()
            .expect("canonical cwd");

        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let options = DialogOptions::new("t")
            .start_dir(".")
            .last_dir_file(root.join("last-dir.txt"));
        let mut dialog = OpenFileDialog::new(options, move |paths| sink.borrow_mut().push(paths));
        assert_eq!(dialog.dir(), cwd.as_path());

        let file = dialog
            .entries()
            .iter()
            .position(|e| !e.is_dir)
            .expect("a file in the working directory");
        dialog.click(file, Instant::now());
        let confirmed = calls.borrow()[0][0].clone();
        assert!(confirmed.is_absolute());
        assert!(confirmed.exists());
        assert_eq!(
            LastDirStore::new(root.join("last-dir.txt")).load(),
            Some(cwd)
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    #[cfg(unix)]
    fn relative_start_dir_with_parent_components_can_go_back() {
        let root = sample_tree("relative-up");
        let root = root.canonicalize().expect("canonical root");
        let cwd = std::env::current_dir()
            .expect("cwd")
            .canonicalize()
            .expect("canonical cwd");
        let up: PathBuf = cwd.components().skip(1).map(|_| "..").collect();
        let relative = up.join(root.strip_prefix("/").expect("absolute root"));
        assert!(relative.is_relative());

        let options = DialogOptions::new("t")
            .start_dir(&relative)
            .last_dir_file(root.join("last-dir.txt"));
        let mut dialog = OpenFileDialog::new(options, |_| {});
        assert_eq!(dialog.dir(), root.as_path());
        assert_eq!(dialog.entries().len(), 4);

        assert!(dialog.go_back());
        assert_eq!(Some(dialog.dir()), root.parent());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    #[cfg(unix)]
    fn symlinked_folder_is_entered_through_the_link() {
        let root = sample_tree("symlink-dir");
        std::os::unix::fs::symlink(root.join("Docs"), root.join("Linked")).expect("symlink");
        let (mut dialog, _) = open(&root, DialogOptions::new("t"));

        let linked = position(&dialog, "Linked");
        assert!(dialog.entries()[linked].is_dir);
        dialog.click(linked, Instant::now());
        assert_eq!(dialog.dir(), root.join("Linked"));
        let names: Vec<&str> = dialog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["inner.txt"]);

        assert!(dialog.go_back());
        assert_eq!(dialog.dir(), root.as_path());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    #[cfg(unix)]
    fn non_utf8_file_name_is_confirmed_as_an_existing_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = test_root("non-utf8");
        fs::create_dir_all(&root).expect("create root");
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(root.join(raw), "x").expect("write non-utf8 file");

        let (mut dialog, calls) = open(&root, DialogOptions::new("t"));
        assert_eq!(dialog.entries().len(), 1);
        dialog.click(0, Instant::now());

        let confirmed = calls.borrow()[0].clone();
        assert_eq!(confirmed, vec![root.join(raw)]);
        assert!(confirmed[0].exists());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn each_dialog_gets_its_own_instance_number() {
        let root = sample_tree("instances");
        let (first, _) = open(&root, DialogOptions::new("Same title"));
        let (second, _) = open(&root, DialogOptions::new("Same title"));
        assert_ne!(first.instance, second.instance);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn click_tracker_requires_same_entry() {
        let mut clicks = ClickTracker::new(DEFAULT_DOUBLE_CLICK_INTERVAL);
        let start = Instant::now();
        assert!(!clicks.register(Path::new("/a"), start));
        assert!(!clicks.register(Path::new("/b"), start + Duration::from_millis(10)));
        assert!(clicks.register(Path::new("/b"), start + Duration::from_millis(20)));
        assert!(!clicks.register(Path::new("/b"), start + Duration::from_millis(30)));
    }

    #[test]
    fn refresh_picks_up_new_files() {
        let root = sample_tree("refresh");
        let (mut dialog, _) = open(&root, DialogOptions::new("t"));
        fs::write(root.join("d.txt"), "d").expect("write d");
        assert_eq!(dialog.entries().len(), 4);
        dialog.refresh();
        assert_eq!(dialog.entries().len(), 5);
        let _ = fs::remove_dir_all(&root);
    }
}
