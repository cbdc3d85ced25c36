//! An open-file dialog for egui applications.
//!
//! The dialog lists one directory at a time (folders first, then files, both
//! in case-insensitive name order), narrows the list with an optional set of
//! accepted extensions and a free-text search, and hands the confirmed file
//! paths to a callback. The last confirmed folder is remembered in a small
//! text file so the next dialog opens there.
//!
//! ```no_run
//! use open_file_dialog::{DialogOptions, OpenFileDialog, OpenMode};
//!
//! let options = DialogOptions::new("Open image")
//!     .extensions([".png", ".jpg"])
//!     .multi_select(true)
//!     .open_mode(OpenMode::DoubleClick);
//! let mut dialog = OpenFileDialog::new(options, |paths| {
//!     for p in paths {
//!         println!("{}", p.display());
//!     }
//! });
//! // Each frame: `dialog.show(ctx)` until it stops returning `Browsing`.
//! # let _ = &mut dialog;
//! ```

pub mod app;
pub mod dialog;
pub mod last_dir;
pub mod lister;
pub mod search;
pub mod selection;
pub mod ui_model;

pub use dialog::{ClickTracker, DialogOptions, DialogStatus, OpenFileDialog, OpenMode};
pub use last_dir::LastDirStore;
pub use lister::{list_dir, try_list_dir, Entry};
pub use search::filter_entries;
pub use selection::{Selection, SelectionMode};
