use crate::dialog::{DialogOptions, DialogStatus, OpenFileDialog};
use crate::lister::Entry;
use crate::search::match_positions;
use crate::ui_model::{empty_hint, normalize_path_for_display, row_marker};
use eframe::egui;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

pub const DIALOG_SIZE: [f32; 2] = [740.0, 520.0];

pub fn configure_egui_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    if let Some(font_bytes) = load_cjk_font_bytes() {
        let font_name = "cjk_ui".to_string();
        fonts
            .font_data
            .insert(font_name.clone(), egui::FontData::from_owned(font_bytes));
        if let Some(family) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
            family.push(font_name);
        }
    }

    ctx.set_fonts(fonts);
}

fn load_cjk_font_bytes() -> Option<Vec<u8>> {
    let mut candidates: Vec<&str> = Vec::new();

    #[cfg(windows)]
    {
        candidates.extend([
            r"C:\Windows\Fonts\YuGothR.ttc",
            r"C:\Windows\Fonts\meiryo.ttc",
            r"C:\Windows\Fonts\MSYH.TTC",
        ]);
    }

    #[cfg(target_os = "macos")]
    {
        candidates.extend([
            "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
        ]);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        candidates.extend([
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        ]);
    }

    let found = candidates.into_iter().find_map(|path| fs::read(path).ok());
    if found.is_none() {
        tracing::debug!("no CJK fallback font found");
    }
    found
}

fn row_job(entry: &Entry, selected: bool, highlighted: bool, query: &str) -> egui::text::LayoutJob {
    let background = if selected {
        egui::Color32::from_rgb(30, 64, 110)
    } else if highlighted {
        egui::Color32::from_rgb(55, 65, 81)
    } else {
        egui::Color32::TRANSPARENT
    };

    let mut job = egui::text::LayoutJob::default();
    job.append(
        &format!("{} ", row_marker(entry, selected)),
        0.0,
        egui::TextFormat {
            color: if entry.is_dir {
                egui::Color32::from_rgb(52, 211, 153)
            } else {
                egui::Color32::from_rgb(96, 165, 250)
            },
            background,
            ..Default::default()
        },
    );

    let positions = match_positions(&entry.name, query);
    for (idx, ch) in entry.name.chars().enumerate() {
        let color = if positions.contains(&idx) {
            egui::Color32::from_rgb(245, 158, 11)
        } else {
            egui::Color32::from_rgb(229, 231, 235)
        };
        job.append(
            &ch.to_string(),
            0.0,
            egui::TextFormat {
                color,
                background,
                ..Default::default()
            },
        );
    }
    job
}

impl OpenFileDialog {
    /// Draws the dialog window for this frame and returns the resulting
    /// status. Closing the window counts as cancel.
    pub fn show(&mut self, ctx: &egui::Context) -> DialogStatus {
        if self.status() != DialogStatus::Browsing {
            return self.status();
        }
        self.handle_shortcuts(ctx);
        if self.status() != DialogStatus::Browsing {
            return self.status();
        }

        let mut open = true;
        egui::Window::new(self.options.title.clone())
            .id(self.window_id())
            .default_size(DIALOG_SIZE)
            .default_pos(ctx.screen_rect().center())
            .pivot(egui::Align2::CENTER_CENTER)
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| self.draw(ui));

        if !open {
            self.cancel();
        }
        self.status()
    }

    fn window_id(&self) -> egui::Id {
        egui::Id::new(("open-file-dialog", self.instance))
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)) {
            self.cancel();
            return;
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::ALT, egui::Key::ArrowUp)) {
            self.go_back();
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)) {
            self.confirm();
        }
    }

    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button("⬅")
                .on_hover_text("Parent folder (Alt+Up)")
                .clicked()
            {
                self.go_back();
            }
            ui.add(egui::Label::new(normalize_path_for_display(self.dir())).truncate());
        });

        let mut query = self.query().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("🔍 Search...")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.set_query(query);
        }
        ui.separator();

        let footer_height =
            ui.spacing().interact_size.y * 2.0 + ui.spacing().item_spacing.y * 4.0;
        let list_height = (ui.available_height() - footer_height).max(80.0);
        let mut clicked_row: Option<usize> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height(list_height)
            .show(ui, |ui| {
                if self.entries().is_empty() {
                    ui.weak(empty_hint(
                        self.query(),
                        !self.options.extensions.is_empty(),
                    ));
                }
                for (i, entry) in self.entries().iter().enumerate() {
                    let job = row_job(
                        entry,
                        self.selection().contains(entry),
                        self.is_highlighted(entry),
                        self.query(),
                    );
                    let response = ui.add(
                        egui::Label::new(job)
                            .selectable(false)
                            .sense(egui::Sense::click()),
                    );
                    if self.scroll_to_top && i == 0 {
                        response.scroll_to_me(Some(egui::Align::Min));
                    }
                    if response.clicked() {
                        clicked_row = Some(i);
                    }
                }
            });
        self.scroll_to_top = false;
        if let Some(i) = clicked_row {
            self.click(i, Instant::now());
        }

        ui.separator();
        ui.add(egui::Label::new(self.status_line()).truncate());
        ui.horizontal(|ui| {
            if ui.button("✔ Open").clicked() {
                self.confirm();
            }
            if ui.button("Cancel").clicked() {
                self.cancel();
            }
            if ui.button("⟳").on_hover_text("Reload folder").clicked() {
                self.refresh();
            }
        });
    }
}

/// Host window that opens one dialog at start and closes once it resolves.
pub struct DialogHostApp {
    dialog: Option<OpenFileDialog>,
    chosen: Rc<RefCell<Option<Vec<PathBuf>>>>,
}

impl DialogHostApp {
    pub fn new(options: DialogOptions) -> Self {
        let chosen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&chosen);
        let dialog = OpenFileDialog::new(options, move |paths| {
            *sink.borrow_mut() = Some(paths);
        });
        Self {
            dialog: Some(dialog),
            chosen,
        }
    }

    /// Shared slot filled with the confirmed paths; stays `None` on cancel.
    pub fn chosen(&self) -> Rc<RefCell<Option<Vec<PathBuf>>>> {
        Rc::clone(&self.chosen)
    }
}

impl eframe::App for DialogHostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |_ui| {});

        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match dialog.show(ctx) {
            DialogStatus::Browsing => {}
            DialogStatus::Confirmed | DialogStatus::Cancelled => {
                self.dialog = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}
