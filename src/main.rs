use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use eframe::egui;
use open_file_dialog::app::{configure_egui_fonts, DialogHostApp, DIALOG_SIZE};
use open_file_dialog::dialog::{DialogOptions, OpenMode};
use open_file_dialog::last_dir::resolve_start_dir;
use open_file_dialog::lister::try_list_dir;
use open_file_dialog::search::filter_entries;
use open_file_dialog::ui_model::paths_text;

#[derive(Parser, Debug)]
#[command(name = "openfiledialog")]
#[command(about = "Open-file dialog that prints the chosen paths")]
struct Args {
    #[arg(long, default_value = "Open File")]
    title: String,
    /// Accepted extension, e.g. `.png`; repeat for more
    #[arg(long = "ext")]
    exts: Vec<String>,
    #[arg(long, default_value_t = false)]
    multi: bool,
    /// Open folders and files with a double click instead of a single click
    #[arg(long, default_value_t = false)]
    double_click: bool,
    #[arg(long)]
    dir: Option<PathBuf>,
    #[arg(long)]
    last_dir_file: Option<PathBuf>,
    /// List the directory on stdout instead of opening a window
    #[arg(long, default_value_t = false)]
    cli: bool,
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn dialog_options(args: &Args) -> DialogOptions {
    let open_mode = if args.double_click {
        OpenMode::DoubleClick
    } else {
        OpenMode::SingleClick
    };
    let mut options = DialogOptions::new(args.title.clone())
        .extensions(&args.exts)
        .multi_select(args.multi)
        .open_mode(open_mode);
    if let Some(file) = &args.last_dir_file {
        options = options.last_dir_file(file);
    }
    if let Some(dir) = &args.dir {
        options = options.start_dir(dir);
    }
    options
}

fn run_cli(args: &Args) -> Result<ExitCode> {
    let options = dialog_options(args);
    let dir = match &options.start_dir {
        Some(dir) => dir.clone(),
        None => resolve_start_dir(options.store().load()),
    };
    let entries = try_list_dir(&dir, &options.extensions)?;
    let entries = filter_entries(&entries, &args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::SUCCESS);
    }
    for entry in &entries {
        let kind = if entry.is_dir { "DIR " } else { "FILE" };
        println!("{kind} {}", entry.name);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_gui(args: &Args) -> Result<ExitCode> {
    let app = DialogHostApp::new(dialog_options(args));
    let chosen = app.chosen();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title(&args.title)
        .with_inner_size(egui::vec2(DIALOG_SIZE[0] + 20.0, DIALOG_SIZE[1] + 40.0));

    eframe::run_native(
        "openfiledialog",
        native_options,
        Box::new(move |cc| {
            configure_egui_fonts(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let result = chosen.borrow_mut().take();
    match result {
        Some(paths) => {
            println!("{}", paths_text(&paths));
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(1)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();
    if args.cli {
        run_cli(&args)
    } else {
        run_gui(&args)
    }
}
