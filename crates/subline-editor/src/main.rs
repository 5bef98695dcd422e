//! Subline Editor - subtitle timing GUI
//!
//! ## Usage
//!
//! ```text
//! subline-editor [DOCUMENT.yaml] [--config PATH]
//! ```
//!
//! Without a document the built-in demo is opened. The timeline config is read
//! from `<config dir>/subline/timeline.yaml` unless `--config` is given.

use std::path::PathBuf;

use subline_core::config::default_config_path;
use subline_editor::ui::{AppOptions, Message, SublineApp};

fn parse_args(mut args: impl Iterator<Item = String>) -> AppOptions {
    let mut options = AppOptions {
        document: None,
        config_path: default_config_path(),
    };
    while let Some(arg) = args.next() {
        if arg == "--config" {
            match args.next() {
                Some(path) => options.config_path = PathBuf::from(path),
                None => log::warn!("--config needs a path, using {:?}", options.config_path),
            }
        } else if options.document.is_none() {
            options.document = Some(PathBuf::from(arg));
        } else {
            log::warn!("Ignoring extra argument: {}", arg);
        }
    }
    options
}

fn main() -> iced::Result {
    // Set RUST_LOG=debug for gesture traces
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = parse_args(std::env::args().skip(1));
    log::info!(
        "subline-editor starting (document: {:?}, config: {:?})",
        options.document,
        options.config_path
    );

    iced::application(move || SublineApp::new(options.clone()), update, view)
        .title("subline - Subtitle Timeline")
        .subscription(SublineApp::subscription)
        .theme(SublineApp::theme)
        .window_size(iced::Size::new(1200.0, 600.0))
        .run()
}

fn update(app: &mut SublineApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

fn view(app: &SublineApp) -> iced::Element<'_, Message> {
    app.view()
}
