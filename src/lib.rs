pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod picture;
pub mod storage;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by UI shells: logging, configuration, then a fresh editor.
pub fn start() -> AppResult<editor::PixelEditor> {
    logging::init();
    let config = config::load_editor_config();
    tracing::info!(
        width = config.canvas_width,
        height = config.canvas_height,
        "starting pixel editor"
    );

    let editor = editor::PixelEditor::from_config(&config)?;
    tracing::info!(tool = %editor.state().tool(), "editor ready");
    Ok(editor)
}
