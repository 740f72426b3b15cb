use std::path::{Path, PathBuf};

use super::history::{reduce, Action, Clock, EditorState, HistoryConfig, SystemClock};
use super::tools::{ToolKind, ToolResult, ToolSession};
use crate::config::EditorConfig;
use crate::error::AppResult;
use crate::geometry::{pointer_cell, Color, Point, DEFAULT_CELL_SCALE};
use crate::storage::{
    export_path, load_picture, picture_from_bitmap, save_png, StorageResult,
    DEFAULT_EXPORT_FILE_NAME, MAX_IMPORT_DIMENSION,
};
use crate::ui::{default_controls, Control, ControlView};

/// Owns the single live [`EditorState`] and everything that reacts to it.
///
/// Every change goes through [`PixelEditor::dispatch`], which replaces the
/// state with the reducer output and then syncs the controls.
#[derive(Debug)]
pub struct PixelEditor<C: Clock = SystemClock> {
    state: EditorState,
    history: HistoryConfig,
    import_max_dimension: u32,
    export_file_name: String,
    cell_scale: u32,
    clock: C,
    tool: ToolSession,
    last_cell: Option<Point>,
    controls: Vec<Box<dyn Control>>,
}

impl PixelEditor<SystemClock> {
    pub fn new(state: EditorState, history: HistoryConfig) -> Self {
        Self::with_clock(state, history, SystemClock)
    }

    pub fn from_config(config: &EditorConfig) -> AppResult<Self> {
        let mut editor = Self::new(config.initial_state()?, config.history());
        editor.import_max_dimension = config.import_max_dimension;
        editor.export_file_name = config.export_file_name.clone();
        editor.cell_scale = config.cell_scale;
        Ok(editor)
    }
}

impl<C: Clock> PixelEditor<C> {
    pub fn with_clock(state: EditorState, history: HistoryConfig, clock: C) -> Self {
        let controls = default_controls(&state);
        Self {
            state,
            history,
            import_max_dimension: MAX_IMPORT_DIMENSION,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            cell_scale: DEFAULT_CELL_SCALE,
            clock,
            tool: ToolSession::new(),
            last_cell: None,
            controls,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool_session(&self) -> &ToolSession {
        &self.tool
    }

    pub fn control_views(&self) -> Vec<ControlView> {
        self.controls.iter().map(|control| control.render()).collect()
    }

    /// Grid cell under a pointer at client coordinates, given the drawing
    /// surface's top-left corner.
    pub fn cell_at(&self, client_x: f64, client_y: f64, origin: (f64, f64)) -> Point {
        pointer_cell(client_x, client_y, origin, self.cell_scale)
    }

    pub fn dispatch(&mut self, action: Action) {
        let now = self.clock.now_millis();
        self.state = reduce(self.state.clone(), action, now, &self.history);
        for control in &mut self.controls {
            control.sync_state(&self.state);
        }
    }

    /// Presses the current tool at `cell`. Returns whether the tool wants
    /// subsequent pointer moves.
    pub fn pointer_down(&mut self, cell: Point) -> ToolResult<bool> {
        self.last_cell = Some(cell);
        if let Some(action) = self.tool.begin(cell, &self.state)? {
            self.dispatch(action);
        }
        Ok(self.tool.is_active())
    }

    /// Forwards a drag to the active tool when it reaches a new cell.
    pub fn pointer_move(&mut self, cell: Point) {
        if !self.tool.is_active() || self.last_cell == Some(cell) {
            return;
        }
        self.last_cell = Some(cell);
        if let Some(action) = self.tool.on_move(cell, &self.state) {
            self.dispatch(action);
        }
    }

    pub fn pointer_up(&mut self) {
        self.tool.end();
        self.last_cell = None;
    }

    pub fn select_tool(&mut self, name: &str) -> ToolResult<ToolKind> {
        let tool = name.parse::<ToolKind>()?;
        self.dispatch(Action::select_tool(tool));
        Ok(tool)
    }

    pub fn set_color(&mut self, color: Color) {
        self.dispatch(Action::set_color(color));
    }

    pub fn undo(&mut self) {
        self.dispatch(Action::Undo);
    }

    /// Replaces the picture with a decoded RGBA bitmap.
    pub fn load_bitmap(&mut self, width: u32, height: u32, rgba: &[u8]) -> StorageResult<()> {
        let picture = picture_from_bitmap(width, height, rgba, self.import_max_dimension)?;
        self.dispatch(Action::draw(picture));
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> StorageResult<()> {
        let picture = load_picture(path, self.import_max_dimension)?;
        self.dispatch(Action::draw(picture));
        Ok(())
    }

    pub fn save_into(&self, dir: &Path) -> StorageResult<PathBuf> {
        let path = export_path(dir, Some(self.export_file_name.as_str()));
        save_png(self.state.picture(), &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::Picture;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct ManualClock(Rc<Cell<u64>>);

    impl ManualClock {
        fn advance(&self, millis: u64) {
            self.0.set(self.0.get() + millis);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> u64 {
            self.0.get()
        }
    }

    fn editor(tool: ToolKind) -> (PixelEditor<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        clock.advance(50_000);
        let state = EditorState::new(
            tool,
            Color::BLACK,
            Picture::empty(5, 5, Color::WHITE).unwrap(),
        );
        let editor = PixelEditor::with_clock(state, HistoryConfig::default(), clock.clone());
        (editor, clock)
    }

    fn undo_disabled(editor: &PixelEditor<ManualClock>) -> bool {
        editor.control_views().into_iter().any(|view| {
            view == ControlView::Button {
                label: "Undo",
                disabled: true,
            }
        })
    }

    #[test]
    fn quick_pen_stroke_is_one_undo_step() {
        let (mut editor, clock) = editor(ToolKind::Draw);

        assert!(editor.pointer_down(Point::new(0, 0)).unwrap());
        clock.advance(100);
        editor.pointer_move(Point::new(1, 0));
        clock.advance(100);
        editor.pointer_move(Point::new(2, 0));
        editor.pointer_up();

        assert_eq!(editor.state().history_len(), 1);
        assert!(!undo_disabled(&editor));

        editor.undo();
        assert!(editor
            .state()
            .picture()
            .pixels()
            .iter()
            .all(|pixel| *pixel == Color::WHITE));
        assert!(undo_disabled(&editor));
    }

    #[test]
    fn slow_strokes_record_separate_steps() {
        let (mut editor, clock) = editor(ToolKind::Draw);

        editor.pointer_down(Point::new(0, 0)).unwrap();
        editor.pointer_up();
        clock.advance(1_500);
        editor.pointer_down(Point::new(1, 1)).unwrap();
        editor.pointer_up();

        assert_eq!(editor.state().history_len(), 2);
    }

    #[test]
    fn repeated_cells_are_not_forwarded() {
        let (mut editor, _clock) = editor(ToolKind::Draw);
        editor.pointer_down(Point::new(0, 0)).unwrap();
        let before = editor.state().picture().clone();

        editor.pointer_move(Point::new(0, 0));
        assert!(editor.state().picture().ptr_eq(&before));
    }

    #[test]
    fn single_shot_tools_stop_tracking() {
        let (mut editor, _clock) = editor(ToolKind::Fill);
        assert!(!editor.pointer_down(Point::new(2, 2)).unwrap());

        let filled = editor.state().picture().clone();
        editor.pointer_move(Point::new(0, 0));
        assert!(editor.state().picture().ptr_eq(&filled));
    }

    #[test]
    fn pick_then_draw_uses_picked_color() {
        let (mut editor, clock) = editor(ToolKind::Draw);
        editor.set_color(Color::new(0x11, 0x22, 0x33));
        editor.pointer_down(Point::new(4, 4)).unwrap();
        editor.pointer_up();

        editor.select_tool("pick").unwrap();
        editor.set_color(Color::BLACK);
        editor.pointer_down(Point::new(4, 4)).unwrap();
        editor.pointer_up();
        assert_eq!(editor.state().color(), Color::new(0x11, 0x22, 0x33));

        clock.advance(2_000);
        editor.select_tool("draw").unwrap();
        editor.pointer_down(Point::new(0, 0)).unwrap();
        assert_eq!(
            editor.state().picture().pixel(0, 0),
            Ok(Color::new(0x11, 0x22, 0x33))
        );
    }

    #[test]
    fn unknown_tool_name_is_rejected() {
        let (mut editor, _clock) = editor(ToolKind::Draw);
        assert!(editor.select_tool("lasso").is_err());
        assert_eq!(editor.state().tool(), ToolKind::Draw);
    }

    #[test]
    fn loaded_bitmap_is_undoable() {
        let (mut editor, _clock) = editor(ToolKind::Draw);
        let rgba = vec![0x40; 150 * 80 * 4];
        editor.load_bitmap(150, 80, &rgba).unwrap();

        assert_eq!(editor.state().picture().width(), 100);
        assert_eq!(editor.state().picture().height(), 80);
        editor.undo();
        assert_eq!(editor.state().picture().width(), 5);
    }

    #[test]
    fn save_then_load_file_round_trips() {
        let (mut editor, clock) = editor(ToolKind::Rectangle);
        editor.pointer_down(Point::new(1, 1)).unwrap();
        editor.pointer_move(Point::new(3, 2));
        editor.pointer_up();
        let drawn = editor.state().picture().clone();

        let dir = std::env::temp_dir().join("pixel8-session-roundtrip");
        let path = editor.save_into(&dir).unwrap();
        assert!(path.ends_with(DEFAULT_EXPORT_FILE_NAME));

        clock.advance(5_000);
        editor.load_file(&path).unwrap();
        assert_eq!(editor.state().picture(), &drawn);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn from_config_uses_configured_canvas() {
        let config = EditorConfig {
            canvas_width: 8,
            canvas_height: 4,
            export_file_name: "custom.png".to_string(),
            ..EditorConfig::default()
        };
        let editor = PixelEditor::from_config(&config).unwrap();
        assert_eq!(editor.state().picture().width(), 8);
        assert_eq!(editor.state().picture().height(), 4);
        assert_eq!(editor.control_views().len(), 5);

        let dir = std::env::temp_dir().join("pixel8-session-custom-name");
        let path = editor.save_into(&dir).unwrap();
        assert!(path.ends_with("custom.png"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn pointer_positions_map_through_cell_scale() {
        let (editor, _clock) = editor(ToolKind::Draw);
        assert_eq!(editor.cell_at(129.0, 40.0, (100.0, 20.0)), Point::new(2, 2));

        let config = EditorConfig {
            cell_scale: 4,
            ..EditorConfig::default()
        };
        let editor = PixelEditor::from_config(&config).unwrap();
        assert_eq!(editor.cell_at(129.0, 40.0, (100.0, 20.0)), Point::new(7, 5));
    }
}
