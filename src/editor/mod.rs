//! Editor core: tools, undo history and the session that ties them together.

pub mod history;
pub mod session;
pub mod tools;

pub use history::{
    reduce, Action, Clock, EditorState, HistoryConfig, StatePatch, SystemClock,
    DEFAULT_COALESCE_WINDOW_MS,
};
pub use session::PixelEditor;
pub use tools::{ToolError, ToolKind, ToolResult, ToolSession};
