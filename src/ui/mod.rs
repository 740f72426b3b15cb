pub mod controls;

pub use controls::{
    default_controls, ColorSelect, Control, ControlView, LoadButton, SaveButton, ToolSelect,
    UndoButton,
};
