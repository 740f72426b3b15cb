//! Toolbar controls as headless view models.
//!
//! A shell renders each [`ControlView`] with its own widgets and forwards user
//! input to [`crate::editor::PixelEditor`]; the editor syncs every control
//! from the new state after each dispatched action.

use std::fmt;

use crate::editor::{EditorState, ToolKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlView {
    Select {
        label: &'static str,
        options: Vec<&'static str>,
        selected: &'static str,
    },
    ColorInput {
        label: &'static str,
        value: String,
    },
    Button {
        label: &'static str,
        disabled: bool,
    },
}

pub trait Control: fmt::Debug {
    fn render(&self) -> ControlView;
    fn sync_state(&mut self, state: &EditorState);
}

#[derive(Debug, Clone)]
pub struct ToolSelect {
    selected: ToolKind,
}

impl ToolSelect {
    pub fn new(state: &EditorState) -> Self {
        Self {
            selected: state.tool(),
        }
    }
}

impl Control for ToolSelect {
    fn render(&self) -> ControlView {
        ControlView::Select {
            label: "Tool",
            options: ToolKind::ALL.iter().map(|tool| tool.name()).collect(),
            selected: self.selected.name(),
        }
    }

    fn sync_state(&mut self, state: &EditorState) {
        self.selected = state.tool();
    }
}

#[derive(Debug, Clone)]
pub struct ColorSelect {
    value: String,
}

impl ColorSelect {
    pub fn new(state: &EditorState) -> Self {
        Self {
            value: state.color().to_hex(),
        }
    }
}

impl Control for ColorSelect {
    fn render(&self) -> ControlView {
        ControlView::ColorInput {
            label: "Color",
            value: self.value.clone(),
        }
    }

    fn sync_state(&mut self, state: &EditorState) {
        self.value = state.color().to_hex();
    }
}

/// Export is performed by [`crate::editor::PixelEditor::save_into`]; the button
/// only exposes the trigger.
#[derive(Debug, Clone, Default)]
pub struct SaveButton;

impl Control for SaveButton {
    fn render(&self) -> ControlView {
        ControlView::Button {
            label: "Save",
            disabled: false,
        }
    }

    fn sync_state(&mut self, _state: &EditorState) {}
}

#[derive(Debug, Clone, Default)]
pub struct LoadButton;

impl Control for LoadButton {
    fn render(&self) -> ControlView {
        ControlView::Button {
            label: "Load",
            disabled: false,
        }
    }

    fn sync_state(&mut self, _state: &EditorState) {}
}

#[derive(Debug, Clone)]
pub struct UndoButton {
    disabled: bool,
}

impl UndoButton {
    pub fn new(state: &EditorState) -> Self {
        Self {
            disabled: !state.can_undo(),
        }
    }
}

impl Control for UndoButton {
    fn render(&self) -> ControlView {
        ControlView::Button {
            label: "Undo",
            disabled: self.disabled,
        }
    }

    fn sync_state(&mut self, state: &EditorState) {
        self.disabled = !state.can_undo();
    }
}

pub fn default_controls(state: &EditorState) -> Vec<Box<dyn Control>> {
    vec![
        Box::new(ToolSelect::new(state)),
        Box::new(ColorSelect::new(state)),
        Box::new(SaveButton),
        Box::new(LoadButton),
        Box::new(UndoButton::new(state)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{reduce, Action, HistoryConfig};
    use crate::geometry::Color;
    use crate::picture::{Edit, Picture};

    fn state() -> EditorState {
        EditorState::new(
            ToolKind::Draw,
            Color::BLACK,
            Picture::empty(3, 3, Color::WHITE).unwrap(),
        )
    }

    #[test]
    fn default_controls_render_in_toolbar_order() {
        let controls = default_controls(&state());
        let labels: Vec<&str> = controls
            .iter()
            .map(|control| match control.render() {
                ControlView::Select { label, .. }
                | ControlView::ColorInput { label, .. }
                | ControlView::Button { label, .. } => label,
            })
            .collect();
        assert_eq!(labels, vec!["Tool", "Color", "Save", "Load", "Undo"]);
    }

    #[test]
    fn tool_select_lists_every_tool() {
        let select = ToolSelect::new(&state());
        assert_eq!(
            select.render(),
            ControlView::Select {
                label: "Tool",
                options: vec!["draw", "fill", "rectangle", "pick"],
                selected: "draw",
            }
        );
    }

    #[test]
    fn controls_follow_synced_state() {
        let initial = state();
        let mut tool = ToolSelect::new(&initial);
        let mut color = ColorSelect::new(&initial);
        let mut undo = UndoButton::new(&initial);
        assert_eq!(
            undo.render(),
            ControlView::Button {
                label: "Undo",
                disabled: true
            }
        );

        let config = HistoryConfig::default();
        let picture = initial.picture().draw(&[Edit::new(0, 0, Color::BLACK)]);
        let next = reduce(initial, Action::draw(picture), 5_000, &config);
        let next = reduce(next, Action::set_color(Color::new(0xab, 0, 0x0c)), 5_000, &config);
        let next = reduce(next, Action::select_tool(ToolKind::Pick), 5_000, &config);
        for control in [
            &mut tool as &mut dyn Control,
            &mut color as &mut dyn Control,
            &mut undo as &mut dyn Control,
        ] {
            control.sync_state(&next);
        }

        assert!(matches!(tool.render(), ControlView::Select { selected: "pick", .. }));
        assert_eq!(
            color.render(),
            ControlView::ColorInput {
                label: "Color",
                value: "#ab000c".to_string()
            }
        );
        assert_eq!(
            undo.render(),
            ControlView::Button {
                label: "Undo",
                disabled: false
            }
        );
    }
}
