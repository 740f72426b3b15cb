mod fill;
mod pen;
mod pick;
mod rectangle;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::geometry::{Bounds, Color, Point};
pub use fill::flood_fill_edits;
pub use pen::pen_edit;
pub use pick::pick_color;
pub use rectangle::{rectangle_edits, CellRect};

use super::history::{Action, EditorState};
use crate::picture::{Picture, PictureError};

pub type ToolResult<T> = std::result::Result<T, ToolError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error(transparent)]
    Picture(#[from] PictureError),
    #[error("unknown tool {0:?}")]
    UnknownTool(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Draw,
    Fill,
    Rectangle,
    Pick,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [Self::Draw, Self::Fill, Self::Rectangle, Self::Pick];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Fill => "fill",
            Self::Rectangle => "rectangle",
            Self::Pick => "pick",
        }
    }

    /// Whether the tool keeps receiving pointer moves after the initial press.
    pub const fn tracks_drag(self) -> bool {
        matches!(self, Self::Draw | Self::Rectangle)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == value)
            .ok_or_else(|| ToolError::UnknownTool(value.to_string()))
    }
}

/// A drag in progress. The color is captured at press time; the rectangle
/// also keeps the picture it started from so every step redraws over it.
#[derive(Debug, Clone)]
pub enum ActiveStroke {
    Pen {
        color: Color,
    },
    Rectangle {
        start: Point,
        color: Color,
        base: Picture,
    },
}

#[derive(Debug, Clone, Default)]
pub enum ToolPhase {
    #[default]
    Idle,
    Active(ActiveStroke),
}

/// Per-interaction tool state machine: `Idle -> Active -> Idle`.
///
/// Each step returns the action the tool wants dispatched; the caller feeds
/// it through the reducer and passes the resulting state to the next step.
#[derive(Debug, Clone, Default)]
pub struct ToolSession {
    phase: ToolPhase,
}

impl ToolSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ToolPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, ToolPhase::Active(_))
    }

    /// Starts the tool selected in `state` at `position`.
    ///
    /// Pen and rectangle stay active until [`ToolSession::end`]; fill and pick
    /// are single-shot and leave the session idle.
    pub fn begin(&mut self, position: Point, state: &EditorState) -> ToolResult<Option<Action>> {
        self.phase = ToolPhase::Idle;
        let color = state.color();
        let picture = state.picture();
        tracing::debug!(tool = %state.tool(), x = position.x, y = position.y, "tool pressed");

        let (phase, action) = match state.tool() {
            ToolKind::Draw => (
                ToolPhase::Active(ActiveStroke::Pen { color }),
                pen_edit(picture, position, color).map(|edit| Action::draw(picture.draw(&[edit]))),
            ),
            ToolKind::Rectangle => {
                let edits = rectangle_edits(position, position, color, picture.bounds());
                (
                    ToolPhase::Active(ActiveStroke::Rectangle {
                        start: position,
                        color,
                        base: picture.clone(),
                    }),
                    (!edits.is_empty()).then(|| Action::draw(picture.draw(&edits))),
                )
            }
            ToolKind::Fill => {
                let edits = flood_fill_edits(picture, position, color)?;
                (ToolPhase::Idle, Some(Action::draw(picture.draw(&edits))))
            }
            ToolKind::Pick => {
                let picked = pick_color(picture, position)?;
                (ToolPhase::Idle, Some(Action::set_color(picked)))
            }
        };

        self.phase = phase;
        Ok(action)
    }

    /// Continues an active drag at a new cell. Idle sessions ignore moves.
    pub fn on_move(&mut self, position: Point, state: &EditorState) -> Option<Action> {
        match &self.phase {
            ToolPhase::Idle => None,
            ToolPhase::Active(ActiveStroke::Pen { color }) => {
                let picture = state.picture();
                pen_edit(picture, position, *color).map(|edit| Action::draw(picture.draw(&[edit])))
            }
            ToolPhase::Active(ActiveStroke::Rectangle { start, color, base }) => {
                let edits = rectangle_edits(*start, position, *color, base.bounds());
                Some(Action::draw(base.draw(&edits)))
            }
        }
    }

    pub fn end(&mut self) {
        self.phase = ToolPhase::Idle;
    }
}
