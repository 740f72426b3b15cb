//! Application state and the undo-aware reducer that replaces it on every action.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use super::tools::ToolKind;
use crate::geometry::Color;
use crate::picture::Picture;

pub const DEFAULT_COALESCE_WINDOW_MS: u64 = 1_000;

/// Undo policy. `max_depth: None` keeps every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    pub coalesce_window_ms: u64,
    pub max_depth: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            coalesce_window_ms: DEFAULT_COALESCE_WINDOW_MS,
            max_depth: None,
        }
    }
}

pub trait Clock {
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    tool: ToolKind,
    color: Color,
    picture: Picture,
    /// Earlier pictures, most recent first.
    done: VecDeque<Picture>,
    /// Time of the last snapshot boundary; `None` right after start or undo.
    done_at: Option<u64>,
}

impl EditorState {
    pub fn new(tool: ToolKind, color: Color, picture: Picture) -> Self {
        Self {
            tool,
            color,
            picture,
            done: VecDeque::new(),
            done_at: None,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    pub fn done(&self) -> impl Iterator<Item = &Picture> {
        self.done.iter()
    }

    pub fn history_len(&self) -> usize {
        self.done.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn done_at(&self) -> Option<u64> {
        self.done_at
    }

    fn apply(mut self, patch: StatePatch) -> Self {
        if let Some(tool) = patch.tool {
            self.tool = tool;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(picture) = patch.picture {
            self.picture = picture;
        }
        self
    }
}

/// Partial state update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub tool: Option<ToolKind>,
    pub color: Option<Color>,
    pub picture: Option<Picture>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Undo,
    Update(StatePatch),
}

impl Action {
    pub fn draw(picture: Picture) -> Self {
        Self::Update(StatePatch {
            picture: Some(picture),
            ..StatePatch::default()
        })
    }

    pub fn set_color(color: Color) -> Self {
        Self::Update(StatePatch {
            color: Some(color),
            ..StatePatch::default()
        })
    }

    pub fn select_tool(tool: ToolKind) -> Self {
        Self::Update(StatePatch {
            tool: Some(tool),
            ..StatePatch::default()
        })
    }
}

/// Produces the state that follows `state` once `action` is applied at `now`.
///
/// A picture change arriving at least `coalesce_window_ms` after the last
/// snapshot pushes the pre-action picture onto the history; changes inside
/// the window are merged into the same undo step.
pub fn reduce(
    mut state: EditorState,
    action: Action,
    now: u64,
    config: &HistoryConfig,
) -> EditorState {
    let patch = match action {
        Action::Undo => {
            let Some(previous) = state.done.pop_front() else {
                tracing::debug!("undo requested with empty history");
                return state;
            };
            tracing::debug!(remaining = state.done.len(), "undo applied");
            state.picture = previous;
            state.done_at = None;
            return state;
        }
        Action::Update(patch) => patch,
    };

    let at_boundary = patch.picture.is_some()
        && state
            .done_at
            .is_none_or(|done_at| now.saturating_sub(done_at) >= config.coalesce_window_ms);

    if at_boundary {
        let snapshot = state.picture.clone();
        state.done.push_front(snapshot);
        if let Some(max_depth) = config.max_depth {
            state.done.truncate(max_depth);
        }
        state.done_at = Some(now);
        tracing::debug!(depth = state.done.len(), now, "history snapshot recorded");
    }

    state.apply(patch)
}
