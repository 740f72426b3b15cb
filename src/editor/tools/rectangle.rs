use crate::geometry::{Bounds, Color, Point};
use crate::picture::Edit;

/// Inclusive, axis-aligned box spanned by two grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: Point,
    pub max: Point,
}

impl CellRect {
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Restricts the box to cells inside `bounds`; `None` when nothing remains.
    pub fn clipped(self, bounds: Bounds) -> Option<Self> {
        let last_x = i32::try_from(bounds.width).ok()?.checked_sub(1)?;
        let last_y = i32::try_from(bounds.height).ok()?.checked_sub(1)?;
        let min = Point::new(self.min.x.max(0), self.min.y.max(0));
        let max = Point::new(self.max.x.min(last_x), self.max.y.min(last_y));
        (min.x <= max.x && min.y <= max.y).then_some(Self { min, max })
    }
}

/// Every cell of the box between `start` and `end`, row by row.
///
/// The whole box is produced on each call so that a dragged rectangle is
/// replaced rather than accumulated.
pub fn rectangle_edits(start: Point, end: Point, color: Color, bounds: Bounds) -> Vec<Edit> {
    let Some(rect) = CellRect::spanning(start, end).clipped(bounds) else {
        return Vec::new();
    };

    (rect.min.y..=rect.max.y)
        .flat_map(|y| (rect.min.x..=rect.max.x).map(move |x| Edit::new(x, y, color)))
        .collect()
}
