use crate::geometry::{Color, Point};
use crate::picture::{Edit, Picture};

/// Single-pixel edit under the pointer, or nothing once the pointer leaves
/// the picture. Consecutive cells are not interpolated.
pub fn pen_edit(picture: &Picture, position: Point, color: Color) -> Option<Edit> {
    picture
        .contains(position)
        .then_some(Edit::at(position, color))
}
