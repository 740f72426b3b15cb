use std::collections::VecDeque;

use crate::geometry::{Color, Point};
use crate::picture::{Edit, Picture, PictureResult};

/// Von Neumann neighborhood: left, right, up, down.
const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Breadth-first, 4-connected region fill starting at `seed`.
///
/// The target color is sampled once at the seed. Filling a region with its
/// own color yields only the seed edit and changes nothing.
pub fn flood_fill_edits(picture: &Picture, seed: Point, color: Color) -> PictureResult<Vec<Edit>> {
    let target = picture.pixel_at(seed)?;
    if target == color {
        return Ok(vec![Edit::at(seed, color)]);
    }
    let bounds = picture.bounds();

    // seen doubles as the membership set of the fill region
    let mut seen = vec![false; bounds.area()];
    let mut queue = VecDeque::from([seed]);
    let mut edits = Vec::new();
    if let Some(index) = bounds.index_of(seed) {
        seen[index] = true;
    }

    while let Some(point) = queue.pop_front() {
        edits.push(Edit::at(point, color));

        for (dx, dy) in NEIGHBORS {
            let next = point.offset(dx, dy);
            let Some(index) = bounds.index_of(next) else {
                continue;
            };
            if seen[index] || picture.pixels()[index] != target {
                continue;
            }
            seen[index] = true;
            queue.push_back(next);
        }
    }

    Ok(edits)
}
