//! Immutable raster buffer edited through copy-on-write edit batches.

use std::sync::Arc;

use thiserror::Error;

use crate::geometry::{Bounds, Color, Point};

pub type PictureResult<T> = std::result::Result<T, PictureError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PictureError {
    #[error("invalid picture dimension {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },
    #[error("pixel ({x}, {y}) is outside the {width}x{height} picture")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

/// A single cell write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Edit {
    pub const fn new(x: i32, y: i32, color: Color) -> Self {
        Self { x, y, color }
    }

    pub const fn at(point: Point, color: Color) -> Self {
        Self::new(point.x, point.y, color)
    }

    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Fixed-size grid of colors stored row-major.
///
/// There is no way to mutate a `Picture` in place: [`Picture::draw`] hands
/// back a new value and leaves the receiver untouched. Cloning shares the
/// pixel storage, so history snapshots cost a reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    bounds: Bounds,
    pixels: Arc<[Color]>,
}

impl Picture {
    pub fn empty(width: i64, height: i64, color: Color) -> PictureResult<Self> {
        let bounds = checked_bounds(width, height)?;
        Ok(Self {
            bounds,
            pixels: vec![color; bounds.area()].into(),
        })
    }

    pub fn from_pixels(width: i64, height: i64, pixels: Vec<Color>) -> PictureResult<Self> {
        let bounds = checked_bounds(width, height)?;
        if pixels.len() != bounds.area() {
            return Err(PictureError::PixelCountMismatch {
                expected: bounds.area(),
                actual: pixels.len(),
            });
        }
        Ok(Self {
            bounds,
            pixels: pixels.into(),
        })
    }

    pub const fn width(&self) -> u32 {
        self.bounds.width
    }

    pub const fn height(&self) -> u32 {
        self.bounds.height
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn pixel(&self, x: i32, y: i32) -> PictureResult<Color> {
        self.bounds
            .index_of(Point::new(x, y))
            .map(|index| self.pixels[index])
            .ok_or(PictureError::OutOfBounds {
                x,
                y,
                width: self.bounds.width,
                height: self.bounds.height,
            })
    }

    pub fn pixel_at(&self, point: Point) -> PictureResult<Color> {
        self.pixel(point.x, point.y)
    }

    /// Applies `edits` in order onto a copy of this picture; the last write to
    /// a cell wins. Edits outside the picture are dropped.
    pub fn draw<'a, I>(&self, edits: I) -> Picture
    where
        I: IntoIterator<Item = &'a Edit>,
    {
        let mut copy = self.pixels.to_vec();
        for edit in edits {
            match self.bounds.index_of(edit.point()) {
                Some(index) => copy[index] = edit.color,
                None => tracing::warn!(
                    x = edit.x,
                    y = edit.y,
                    width = self.bounds.width,
                    height = self.bounds.height,
                    "dropping out-of-bounds edit"
                ),
            }
        }
        Picture {
            bounds: self.bounds,
            pixels: copy.into(),
        }
    }

    /// True when both pictures share the same pixel storage.
    pub fn ptr_eq(&self, other: &Picture) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

fn checked_bounds(width: i64, height: i64) -> PictureResult<Bounds> {
    let invalid = PictureError::InvalidDimension { width, height };
    if width <= 0 || height <= 0 {
        return Err(invalid);
    }
    let width = u32::try_from(width).map_err(|_| invalid.clone())?;
    let height = u32::try_from(height).map_err(|_| invalid.clone())?;
    // cells must stay addressable through i32 points
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(invalid);
    }
    Ok(Bounds::new(width, height))
}
