use std::path::Path;

use super::{StorageError, StorageResult};
use crate::geometry::Color;
use crate::picture::Picture;

const CHANNELS: usize = 4;

/// Builds a picture from raw RGBA bytes of a `width`×`height` bitmap.
///
/// Only the top-left `max_dimension` square is kept; nothing is scaled.
/// Alpha is ignored.
pub fn picture_from_bitmap(
    width: u32,
    height: u32,
    rgba: &[u8],
    max_dimension: u32,
) -> StorageResult<Picture> {
    if width == 0 || height == 0 || max_dimension == 0 {
        return Err(StorageError::EmptyBitmap);
    }
    let expected = width as usize * height as usize * CHANNELS;
    if rgba.len() != expected {
        return Err(StorageError::BitmapSize {
            expected,
            actual: rgba.len(),
        });
    }

    let out_width = width.min(max_dimension) as usize;
    let out_height = height.min(max_dimension) as usize;
    let stride = width as usize * CHANNELS;

    let pixels = rgba
        .chunks_exact(stride)
        .take(out_height)
        .flat_map(|row| {
            row.chunks_exact(CHANNELS)
                .take(out_width)
                .map(|quad| Color::new(quad[0], quad[1], quad[2]))
        })
        .collect::<Vec<_>>();

    Ok(Picture::from_pixels(
        out_width as i64,
        out_height as i64,
        pixels,
    )?)
}

pub fn decode_picture(bytes: &[u8], max_dimension: u32) -> StorageResult<Picture> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    picture_from_bitmap(width, height, image.as_raw(), max_dimension)
}

pub fn load_picture(path: &Path, max_dimension: u32) -> StorageResult<Picture> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    tracing::info!(path = %path.display(), width, height, "bitmap loaded");
    picture_from_bitmap(width, height, image.as_raw(), max_dimension)
}
