//! PNG export and bitmap import for pictures.

mod export;
mod import;

use std::io;

use thiserror::Error;

use crate::picture::PictureError;

pub use export::{encode_png, export_path, rasterize, save_png};
pub use import::{decode_picture, load_picture, picture_from_bitmap};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "pixel8art.png";
/// Imported bitmaps are cropped to their top-left region of this size.
pub const MAX_IMPORT_DIMENSION: u32 = 100;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("bitmap buffer holds {actual} bytes, expected {expected}")]
    BitmapSize { expected: usize, actual: usize },
    #[error("bitmap has no pixels")]
    EmptyBitmap,
    #[error("raster scale must be positive")]
    InvalidScale,
    #[error(transparent)]
    Picture(#[from] PictureError),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
