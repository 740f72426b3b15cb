use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use super::{StorageError, StorageResult, DEFAULT_EXPORT_FILE_NAME};
use crate::picture::Picture;

/// Draws every cell as a `scale`×`scale` opaque square.
pub fn rasterize(picture: &Picture, scale: u32) -> StorageResult<RgbaImage> {
    if scale == 0 {
        return Err(StorageError::InvalidScale);
    }
    let width = picture.width().saturating_mul(scale);
    let height = picture.height().saturating_mul(scale);
    let columns = picture.width() as usize;
    let pixels = picture.pixels();

    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let index = (x / scale) as usize + (y / scale) as usize * columns;
        let (r, g, b) = pixels[index].rgb();
        Rgba([r, g, b, 0xff])
    }))
}

/// One image pixel per cell, PNG encoded.
pub fn encode_png(picture: &Picture) -> StorageResult<Vec<u8>> {
    let image = rasterize(picture, 1)?;
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

pub fn save_png(picture: &Picture, path: &Path) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let encoded = encode_png(picture)?;
    fs::write(path, encoded)?;
    tracing::info!(
        path = %path.display(),
        width = picture.width(),
        height = picture.height(),
        "picture exported"
    );
    Ok(())
}

pub fn export_path(dir: &Path, file_name: Option<&str>) -> PathBuf {
    dir.join(file_name.unwrap_or(DEFAULT_EXPORT_FILE_NAME))
}
