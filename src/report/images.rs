//! Downscaling of oversized uploaded images.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use log::{debug, error};
use thiserror::Error;

use crate::config::ImageSettings;

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("failed to open image: {0}")]
    Open(#[source] image::ImageError),
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode resized image: {0}")]
    Encode(#[source] image::ImageError),
}

/// `photo.jpg` -> `photo_resized.jpg`
pub fn resized_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_resized.{}", stem, ext.to_string_lossy()),
        None => format!("{}_resized", stem),
    };
    path.with_file_name(name)
}

/// Target dimensions for an image `width` x `height` pixels, or `None` when
/// it already fits within `max_px`.
pub fn scaled_dimensions(width: u32, height: u32, max_px: u32) -> Option<(u32, u32)> {
    if width <= max_px || width == 0 {
        return None;
    }
    let ratio = max_px as f64 / width as f64;
    let new_w = ((width as f64 * ratio) as u32).max(1);
    let new_h = ((height as f64 * ratio) as u32).max(1);
    Some((new_w, new_h))
}

fn save_image(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), ResizeError> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    if format == ImageFormat::Jpeg {
        let file = File::create(path).map_err(|source| ResizeError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let rgb = img.to_rgb8();
        JpegEncoder::new_with_quality(&mut writer, quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(ResizeError::Encode)
    } else {
        img.save_with_format(path, format).map_err(ResizeError::Encode)
    }
}

/// Downscale `path` when wider than the configured maximum, returning the
/// path of the image to use.
pub fn try_resize(path: &Path, settings: &ImageSettings) -> Result<PathBuf, ResizeError> {
    let img = image::open(path).map_err(ResizeError::Open)?;
    let (width, height) = img.dimensions();

    let Some((new_w, new_h)) = scaled_dimensions(width, height, settings.max_image_px) else {
        debug!("{} is {}px wide, no resize needed", path.display(), width);
        return Ok(path.to_path_buf());
    };

    let resized = img.resize_exact(new_w, new_h, FilterType::Lanczos3);
    let target = resized_path(path);
    save_image(&resized, &target, settings.resize_quality)?;
    debug!(
        "Resized {} from {}x{} to {}x{}",
        path.display(),
        width,
        height,
        new_w,
        new_h
    );
    Ok(target)
}

/// Like [`try_resize`] but never fails: on error the original path is kept.
pub fn ensure_image_resized(path: &Path, settings: &ImageSettings) -> PathBuf {
    match try_resize(path, settings) {
        Ok(p) => p,
        Err(e) => {
            error!("Image resize error for {}: {}", path.display(), e);
            path.to_path_buf()
        }
    }
}
