//! I/O helpers for RGBA images and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG/etc. from disk into an `Rgba8Image`.
//! - `decode_rgba_image`: decode an encoded upload held in memory.
//! - `save_rgba_png`: write an `Rgba8Image` to a PNG.
//! - `encode_png`: PNG bytes in memory, e.g. to feed an upload.
//! - `write_json_file` / `read_json_file`: serde JSON round trips on disk.
use super::Rgba8Image;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

impl From<RgbaImage> for Rgba8Image {
    fn from(img: RgbaImage) -> Self {
        let w = img.width() as usize;
        let h = img.height() as usize;
        let data = img.pixels().map(|p| p.0).collect();
        Rgba8Image {
            w,
            h,
            stride: w,
            data,
        }
    }
}

impl From<DynamicImage> for Rgba8Image {
    fn from(img: DynamicImage) -> Self {
        img.into_rgba8().into()
    }
}

/// Load an image from disk and convert to RGBA8.
pub fn load_rgba_image(path: &Path) -> Result<Rgba8Image, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Ok(img.into())
}

/// Decode an encoded image (PNG, JPEG, ...) from memory.
pub fn decode_rgba_image(bytes: &[u8]) -> Result<Rgba8Image, String> {
    let img =
        image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {e}"))?;
    Ok(img.into())
}

/// Convert to an `image` crate buffer.
pub fn to_image_buffer(img: &Rgba8Image) -> Result<RgbaImage, String> {
    RgbaImage::from_raw(img.w as u32, img.h as u32, img.to_raw())
        .ok_or_else(|| "Failed to create image buffer".to_string())
}

/// Save an RGBA buffer to a PNG, creating parent directories.
pub fn save_rgba_png(img: &Rgba8Image, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    to_image_buffer(img)?
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Encode as PNG into memory.
pub fn encode_png(img: &Rgba8Image) -> Result<Vec<u8>, String> {
    let mut out = Cursor::new(Vec::new());
    to_image_buffer(img)?
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| format!("Failed to encode PNG: {e}"))?;
    Ok(out.into_inner())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Parse a JSON document from `path`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
