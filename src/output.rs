//! Encoder handoff
//!
//! The canvas knows nothing about files; this module takes its finished
//! RGBA bytes and writes a PNG through the `image` crate.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::info;

use crate::error::{Error, Result};

/// What to do with the alpha channel when encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Write RGBA exactly as buffered
    Preserve,
    /// Drop alpha and write RGB. Filters leave alpha at 0 in many places,
    /// which would otherwise produce a mostly invisible image.
    #[default]
    Opaque,
}

fn to_image(pixels: &[u8], width: u32, height: u32, alpha: AlphaMode) -> Result<DynamicImage> {
    let rgba = RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or(
        Error::InvalidDimensions {
            width,
            height,
            len: pixels.len(),
        },
    )?;
    let image = DynamicImage::ImageRgba8(rgba);
    Ok(match alpha {
        AlphaMode::Preserve => image,
        AlphaMode::Opaque => DynamicImage::ImageRgb8(image.to_rgb8()),
    })
}

/// Encode RGBA bytes (row-major, top to bottom) as PNG in memory
pub fn encode_png(pixels: &[u8], width: u32, height: u32, alpha: AlphaMode) -> Result<Vec<u8>> {
    let image = to_image(pixels, width, height, alpha)?;
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Encode RGBA bytes as PNG and write them to `path`
pub fn save_png(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
    alpha: AlphaMode,
) -> Result<()> {
    let path = path.as_ref();
    to_image(pixels, width, height, alpha)?.save_with_format(path, ImageFormat::Png)?;
    info!("wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}
