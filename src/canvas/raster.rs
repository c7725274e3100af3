use super::{Channel, Color};
use crate::error::{Error, Result};

// ============================================================================
// Raster
// ============================================================================

/// RGBA8888 raster over a caller-owned buffer
///
/// Bytes are R, G, B, A interleaved, row-major, top to bottom. The raster
/// never allocates or resizes the buffer; it only borrows it for the run.
pub struct Raster<'a> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
    lesser_dimension: u32,
}

impl<'a> Raster<'a> {
    /// Wrap `buffer` and clear it to transparent black
    ///
    /// `buffer.len()` must be exactly `width * height * 4`.
    pub fn new(width: u32, height: u32, buffer: &'a mut [u8]) -> Result<Self> {
        let len = buffer.len();
        let invalid = || Error::InvalidDimensions { width, height, len };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        if len != expected {
            return Err(invalid());
        }

        let mut raster = Self {
            buffer,
            width,
            height,
            lesser_dimension: width.min(height),
        };
        // Prefill so stale memory never leaks into the output
        raster.fill_color(Color::TRANSPARENT);
        Ok(raster)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `min(width, height)`
    #[inline]
    pub fn lesser_dimension(&self) -> u32 {
        self.lesser_dimension
    }

    /// Byte offset of pixel `(x, y)`
    ///
    /// Performs no bounds check; callers go through `get_color`/`set_color`.
    #[inline]
    pub fn coord_index(&self, x: usize, y: usize) -> usize {
        byte_index(self.width, x, y)
    }

    /// Read the pixel at `(floor(x), floor(y))`
    ///
    /// Off-canvas coordinates yield [`Color::TRANSPARENT`], never an error.
    #[inline]
    pub fn get_color(&self, x: f64, y: f64) -> Color {
        read_pixel(&*self.buffer, self.width, self.height, x, y)
    }

    /// Overwrite the pixel at `(floor(x), floor(y))`
    ///
    /// Each channel is stored with [`Channel::wrap`]. Off-canvas writes are
    /// silently dropped.
    #[inline]
    pub fn set_color(&mut self, x: f64, y: f64, color: Color) {
        let Some(idx) = locate(self.width, self.height, x, y) else {
            return;
        };
        self.buffer[idx] = Channel::wrap(color.r).value();
        self.buffer[idx + 1] = Channel::wrap(color.g).value();
        self.buffer[idx + 2] = Channel::wrap(color.b).value();
        self.buffer[idx + 3] = Channel::wrap(color.a).value();
    }

    /// Paint every pixel with `color`, column by column through `set_color`
    pub fn fill_color(&mut self, color: Color) {
        for x in 0..self.width {
            for y in 0..self.height {
                self.set_color(x as f64, y as f64, color);
            }
        }
    }

    /// Read-only view of the buffer for the encoder
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &*self.buffer
    }

    /// Copy of the current pixels, for filters that must read unmodified
    /// neighbours while writing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: self.buffer.to_vec(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Owned, read-only copy of a raster's pixels
pub struct Snapshot {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Snapshot {
    /// Same addressing and sentinel rules as [`Raster::get_color`]
    pub fn get_color(&self, x: f64, y: f64) -> Color {
        read_pixel(&self.pixels, self.width, self.height, x, y)
    }
}

#[inline]
fn byte_index(width: u32, x: usize, y: usize) -> usize {
    4 * (y * width as usize + x)
}

/// Floor `(x, y)` and return its byte offset if it lies on the canvas
#[inline]
fn locate(width: u32, height: u32, x: f64, y: f64) -> Option<usize> {
    let (x, y) = (x.floor(), y.floor());
    // NaN fails both comparisons and lands out of bounds
    if x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64 {
        Some(byte_index(width, x as usize, y as usize))
    } else {
        None
    }
}

/// Color at `(floor(x), floor(y))` of an RGBA buffer, or the sentinel off-canvas
#[inline]
fn read_pixel(pixels: &[u8], width: u32, height: u32, x: f64, y: f64) -> Color {
    let Some(idx) = locate(width, height, x, y) else {
        return Color::TRANSPARENT;
    };
    Color::new(
        pixels[idx] as f64,
        pixels[idx + 1] as f64,
        pixels[idx + 2] as f64,
        pixels[idx + 3] as f64,
    )
}
