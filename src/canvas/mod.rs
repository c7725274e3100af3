//! The RGBA canvas every filter reads and writes
//!
//! Channel values are computed in `f64` and only narrowed to bytes at write
//! time, through [`Channel`]. That single conversion point is the crate's
//! overflow policy.

mod raster;

pub use raster::{Raster, Snapshot};

/// One stored color channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Channel(u8);

impl Channel {
    /// Floor, then wrap into `[0, 255]` with Euclidean modulo
    ///
    /// This is the store policy for every write: `256 -> 0`, `-1 -> 255`,
    /// `-0.5 -> 255`. Non-finite values store 0.
    #[inline]
    pub fn wrap(v: f64) -> Self {
        if !v.is_finite() {
            return Self(0);
        }
        Self(v.floor().rem_euclid(256.0) as u8)
    }

    /// Floor, then saturate into `[0, 255]`
    ///
    /// Used by filters that clamp before writing. NaN stores 0.
    #[inline]
    pub fn clamp(v: f64) -> Self {
        if v.is_nan() {
            return Self(0);
        }
        Self(v.floor().clamp(0.0, 255.0) as u8)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// An ephemeral `(r, g, b, a)` used for reads and channel arithmetic
///
/// Values are unbounded while a filter works on them; narrowing happens in
/// [`Raster::set_color`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Transparent black, also the out-of-bounds sentinel
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Color with alpha left unspecified, which stores as 0
    #[inline]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 0.0)
    }

    /// Apply `f` to R, G and B, leaving alpha untouched
    #[inline]
    pub fn map_rgb(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Mean of R, G and B
    #[inline]
    pub fn average(self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// The color exactly as it would be stored
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [
            Channel::wrap(self.r).value(),
            Channel::wrap(self.g).value(),
            Channel::wrap(self.b).value(),
            Channel::wrap(self.a).value(),
        ]
    }
}
