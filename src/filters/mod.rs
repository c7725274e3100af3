//! Pixel filters
//!
//! Every filter is a free function over a [`Raster`] plus a params struct
//! implementing [`Filter`], so a sequence of them can be stored in a recipe.
//! Filters never call each other and only touch pixels through
//! `get_color`/`set_color`, so they may compute coordinates off the canvas.

mod antialias;
mod border;
mod contrast;
mod explosion;
mod noise;
mod punch;
mod ripple;

pub use antialias::{antialias, Antialias, BlurMode};
pub use border::{border, border_point, Border, BLEND_DIVISOR};
pub use contrast::{recontrast, Recontrast};
pub use explosion::{explosion, Explosion};
pub use noise::{character, pretty_noise, Character, PrettyNoise};
pub use punch::{punch_image, punch_point, punch_wave, PunchImage, PunchPoint, PunchWave};
pub use ripple::{point_ring, PointRing};

use crate::canvas::Raster;
use crate::error::{Error, Result};
use crate::util::RandomSource;

/// A configured filter that can be applied to a raster
pub trait Filter {
    /// Filter name for logs and recipes
    fn name(&self) -> &'static str;

    /// Mutate `raster` in place
    ///
    /// Filters that need no randomness ignore `rng`.
    fn apply(&self, raster: &mut Raster<'_>, rng: &mut dyn RandomSource) -> Result<()>;
}

/// Reject NaN and infinite parameters before any pixel is touched
#[inline]
pub(crate) fn finite(filter: &'static str, parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(filter, parameter, value))
    }
}

/// Finite and strictly positive
#[inline]
pub(crate) fn positive(filter: &'static str, parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(filter, parameter, value))
    }
}

/// Finite and small enough that a counter stepping by `step` across
/// `[-value, value]` always advances
///
/// Above `step * 2^52` the spacing of f64 values outgrows the step, adding
/// it can round back to the same counter and the scan never finishes.
#[inline]
pub(crate) fn steppable(
    filter: &'static str,
    parameter: &'static str,
    value: f64,
    step: f64,
) -> Result<f64> {
    let value = finite(filter, parameter, value)?;
    if value * f64::EPSILON > step {
        Err(invalid(filter, parameter, value))
    } else {
        Ok(value)
    }
}

/// Finite and within `[0, 1]`
#[inline]
pub(crate) fn probability(
    filter: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(filter, parameter, value))
    }
}

#[inline]
fn invalid(filter: &'static str, parameter: &'static str, value: f64) -> Error {
    Error::InvalidFilterParameter {
        filter,
        parameter,
        value,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::canvas::{Color, Raster};

    /// Buffer sized for a `width x height` raster
    pub fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0; (width * height * 4) as usize]
    }

    /// Every pixel in row-major order, as stored bytes
    pub fn pixels(raster: &Raster<'_>) -> Vec<[u8; 4]> {
        raster
            .as_bytes()
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect()
    }

    pub fn at(raster: &Raster<'_>, x: u32, y: u32) -> [u8; 4] {
        raster.get_color(x as f64, y as f64).to_bytes()
    }

    pub fn gray(v: f64) -> Color {
        Color::new(v, v, v, 255.0)
    }
}
