//! Grain and pattern overlays driven by the injected random source

use log::debug;
use serde::{Deserialize, Serialize};

use super::{finite, Filter};
use crate::canvas::Raster;
use crate::error::Result;
use crate::util::RandomSource;

/// Range of the per-pixel modulus drawn by [`character`]
const CHARACTER_MOD_MIN: i64 = 110;
const CHARACTER_MOD_MAX: i64 = 150;
/// Weight of the log term in [`character`]
const CHARACTER_GAIN: f64 = 128.0;

/// Add uniform noise in `[-mul/2, mul/2)` to R, G and B of every pixel in
/// the `width x height` region at the origin
///
/// Each channel draws its own value. Nothing is clamped; stores wrap.
pub fn pretty_noise(
    raster: &mut Raster<'_>,
    width: u32,
    height: u32,
    mul: f64,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    let mul = finite("pretty_noise", "mul", mul)?;
    debug!("pretty_noise: region={width}x{height} mul={mul:.2}");

    let half = mul / 2.0;
    for x in 0..width {
        for y in 0..height {
            let (fx, fy) = (x as f64, y as f64);
            let noisy = raster
                .get_color(fx, fy)
                .map_rgb(|c| c + rng.range_f64(-half, half));
            raster.set_color(fx, fy, noisy);
        }
    }
    Ok(())
}

/// The `character` value of one channel at `(x, y)`
///
/// `floor(c/2 + 128 * ln((x/w + y/h) * modulus))` folded into `[0, 256)`.
/// At the origin the log argument is 0; the log term is then dropped.
#[inline]
fn character_channel(c: f64, x: f64, y: f64, width: f64, height: f64, modulus: f64) -> f64 {
    let arg = (x / width) * modulus + (y / height) * modulus;
    let log_term = if arg > 0.0 { arg.ln() } else { 0.0 };
    (c * 0.5 + CHARACTER_GAIN * log_term).floor().rem_euclid(256.0)
}

/// Logarithmic grain overlay over the `width x height` region
///
/// Every pixel draws a modulus in `[110, 150)`; R, G and B go through the
/// same formula, so a gray input stays gray. Alpha is kept.
pub fn character(
    raster: &mut Raster<'_>,
    width: u32,
    height: u32,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    debug!("character: region={width}x{height}");
    let (w, h) = (width as f64, height as f64);
    for x in 0..width {
        for y in 0..height {
            let (fx, fy) = (x as f64, y as f64);
            let modulus = rng.range_i64(CHARACTER_MOD_MIN, CHARACTER_MOD_MAX) as f64;
            let shaded = raster
                .get_color(fx, fy)
                .map_rgb(|c| character_channel(c, fx, fy, w, h, modulus));
            raster.set_color(fx, fy, shaded);
        }
    }
    Ok(())
}

/// Parameters for [`pretty_noise`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrettyNoise {
    pub width: u32,
    pub height: u32,
    pub mul: f64,
}

impl Filter for PrettyNoise {
    fn name(&self) -> &'static str {
        "pretty_noise"
    }

    fn apply(&self, raster: &mut Raster<'_>, rng: &mut dyn RandomSource) -> Result<()> {
        pretty_noise(raster, self.width, self.height, self.mul, rng)
    }
}

/// Parameters for [`character`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub width: u32,
    pub height: u32,
}

impl Filter for Character {
    fn name(&self) -> &'static str {
        "character"
    }

    fn apply(&self, raster: &mut Raster<'_>, rng: &mut dyn RandomSource) -> Result<()> {
        character(raster, self.width, self.height, rng)
    }
}
