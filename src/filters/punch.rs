//! Punches: exponential dents pressed into the image
//!
//! `punch_image` darkens a disc with a `2^(-d / spread)` falloff;
//! `punch_wave` drops the disc mask and bands the falloff through a sine.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{finite, positive, steppable, Filter};
use crate::canvas::{Channel, Raster};
use crate::error::{Error, Result};
use crate::util::RandomSource;

/// Falloff weight at distance `d` from the punch center
#[inline]
fn falloff(d: f64, spread: f64) -> f64 {
    2f64.powf(-d / spread)
}

/// One-pixel steps over a half-extent, validated as a full extent
const EXTENT_STEP: f64 = 2.0;

/// Visit every `(i, j)` offset of the `sw x sh` rectangle around the center,
/// stepping one pixel from `-sw/2` up to (not including) `sw/2`
fn scan_rect(sw: f64, sh: f64, mut visit: impl FnMut(f64, f64)) {
    let (half_w, half_h) = (sw / 2.0, sh / 2.0);
    let mut i = -half_w;
    while i < half_w {
        let mut j = -half_h;
        while j < half_h {
            visit(i, j);
            j += 1.0;
        }
        i += 1.0;
    }
}

/// Subtract `force` from R, G and B, clamping each channel to `[0, 255]`
#[inline]
fn press(raster: &mut Raster<'_>, x: f64, y: f64, force: f64) {
    let color = raster.get_color(x, y);
    let pressed = color.map_rgb(|c| Channel::clamp(c - force).value() as f64);
    raster.set_color(x, y, pressed);
}

/// Darken a disc of radius `sw / 2` around `(sx, sy)`
///
/// The scan covers the `sw x sh` rectangle; only offsets closer than `sw / 2`
/// are pressed, each by `force * 2^(-d / spread)`.
pub fn punch_image(
    raster: &mut Raster<'_>,
    sx: f64,
    sy: f64,
    sw: f64,
    sh: f64,
    force: f64,
    spread: f64,
) -> Result<()> {
    const NAME: &str = "punch_image";
    let sx = finite(NAME, "sx", sx)?;
    let sy = finite(NAME, "sy", sy)?;
    let sw = steppable(NAME, "sw", sw, EXTENT_STEP)?;
    let sh = steppable(NAME, "sh", sh, EXTENT_STEP)?;
    let force = finite(NAME, "force", force)?;
    let spread = positive(NAME, "spread", spread)?;
    debug!("{NAME}: center=({sx:.1}, {sy:.1}) size={sw:.1}x{sh:.1} force={force:.2} spread={spread:.2}");

    let radius = sw / 2.0;
    scan_rect(sw, sh, |i, j| {
        let d = (i * i + j * j).sqrt();
        if d < radius {
            press(raster, sx + i, sy + j, falloff(d, spread) * force);
        }
    });
    Ok(())
}

/// Concentric banding over the `sw x sh` rectangle around `(sx, sy)`
///
/// Each offset is pressed by `force * sin(2^(-d / spread) / period)`; a
/// negative sine lifts the pixel instead.
pub fn punch_wave(
    raster: &mut Raster<'_>,
    sx: f64,
    sy: f64,
    sw: f64,
    sh: f64,
    force: f64,
    spread: f64,
    period: f64,
) -> Result<()> {
    const NAME: &str = "punch_wave";
    let sx = finite(NAME, "sx", sx)?;
    let sy = finite(NAME, "sy", sy)?;
    let sw = steppable(NAME, "sw", sw, EXTENT_STEP)?;
    let sh = steppable(NAME, "sh", sh, EXTENT_STEP)?;
    let force = finite(NAME, "force", force)?;
    let spread = positive(NAME, "spread", spread)?;
    let period = finite(NAME, "period", period)?;
    if period == 0.0 {
        return Err(Error::InvalidFilterParameter {
            filter: NAME,
            parameter: "period",
            value: period,
        });
    }
    debug!("{NAME}: center=({sx:.1}, {sy:.1}) size={sw:.1}x{sh:.1} force={force:.2} spread={spread:.2} period={period:.3}");

    scan_rect(sw, sh, |i, j| {
        let intensity = falloff((i * i + j * j).sqrt(), spread);
        press(raster, sx + i, sy + j, force * (intensity / period).sin());
    });
    Ok(())
}

/// Press a single pixel down by `force`
///
/// Each of R, G and B clamps to `[0, 255]` on its own; alpha is kept.
pub fn punch_point(raster: &mut Raster<'_>, x: f64, y: f64, force: f64) -> Result<()> {
    const NAME: &str = "punch_point";
    let force = finite(NAME, "force", force)?;
    press(raster, x, y, force);
    Ok(())
}

/// Parameters for [`punch_image`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchImage {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
    pub force: f64,
    pub spread: f64,
}

impl Filter for PunchImage {
    fn name(&self) -> &'static str {
        "punch_image"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        punch_image(
            raster, self.sx, self.sy, self.sw, self.sh, self.force, self.spread,
        )
    }
}

/// Parameters for [`punch_wave`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchWave {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
    pub force: f64,
    pub spread: f64,
    pub period: f64,
}

impl Filter for PunchWave {
    fn name(&self) -> &'static str {
        "punch_wave"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        punch_wave(
            raster,
            self.sx,
            self.sy,
            self.sw,
            self.sh,
            self.force,
            self.spread,
            self.period,
        )
    }
}

/// Parameters for [`punch_point`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchPoint {
    pub x: f64,
    pub y: f64,
    pub force: f64,
}

impl Filter for PunchPoint {
    fn name(&self) -> &'static str {
        "punch_point"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        punch_point(raster, self.x, self.y, self.force)
    }
}
