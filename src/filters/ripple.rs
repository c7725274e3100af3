//! Ripple rings: a light/dark ripple pushed outward from a point
//!
//! A polar scan walks concentric circles around the center and darkens
//! each sample by a logarithmic falloff of its distance from the center.
//! Near the rim `ln(height - distance)` goes negative, which brightens.

use std::collections::HashSet;
use std::f64::consts::TAU;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{finite, steppable, Filter};
use crate::canvas::{Color, Raster};
use crate::error::Result;
use crate::util::RandomSource;

/// Radius increment of the polar scan
const RADIUS_STEP: f64 = 0.1;
/// Angle increment of the polar scan, in radians
const THETA_STEP: f64 = 0.01;

/// Darkening at `distance` from the center of a ring of radius `height`
///
/// Outside the ring the log is undefined; those samples get no effect.
#[inline]
fn ring_intensity(height: f64, distance: f64, multiplier: f64) -> f64 {
    let reach = height - distance;
    if reach > 0.0 {
        reach.ln() * multiplier
    } else {
        0.0
    }
}

/// Exact sample position, with `-0.0` folded into `0.0`
#[inline]
fn sample_key(x: f64, y: f64) -> (u64, u64) {
    ((x + 0.0).to_bits(), (y + 0.0).to_bits())
}

/// Ripple out from `(sx, sy)` to radius `height`
///
/// Each unique sample loses `ln(height - d) * intensity_multiplier *
/// layer_intensity` on R, G and B; alpha is rewritten as 0. Samples are
/// deduplicated on their exact floating-point position within this call
/// only, so distinct samples that floor onto one pixel each apply.
pub fn point_ring(
    raster: &mut Raster<'_>,
    sx: f64,
    sy: f64,
    height: f64,
    layer_intensity: f64,
    intensity_multiplier: f64,
) -> Result<()> {
    const NAME: &str = "point_ring";
    let sx = finite(NAME, "sx", sx)?;
    let sy = finite(NAME, "sy", sy)?;
    let height = steppable(NAME, "height", height, RADIUS_STEP)?;
    let layer_intensity = finite(NAME, "layer_intensity", layer_intensity)?;
    let intensity_multiplier = finite(NAME, "intensity_multiplier", intensity_multiplier)?;
    debug!(
        "{NAME}: center=({sx:.1}, {sy:.1}) height={height:.2} layer={layer_intensity:.3} mult={intensity_multiplier:.3}"
    );

    let mut used_points = HashSet::new();
    let mut r = 0.0;
    while r < height {
        let mut theta = 0.0;
        while theta < TAU {
            let x = r * theta.cos() + sx;
            let y = r * theta.sin() + sy;
            theta += THETA_STEP;

            if !used_points.insert(sample_key(x, y)) {
                continue;
            }

            let distance = ((sx - x) * (sx - x) + (sy - y) * (sy - y)).sqrt();
            let shift = ring_intensity(height, distance, intensity_multiplier) * layer_intensity;

            let current = raster.get_color(x, y);
            raster.set_color(
                x,
                y,
                Color::rgb(current.r - shift, current.g - shift, current.b - shift),
            );
        }
        r += RADIUS_STEP;
    }
    debug!("{NAME}: {} unique samples", used_points.len());
    Ok(())
}

/// Parameters for [`point_ring`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRing {
    pub sx: f64,
    pub sy: f64,
    pub height: f64,
    pub layer_intensity: f64,
    pub intensity_multiplier: f64,
}

impl Filter for PointRing {
    fn name(&self) -> &'static str {
        "point_ring"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        point_ring(
            raster,
            self.sx,
            self.sy,
            self.height,
            self.layer_intensity,
            self.intensity_multiplier,
        )
    }
}
