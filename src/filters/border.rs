//! Fading frame along the top and bottom edges
//!
//! Left and right edges are not framed, and the blend divides by
//! [`BLEND_DIVISOR`] rather than 100, which halves the blended brightness.
//! Both are the established look of the output and are kept on purpose.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{finite, Filter};
use crate::canvas::{Color, Raster};
use crate::error::Result;
use crate::util::RandomSource;

/// Divisor of the border blend
pub const BLEND_DIVISOR: f64 = 200.0;

/// Blend `border` into the pixel at `(x, y)` with `percent` weight
///
/// Each of R, G, B becomes `(border * percent + pixel * (100 - percent)) / 200`.
/// Alpha is kept.
pub fn border_point(raster: &mut Raster<'_>, x: f64, y: f64, border: Color, percent: f64) {
    let pixel = raster.get_color(x, y);
    let mix = |b: f64, p: f64| (b * percent + p * (100.0 - percent)) / BLEND_DIVISOR;
    raster.set_color(
        x,
        y,
        Color::new(
            mix(border.r, pixel.r),
            mix(border.g, pixel.g),
            mix(border.b, pixel.b),
            pixel.a,
        ),
    );
}

/// Draw `mul` rings of border along the top and bottom of the
/// `width x height` region
///
/// Ring `k` counts inward from the edge and blends at `100 - k * mul`
/// percent; rings stop once the weight reaches zero. `mul == 0` draws nothing.
pub fn border(
    raster: &mut Raster<'_>,
    width: u32,
    height: u32,
    bred: f64,
    bgreen: f64,
    bblue: f64,
    mul: u32,
) -> Result<()> {
    let color = Color::rgb(
        finite("border", "bred", bred)?,
        finite("border", "bgreen", bgreen)?,
        finite("border", "bblue", bblue)?,
    );
    debug!("border: region={width}x{height} color=({bred:.0}, {bgreen:.0}, {bblue:.0}) mul={mul}");

    for ring in 0..mul {
        let percent = 100.0 - ring as f64 * mul as f64;
        if percent <= 0.0 {
            break;
        }
        let top = ring as f64;
        let bottom = height as f64 - 1.0 - ring as f64;
        for x in 0..width {
            border_point(raster, x as f64, top, color, percent);
            border_point(raster, x as f64, bottom, color, percent);
        }
    }
    Ok(())
}

/// Parameters for [`border`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: u32,
    pub height: u32,
    pub bred: f64,
    pub bgreen: f64,
    pub bblue: f64,
    pub mul: u32,
}

impl Filter for Border {
    fn name(&self) -> &'static str {
        "border"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        border(
            raster,
            self.width,
            self.height,
            self.bred,
            self.bgreen,
            self.bblue,
            self.mul,
        )
    }
}
