use log::debug;
use serde::{Deserialize, Serialize};

use super::{finite, Filter};
use crate::canvas::Raster;
use crate::error::Result;
use crate::util::RandomSource;

/// Push every pixel away from `threshold`
///
/// Pixels whose R, G, B mean is above `threshold` gain `amount` on each
/// channel, the rest lose it. Unclamped; stores wrap.
pub fn recontrast(raster: &mut Raster<'_>, threshold: f64, amount: f64) -> Result<()> {
    let threshold = finite("recontrast", "threshold", threshold)?;
    let amount = finite("recontrast", "amount", amount)?;
    debug!("recontrast: threshold={threshold:.1} amount={amount:.1}");

    for x in 0..raster.width() {
        for y in 0..raster.height() {
            let (fx, fy) = (x as f64, y as f64);
            let color = raster.get_color(fx, fy);
            let shift = if color.average() > threshold { amount } else { -amount };
            raster.set_color(fx, fy, color.map_rgb(|c| c + shift));
        }
    }
    Ok(())
}

/// Parameters for [`recontrast`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recontrast {
    pub threshold: f64,
    pub amount: f64,
}

impl Filter for Recontrast {
    fn name(&self) -> &'static str {
        "recontrast"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        recontrast(raster, self.threshold, self.amount)
    }
}
