//! Explosion: scatter pixels of a central disc outward
//!
//! Each visited pixel either explodes (copied, with jittered color, to a
//! random point `dk * width / 2` away) or is pushed away from mid-gray.

use std::f64::consts::TAU;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{finite, probability, steppable, Filter};
use crate::canvas::Raster;
use crate::error::Result;
use crate::util::RandomSource;

/// Channels at or above this value are pushed up, below it down
const MID_GRAY: f64 = 128.0;
/// How far a non-exploding channel is pushed from mid-gray
const PUSH: f64 = 50.0;

/// Scatter the disc of `radius` centered in the `width x width` region
///
/// Columns run across the disc's bounding square, but rows do not: each
/// column starts at the center row (`j = 0`, not `-radius`), walks down and
/// stops at the first pixel outside the disc. Only the lower half of the
/// disc is ever visited; rows above the center are left untouched.
///
/// A visited pixel explodes with probability `thresh`: one uniform angle,
/// then each of R, G, B gets its own `±ck` jitter, and the jittered color is
/// written both at the displaced point and back in place. Otherwise every
/// channel moves `50` away from mid-gray. Nothing is clamped; stores wrap.
pub fn explosion(
    raster: &mut Raster<'_>,
    width: f64,
    radius: f64,
    thresh: f64,
    dk: f64,
    ck: f64,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    const NAME: &str = "explosion";
    let width = finite(NAME, "width", width)?;
    let radius = steppable(NAME, "radius", radius, 1.0)?;
    let thresh = probability(NAME, "thresh", thresh)?;
    let dk = finite(NAME, "dk", dk)?;
    let ck = finite(NAME, "ck", ck)?;
    debug!("{NAME}: width={width:.1} radius={radius:.1} thresh={thresh:.3} dk={dk:.3} ck={ck:.1}");

    let center = width / 2.0;
    let reach = dk * width / 2.0;
    let mut exploded = 0usize;

    let mut i = -radius;
    while i <= radius {
        let mut j = 0.0;
        while j <= radius {
            if (i * i + j * j).sqrt() > radius {
                break;
            }
            let (px, py) = (center + i, center + j);
            let color = raster.get_color(px, py);

            if rng.chance(thresh) {
                let angle = rng.range_f64(0.0, TAU);
                let scattered = color.map_rgb(|c| c + rng.range_f64(-ck, ck));
                raster.set_color(px + angle.cos() * reach, py + angle.sin() * reach, scattered);
                raster.set_color(px, py, scattered);
                exploded += 1;
            } else {
                let pushed = color.map_rgb(|c| if c < MID_GRAY { c - PUSH } else { c + PUSH });
                raster.set_color(px, py, pushed);
            }
            j += 1.0;
        }
        i += 1.0;
    }
    debug!("{NAME}: {exploded} pixels exploded");
    Ok(())
}

/// Parameters for [`explosion`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub width: f64,
    pub radius: f64,
    pub thresh: f64,
    pub dk: f64,
    pub ck: f64,
}

impl Filter for Explosion {
    fn name(&self) -> &'static str {
        "explosion"
    }

    fn apply(&self, raster: &mut Raster<'_>, rng: &mut dyn RandomSource) -> Result<()> {
        explosion(
            raster,
            self.width,
            self.radius,
            self.thresh,
            self.dk,
            self.ck,
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use crate::error::Error;
    use crate::filters::test_support::{at, buffer, gray};
    use crate::util::{Rng, ScriptedSource};

    #[test]
    fn test_push_from_mid_gray_on_lower_half_disc() {
        let mut buf = buffer(4, 4);
        let mut raster = Raster::new(4, 4, &mut buf).unwrap();
        raster.fill_color(Color::new(100.0, 200.0, 127.0, 9.0));
        let mut rng = ScriptedSource::new(vec![0.5]);
        explosion(&mut raster, 4.0, 1.0, 0.0, 1.0, 10.0, &mut rng).unwrap();

        let pushed = [50, 250, 77, 9];
        let untouched = [100, 200, 127, 9];
        for (x, y) in [(1, 2), (2, 2), (2, 3), (3, 2)] {
            assert_eq!(at(&raster, x, y), pushed, "({x}, {y})");
        }
        // Upper half of the disc is never visited
        assert_eq!(at(&raster, 2, 1), untouched);
        assert_eq!(at(&raster, 0, 0), untouched);
        // One draw per visited pixel
        assert_eq!(rng.drawn(), 4);
    }

    #[test]
    fn test_push_wraps_instead_of_clamping() {
        let mut buf = buffer(2, 2);
        let mut raster = Raster::new(2, 2, &mut buf).unwrap();
        raster.fill_color(gray(230.0));
        let mut rng = ScriptedSource::new(vec![0.5]);
        explosion(&mut raster, 2.0, 0.0, 0.0, 0.0, 0.0, &mut rng).unwrap();
        assert_eq!(at(&raster, 1, 1), [24, 24, 24, 255]);
    }

    #[test]
    fn test_explode_writes_both_locations() {
        let mut buf = buffer(8, 8);
        let mut raster = Raster::new(8, 8, &mut buf).unwrap();
        raster.fill_color(gray(100.0));
        // chance, angle = 0, then one jitter per channel: 0.75 -> +ck/2
        let mut rng = ScriptedSource::new(vec![0.0, 0.0, 0.75, 0.75, 0.75]);
        explosion(&mut raster, 8.0, 0.0, 1.0, 0.5, 20.0, &mut rng).unwrap();

        assert_eq!(rng.drawn(), 5);
        assert_eq!(at(&raster, 4, 4), [110, 110, 110, 255]);
        assert_eq!(at(&raster, 6, 4), [110, 110, 110, 255]);
        assert_eq!(at(&raster, 5, 4), [100, 100, 100, 255]);
    }

    #[test]
    fn test_seeded_runs_match() {
        let run = |seed| {
            let mut buf = buffer(16, 16);
            let mut raster = Raster::new(16, 16, &mut buf).unwrap();
            raster.fill_color(gray(120.0));
            explosion(&mut raster, 16.0, 6.0, 0.4, 0.3, 30.0, &mut Rng::new(seed)).unwrap();
            raster.as_bytes().to_vec()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_threshold_must_be_probability() {
        let mut buf = buffer(2, 2);
        let mut raster = Raster::new(2, 2, &mut buf).unwrap();
        let mut rng = Rng::new(1);
        assert!(matches!(
            explosion(&mut raster, 2.0, 1.0, 1.5, 1.0, 1.0, &mut rng),
            Err(Error::InvalidFilterParameter { parameter: "thresh", .. })
        ));
    }

    #[test]
    fn test_rejects_radius_the_scan_cannot_reach() {
        let mut buf = buffer(2, 2);
        let mut raster = Raster::new(2, 2, &mut buf).unwrap();
        let mut rng = Rng::new(1);
        assert!(matches!(
            explosion(&mut raster, 2.0, 1e17, 0.5, 1.0, 1.0, &mut rng),
            Err(Error::InvalidFilterParameter { parameter: "radius", .. })
        ));
    }
}
