//! 3x3 box blur used as a cheap antialias pass

use log::debug;
use serde::{Deserialize, Serialize};

use super::Filter;
use crate::canvas::{Color, Raster};
use crate::error::Result;
use crate::util::RandomSource;

/// Where antialias reads neighbours from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// Read from a copy taken before the pass; result is order independent
    #[default]
    Snapshot,
    /// Read the live raster in row-major order, so each pixel sees the
    /// already-blurred pixels above and to its left
    InPlace,
}

/// Average of the in-bounds pixels of the 3x3 block around `(x, y)`
fn block_average(
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    read: impl Fn(f64, f64) -> Color,
) -> Color {
    let mut sum = Color::TRANSPARENT;
    let mut count = 0u32;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }
            let c = read(nx as f64, ny as f64);
            sum = Color::new(sum.r + c.r, sum.g + c.g, sum.b + c.b, sum.a + c.a);
            count += 1;
        }
    }
    let n = count.max(1) as f64;
    Color::new(sum.r / n, sum.g / n, sum.b / n, sum.a / n)
}

/// Box-blur the `width x height` region at the origin
///
/// All four channels are averaged over however many of the 9 candidates lie
/// on the canvas: 9 inside, 6 on an edge, 4 in a corner.
pub fn antialias(raster: &mut Raster<'_>, width: u32, height: u32, mode: BlurMode) -> Result<()> {
    debug!("antialias: region={width}x{height} mode={mode:?}");
    let (rw, rh) = (raster.width() as i64, raster.height() as i64);

    match mode {
        BlurMode::Snapshot => {
            let source = raster.snapshot();
            for y in 0..height as i64 {
                for x in 0..width as i64 {
                    let avg = block_average(x, y, rw, rh, |sx, sy| source.get_color(sx, sy));
                    raster.set_color(x as f64, y as f64, avg);
                }
            }
        },
        BlurMode::InPlace => {
            for y in 0..height as i64 {
                for x in 0..width as i64 {
                    let avg = block_average(x, y, rw, rh, |sx, sy| raster.get_color(sx, sy));
                    raster.set_color(x as f64, y as f64, avg);
                }
            }
        },
    }
    Ok(())
}

/// Parameters for [`antialias`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Antialias {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub mode: BlurMode,
}

impl Filter for Antialias {
    fn name(&self) -> &'static str {
        "antialias"
    }

    fn apply(&self, raster: &mut Raster<'_>, _rng: &mut dyn RandomSource) -> Result<()> {
        antialias(raster, self.width, self.height, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{at, buffer, gray, pixels};

    fn lit_center(buf: &mut [u8]) -> Raster<'_> {
        let mut raster = Raster::new(3, 3, buf).unwrap();
        raster.set_color(1.0, 1.0, Color::new(255.0, 255.0, 255.0, 255.0));
        raster
    }

    #[test]
    fn test_snapshot_blur_of_single_lit_pixel() {
        let mut buf = buffer(3, 3);
        let mut raster = lit_center(&mut buf);
        antialias(&mut raster, 3, 3, BlurMode::Snapshot).unwrap();

        // 255/9, 255/4, 255/6 floored
        assert_eq!(at(&raster, 1, 1), [28; 4]);
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(at(&raster, x, y), [63; 4]);
        }
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert_eq!(at(&raster, x, y), [42; 4]);
        }
    }

    #[test]
    fn test_in_place_blur_is_order_dependent() {
        let mut buf = buffer(3, 3);
        let mut raster = lit_center(&mut buf);
        antialias(&mut raster, 3, 3, BlurMode::InPlace).unwrap();

        // First pixel sees the untouched center
        assert_eq!(at(&raster, 0, 0), [63; 4]);
        // (63 + 255) / 6: its left neighbour was already blurred
        assert_eq!(at(&raster, 1, 0), [53; 4]);
    }

    #[test]
    fn test_flat_image_is_unchanged() {
        let mut buf = buffer(5, 4);
        let mut raster = Raster::new(5, 4, &mut buf).unwrap();
        raster.fill_color(gray(90.0));
        let before = pixels(&raster);
        antialias(&mut raster, 5, 4, BlurMode::Snapshot).unwrap();
        assert_eq!(pixels(&raster), before);
    }

    #[test]
    fn test_region_limits_writes_not_reads() {
        let mut buf = buffer(3, 1);
        let mut raster = Raster::new(3, 1, &mut buf).unwrap();
        raster.set_color(1.0, 0.0, Color::new(90.0, 90.0, 90.0, 90.0));
        antialias(&mut raster, 1, 1, BlurMode::Snapshot).unwrap();
        // (0 + 90) / 2
        assert_eq!(at(&raster, 0, 0), [45; 4]);
        assert_eq!(at(&raster, 1, 0), [90; 4]);
    }
}
