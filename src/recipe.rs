//! Recipes: an ordered, replayable list of filter steps
//!
//! A recipe records the canvas size, the seed for the filters' random
//! source, and every step with its parameters, so a run can be saved to
//! JSON and rendered again byte for byte.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::canvas::{Color, Raster};
use crate::error::{Error, Result};
use crate::filters::{
    Antialias, BlurMode, Border, Character, Explosion, Filter, PointRing, PrettyNoise,
    PunchImage, PunchPoint, PunchWave, Recontrast,
};
use crate::util::{RandomSource, Rng};

/// Mixed into the recipe seed so parameter picks and filter noise come from
/// different streams
const FILTER_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// One step of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum FilterStep {
    /// Paint the whole canvas
    Fill { r: f64, g: f64, b: f64, a: f64 },
    PointRing(PointRing),
    PunchImage(PunchImage),
    PunchWave(PunchWave),
    PunchPoint(PunchPoint),
    Explosion(Explosion),
    PrettyNoise(PrettyNoise),
    Character(Character),
    Recontrast(Recontrast),
    Border(Border),
    Antialias(Antialias),
}

impl Filter for FilterStep {
    fn name(&self) -> &'static str {
        match self {
            Self::Fill { .. } => "fill",
            Self::PointRing(f) => f.name(),
            Self::PunchImage(f) => f.name(),
            Self::PunchWave(f) => f.name(),
            Self::PunchPoint(f) => f.name(),
            Self::Explosion(f) => f.name(),
            Self::PrettyNoise(f) => f.name(),
            Self::Character(f) => f.name(),
            Self::Recontrast(f) => f.name(),
            Self::Border(f) => f.name(),
            Self::Antialias(f) => f.name(),
        }
    }

    fn apply(&self, raster: &mut Raster<'_>, rng: &mut dyn RandomSource) -> Result<()> {
        match self {
            Self::Fill { r, g, b, a } => {
                raster.fill_color(Color::new(*r, *g, *b, *a));
                Ok(())
            },
            Self::PointRing(f) => f.apply(raster, rng),
            Self::PunchImage(f) => f.apply(raster, rng),
            Self::PunchWave(f) => f.apply(raster, rng),
            Self::PunchPoint(f) => f.apply(raster, rng),
            Self::Explosion(f) => f.apply(raster, rng),
            Self::PrettyNoise(f) => f.apply(raster, rng),
            Self::Character(f) => f.apply(raster, rng),
            Self::Recontrast(f) => f.apply(raster, rng),
            Self::Border(f) => f.apply(raster, rng),
            Self::Antialias(f) => f.apply(raster, rng),
        }
    }
}

/// A canvas size, a seed and the steps to run on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub steps: Vec<FilterStep>,
}

impl Recipe {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: FilterStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Pick a full composition for a `width x height` canvas from `seed`
    ///
    /// A random background, a few ripples and punches, one wave, an
    /// explosion, grain, an optional character overlay, recontrast, a
    /// border and a final antialias pass.
    pub fn random(width: u32, height: u32, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut recipe = Self::new(width, height, seed);
        let (w, h) = (width as f64, height as f64);
        let lesser = w.min(h);

        recipe.push(FilterStep::Fill {
            r: rng.range_i64(0, 255) as f64,
            g: rng.range_i64(0, 255) as f64,
            b: rng.range_i64(0, 255) as f64,
            a: 255.0,
        });

        for _ in 0..rng.range_i64(1, 4) {
            recipe.push(FilterStep::PointRing(PointRing {
                sx: rng.range_f64(0.0, w),
                sy: rng.range_f64(0.0, h),
                height: rng.range_f64(lesser / 8.0, lesser / 4.0),
                layer_intensity: rng.range_f64(0.5, 3.0),
                intensity_multiplier: rng.range_f64(1.0, 4.0),
            }));
        }

        for _ in 0..rng.range_i64(2, 6) {
            let size = rng.range_f64(lesser / 8.0, lesser / 3.0);
            recipe.push(FilterStep::PunchImage(PunchImage {
                sx: rng.range_f64(0.0, w),
                sy: rng.range_f64(0.0, h),
                sw: size,
                sh: size,
                force: rng.range_f64(40.0, 160.0),
                spread: rng.range_f64(lesser / 32.0 + 1.0, lesser / 8.0 + 1.0),
            }));
        }

        let wave = rng.range_f64(lesser / 4.0, lesser / 2.0);
        recipe.push(FilterStep::PunchWave(PunchWave {
            sx: rng.range_f64(0.0, w),
            sy: rng.range_f64(0.0, h),
            sw: wave,
            sh: wave,
            force: rng.range_f64(30.0, 90.0),
            spread: rng.range_f64(lesser / 16.0 + 1.0, lesser / 6.0 + 1.0),
            period: rng.range_f64(0.05, 0.3),
        }));

        recipe.push(FilterStep::Explosion(Explosion {
            width: lesser,
            radius: rng.range_f64(lesser / 8.0, lesser / 4.0),
            thresh: rng.range_f64(0.05, 0.3),
            dk: rng.range_f64(0.05, 0.3),
            ck: rng.range_f64(10.0, 60.0),
        }));

        recipe.push(FilterStep::PrettyNoise(PrettyNoise {
            width,
            height,
            mul: rng.range_f64(8.0, 32.0),
        }));

        if rng.chance(0.5) {
            recipe.push(FilterStep::Character(Character { width, height }));
        }

        recipe.push(FilterStep::Recontrast(Recontrast {
            threshold: rng.range_f64(96.0, 160.0),
            amount: rng.range_f64(5.0, 25.0),
        }));

        recipe.push(FilterStep::Border(Border {
            width,
            height,
            bred: rng.range_i64(0, 255) as f64,
            bgreen: rng.range_i64(0, 255) as f64,
            bblue: rng.range_i64(0, 255) as f64,
            mul: rng.range_i64(2, 9) as u32,
        }));

        recipe.push(FilterStep::Antialias(Antialias {
            width,
            height,
            mode: BlurMode::Snapshot,
        }));

        debug!("recipe: {} steps from seed {seed}", recipe.steps.len());
        recipe
    }

    /// Run every step, in order, on `raster`
    pub fn apply(&self, raster: &mut Raster<'_>) -> Result<()> {
        let mut rng = Rng::new(self.seed ^ FILTER_STREAM);
        for (i, step) in self.steps.iter().enumerate() {
            info!("step {}/{}: {}", i + 1, self.steps.len(), step.name());
            step.apply(raster, &mut rng)?;
        }
        Ok(())
    }

    /// Allocate a buffer of the recipe's size and render into it
    pub fn render(&self) -> Result<Vec<u8>> {
        let len = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
                len: 0,
            })?;
        let mut buffer = vec![0u8; len];
        let mut raster = Raster::new(self.width, self.height, &mut buffer)?;
        self.apply(&mut raster)?;
        Ok(buffer)
    }

    /// Save recipe to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Recipe(e.to_string()))?;
        fs::write(path, json).map_err(|e| Error::Recipe(e.to_string()))
    }

    /// Load recipe from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::Recipe(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| Error::Recipe(e.to_string()))
    }
}
