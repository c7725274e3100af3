//! dynartic: procedurally generated abstract raster art
//!
//! A [`Raster`] wraps a caller-owned RGBA buffer; the [`filters`] mutate it
//! in place; a [`Recipe`] sequences them; [`output`] hands the bytes to the
//! PNG encoder.
//!
//! ```no_run
//! use dynartic::{Color, Raster};
//! use dynartic::filters::{antialias, punch_image, BlurMode};
//!
//! # fn main() -> dynartic::Result<()> {
//! let (w, h) = (320u32, 240u32);
//! let mut buffer = vec![0u8; (w * h * 4) as usize];
//! let mut raster = Raster::new(w, h, &mut buffer)?;
//! raster.fill_color(Color::new(200.0, 120.0, 60.0, 255.0));
//! punch_image(&mut raster, 160.0, 120.0, 80.0, 80.0, 120.0, 12.0)?;
//! antialias(&mut raster, w, h, BlurMode::Snapshot)?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod error;
pub mod filters;
pub mod output;
pub mod recipe;
pub mod util;

pub use crate::canvas::{Channel, Color, Raster};
pub use crate::error::{Error, Result};
pub use crate::recipe::{FilterStep, Recipe};
pub use crate::util::{RandomSource, Rng};
