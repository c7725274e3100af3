use thiserror::Error;

/// Failures surfaced by the canvas and filter library
///
/// Out-of-bounds coordinates and channel overflow are not errors; see
/// [`crate::canvas::Raster::get_color`] and [`crate::canvas::Channel`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid raster dimensions {width}x{height} for a buffer of {len} bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("{filter}: parameter `{parameter}` = {value} would produce non-finite colors")]
    InvalidFilterParameter {
        filter: &'static str,
        parameter: &'static str,
        value: f64,
    },

    #[error("recipe: {0}")]
    Recipe(String),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
