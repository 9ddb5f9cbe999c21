#![forbid(unsafe_code)]

//! Median-cut palette quantization for flat 8-bit pixel buffers.
//!
//! Reduces an image's color set to a fixed-size palette and remaps pixels
//! onto it, optionally with gamma-correct Floyd–Steinberg dithering. Input
//! is a packed-channel byte buffer (1–4 channels per pixel); decoding and
//! encoding image files is the caller's business.
//!
//! ```
//! use palquant::QuantizeConfig;
//!
//! // 2×2 RGBA image: two black pixels, two white.
//! let mut data = vec![
//!     0u8, 0, 0, 255, 0, 0, 0, 255,
//!     255, 255, 255, 255, 255, 255, 255, 255,
//! ];
//! let palette = palquant::quantize(&data, 2, 4, &QuantizeConfig::default()).unwrap();
//! assert_eq!(palette.len(), 2);
//! palette.dither_process(&mut data, 2);
//! ```

pub mod colorspace;
pub mod dither;
pub mod error;
pub mod histogram;
pub mod median_cut;
pub mod palette;

pub use dither::DitherPreset;
pub use error::QuantizeError;
pub use median_cut::{AverageSpace, SplitStrategy};
pub use palette::Palette;

/// Configuration for palette construction.
#[derive(Debug, Clone, Default)]
pub struct QuantizeConfig {
    /// How groups measure their extent and cut themselves in two.
    pub split_strategy: SplitStrategy,
    /// Color space in which group centroids are averaged.
    pub average_space: AverageSpace,
}

impl QuantizeConfig {
    /// Reference configuration: farthest-pair splitting with linear-light
    /// averaging.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn split_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.split_strategy = strategy;
        self
    }

    pub fn average_space(mut self, space: AverageSpace) -> Self {
        self.average_space = space;
        self
    }

    /// Compatibility configuration: axis-aligned bounding-box cuts with
    /// raw-byte averaging.
    pub fn compat() -> Self {
        Self {
            split_strategy: SplitStrategy::BoundingBox,
            average_space: AverageSpace::Raw,
        }
    }
}

/// Build a palette of up to `color_count` colors from a flat pixel buffer.
///
/// `pixels` is a packed-channel byte sequence; a trailing partial pixel is
/// ignored. The result has between 1 and `color_count` entries — fewer than
/// requested only when the image lacks enough distinct exploitable colors.
///
/// Validation happens before any work: a bad `channel_count`, an empty
/// buffer, or `color_count == 0` fails without producing a partial result.
pub fn quantize(
    pixels: &[u8],
    color_count: usize,
    channel_count: usize,
    config: &QuantizeConfig,
) -> Result<Palette, QuantizeError> {
    let hist = histogram::build_histogram(pixels, channel_count)?;
    let entries = median_cut::median_cut(
        hist,
        color_count,
        config.split_strategy,
        config.average_space,
    )?;
    Palette::new(entries, channel_count)
}

/// Quantize an RGB image given as typed pixels.
pub fn quantize_rgb(
    pixels: &[rgb::RGB<u8>],
    color_count: usize,
    config: &QuantizeConfig,
) -> Result<Palette, QuantizeError> {
    use rgb::ComponentSlice;
    quantize(pixels.as_slice(), color_count, 3, config)
}

/// Quantize an RGBA image given as typed pixels. Alpha is a fourth
/// quantizable channel, not a transparency flag.
pub fn quantize_rgba(
    pixels: &[rgb::RGBA<u8>],
    color_count: usize,
    config: &QuantizeConfig,
) -> Result<Palette, QuantizeError> {
    use rgb::ComponentSlice;
    quantize(pixels.as_slice(), color_count, 4, config)
}
