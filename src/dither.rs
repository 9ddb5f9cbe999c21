//! Floyd–Steinberg error diffusion over a flat pixel buffer.
//!
//! Two row-sized accumulators carry diffused error: one for the row being
//! written, one for the row below. After each row they swap and the fresh
//! "next" row is zeroed.

use crate::colorspace::{linear_to_srgb, SrgbLut};
use crate::palette::Palette;

/// Residual clamp for the gamma-correct preset, in linear-scale units.
const LINEAR_ERROR_LIMIT: f32 = 100.0;

/// Residual bounds for the byte-space preset: a correction may undershoot a
/// full black swing or overshoot a full white one, but no further.
const RAW_ERROR_MIN: f32 = -256.0;
const RAW_ERROR_MAX: f32 = 511.0;

/// Numeric behavior of the diffusion loop.
///
/// The two presets differ in working space, residual clamp, and kernel
/// weights; they are distinct policies, not tunings of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherPreset {
    /// Error accumulated in linear light with a ±100 residual clamp and a
    /// 7/16, 5/16, 1/16, 3/16 kernel (right, below, below-right, below-left).
    /// Gamma-correct: tonal detail survives averaging through the palette.
    Linear,
    /// Error accumulated on the raw byte scale with a [−256, 511] residual
    /// clamp and the classic 7/16, 5/16, 1/16, 1/16 kernel. Compatibility
    /// preset.
    Raw,
}

impl Default for DitherPreset {
    fn default() -> Self {
        Self::Linear
    }
}

impl DitherPreset {
    /// Kernel weights: right, below, below-right, below-left.
    fn weights(self) -> [f32; 4] {
        match self {
            Self::Linear => [7.0 / 16.0, 5.0 / 16.0, 1.0 / 16.0, 3.0 / 16.0],
            Self::Raw => [7.0 / 16.0, 5.0 / 16.0, 1.0 / 16.0, 1.0 / 16.0],
        }
    }

    fn clamp_residual(self, err: f32) -> f32 {
        match self {
            Self::Linear => err.clamp(-LINEAR_ERROR_LIMIT, LINEAR_ERROR_LIMIT),
            Self::Raw => err.clamp(RAW_ERROR_MIN, RAW_ERROR_MAX),
        }
    }
}

/// Remap `data` in place with error diffusion, treating it as rows of
/// `width` pixels of `palette.channel_count()` bytes each.
///
/// `width` is trusted: it only sets the row stride, and a buffer that is not
/// a whole number of rows is still processed linearly (the final short row
/// just ends early). A trailing partial pixel is ignored. Left/right
/// neighbor existence changes per column and the bottom row exists or not
/// per row, so both are checked per pixel.
pub fn dither_in_place(palette: &Palette, data: &mut [u8], width: usize, preset: DitherPreset) {
    let cc = palette.channel_count();
    let row_bytes = width * cc;
    if row_bytes == 0 {
        return;
    }
    let whole = data.len() / cc * cc;

    let lut = SrgbLut::new();
    let [w_right, w_below, w_below_right, w_below_left] = preset.weights();

    // Error accumulators; `current` additionally holds the adjusted samples
    // (source value plus accumulated error) for the row in flight.
    let mut current = vec![0.0f32; row_bytes];
    let mut next = vec![0.0f32; row_bytes];
    let mut probe = [0.0f32; 4];

    let mut start = 0;
    while start < whole {
        let row_len = row_bytes.min(whole - start);
        let bottom_exists = start + row_bytes < whole;

        for (x, err) in current[..row_len].iter_mut().enumerate() {
            let v = data[start + x];
            *err += match preset {
                DitherPreset::Linear => lut.linear(v),
                DitherPreset::Raw => v as f32,
            };
        }

        let mut x = 0;
        while x < row_len {
            // The probe sample lives on the sRGB byte scale, where the
            // nearest scan runs; negative excursions are floored at 0.
            for c in 0..cc {
                probe[c] = match preset {
                    DitherPreset::Linear => linear_to_srgb(current[x + c]).max(0.0),
                    DitherPreset::Raw => current[x + c],
                };
            }
            let chosen = palette.entry(palette.nearest_f32(&probe[..cc]));

            let right_exists = x + cc < row_len;
            let left_exists = x > 0;

            for c in 0..cc {
                let new = chosen[c];
                data[start + x + c] = new;

                let err = preset.clamp_residual(match preset {
                    DitherPreset::Linear => current[x + c] - lut.linear(new),
                    DitherPreset::Raw => current[x + c] - new as f32,
                });

                if right_exists {
                    current[x + c + cc] += err * w_right;
                }
                if bottom_exists {
                    next[x + c] += err * w_below;
                    if right_exists {
                        next[x + c + cc] += err * w_below_right;
                    }
                    if left_exists {
                        next[x + c - cc] += err * w_below_left;
                    }
                }
            }
            x += cc;
        }

        std::mem::swap(&mut current, &mut next);
        next.fill(0.0);
        start += row_len;
    }
}
