//! sRGB transfer functions.
//!
//! Palette centroids and diffused quantization error are computed in linear
//! light; averaging gamma-encoded samples directly biases midtones dark.

/// sRGB gamma → linear (single channel, 0..255 → 0.0..1.0).
pub fn srgb_to_linear(c: u8) -> f32 {
    let x = c as f32 / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear → sRGB gamma, on the continuous byte scale (0.0..=255.0).
///
/// Returns a float rather than a rounded byte: the dither loop compares
/// fractional samples against palette entries before committing to one.
pub fn linear_to_srgb(l: f32) -> f32 {
    let s = if l < 0.003_130_8 {
        l * 12.92
    } else {
        l.powf(1.0 / 2.4) * 1.055 - 0.055
    };
    s * 255.0
}

/// Precomputed u8 → linear table. The gamma curve only has 256 inputs, so
/// hot loops (centroid accumulation, dithering) look up instead of calling
/// `powf` per channel.
pub(crate) struct SrgbLut {
    table: [f32; 256],
}

impl SrgbLut {
    pub(crate) fn new() -> Self {
        let mut table = [0.0f32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = srgb_to_linear(i as u8);
        }
        Self { table }
    }

    #[inline]
    pub(crate) fn linear(&self, c: u8) -> f32 {
        self.table[c as usize]
    }
}
