//! Quantized palette: nearest-color lookup and in-place bulk remap.

use crate::error::QuantizeError;

/// An ordered set of output colors, immutable once built.
///
/// Entries are stored as fixed `[u8; 4]` slots; only the first
/// `channel_count` bytes of each are meaningful. Entry order is group
/// emission order and carries no semantics.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<[u8; 4]>,
    channel_count: usize,
}

impl Palette {
    pub(crate) fn new(entries: Vec<[u8; 4]>, channel_count: usize) -> Result<Self, QuantizeError> {
        if entries.is_empty() {
            return Err(QuantizeError::EmptyPalette);
        }
        Ok(Self {
            entries,
            channel_count,
        })
    }

    /// Number of palette entries. Always ≥ 1.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Channels per entry (1–4).
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// The palette color at `index`, `channel_count` bytes.
    pub fn entry(&self, index: usize) -> &[u8] {
        &self.entries[index][..self.channel_count]
    }

    /// Iterate over palette colors in order.
    pub fn entries(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.entries.iter().map(move |e| &e[..self.channel_count])
    }

    /// Index of the nearest entry to `sample` by squared Euclidean distance
    /// in byte space. The first of equally-near entries wins, in palette
    /// order. `sample` must hold at least `channel_count` bytes.
    pub fn nearest(&self, sample: &[u8]) -> usize {
        let mut best = 0;
        let mut best_d = self.distance_sq(sample, 0);
        for i in 1..self.entries.len() {
            let d = self.distance_sq(sample, i);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }

    fn distance_sq(&self, sample: &[u8], index: usize) -> u32 {
        let entry = &self.entries[index];
        let mut d = 0u32;
        for c in 0..self.channel_count {
            let diff = sample[c] as i32 - entry[c] as i32;
            d += (diff * diff) as u32;
        }
        d
    }

    /// Nearest lookup against a fractional sRGB-scale sample. The dither
    /// loop probes with error-adjusted values that do not land on byte
    /// boundaries (and may exceed 255).
    pub(crate) fn nearest_f32(&self, sample: &[f32]) -> usize {
        let mut best = 0;
        let mut best_d = self.distance_sq_f32(sample, 0);
        for i in 1..self.entries.len() {
            let d = self.distance_sq_f32(sample, i);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }

    fn distance_sq_f32(&self, sample: &[f32], index: usize) -> f32 {
        let entry = &self.entries[index];
        let mut d = 0.0f32;
        for c in 0..self.channel_count {
            let diff = sample[c] - entry[c] as f32;
            d += diff * diff;
        }
        d
    }

    /// Overwrite every whole pixel in `data` with its nearest palette color.
    ///
    /// Same trimming rule as the histogram: a trailing partial pixel is left
    /// untouched. Stateless across pixels and idempotent — every written
    /// pixel is already its own nearest entry.
    pub fn process(&self, data: &mut [u8]) {
        let cc = self.channel_count;
        let whole = data.len() / cc * cc;
        for px in data[..whole].chunks_exact_mut(cc) {
            let entry = self.entry(self.nearest(px));
            px.copy_from_slice(entry);
        }
    }

    /// Remap `data` in place with Floyd–Steinberg error diffusion, treating
    /// it as rows of `width` pixels. Uses the gamma-correct reference preset;
    /// see [`crate::dither::dither_in_place`] to pick another.
    pub fn dither_process(&self, data: &mut [u8], width: usize) {
        crate::dither::dither_in_place(self, data, width, crate::dither::DitherPreset::default());
    }
}
