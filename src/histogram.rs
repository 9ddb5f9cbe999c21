//! Packed-color histogram construction.

use std::collections::BTreeMap;

use crate::error::QuantizeError;

/// Pack a pixel's channels into one integer key: channel `c` occupies
/// bits `8c..8c+8`. Only the internal representation for histogram keys
/// and group membership — palette output is always unpacked bytes.
#[inline]
pub(crate) fn pack(px: &[u8]) -> u32 {
    let mut key = 0u32;
    for (c, &v) in px.iter().enumerate() {
        key |= (v as u32) << (c * 8);
    }
    key
}

/// Extract channel `c` from a packed color.
#[inline]
pub(crate) fn channel(color: u32, c: usize) -> u8 {
    (color >> (c * 8)) as u8
}

/// Distinct colors of an image with their multiplicities.
///
/// `colors` and `counts` are index-aligned; colors are unique and the counts
/// sum to the number of whole pixels in the source buffer.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub(crate) colors: Vec<u32>,
    pub(crate) counts: Vec<u32>,
    pub(crate) channel_count: usize,
}

impl Histogram {
    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Total pixel count (sum of multiplicities).
    pub fn total_pixels(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// Build a histogram from a flat byte buffer of `channel_count`-wide pixels.
///
/// Fails on an empty buffer or a `channel_count` outside 1–4 before any
/// bucketing happens. A trailing partial pixel is silently dropped.
/// Bucketing goes through a `BTreeMap`, so entries come out in ascending
/// packed-color order — nothing downstream relies on that for correctness,
/// but it pins tie-breaks during splitting to a reproducible order.
pub fn build_histogram(pixels: &[u8], channel_count: usize) -> Result<Histogram, QuantizeError> {
    if !(1..=4).contains(&channel_count) {
        return Err(QuantizeError::InvalidChannelCount(channel_count));
    }
    if pixels.is_empty() {
        return Err(QuantizeError::EmptyPixels);
    }

    let whole = pixels.len() / channel_count * channel_count;

    let mut buckets: BTreeMap<u32, u32> = BTreeMap::new();
    for px in pixels[..whole].chunks_exact(channel_count) {
        *buckets.entry(pack(px)).or_insert(0) += 1;
    }

    let mut colors = Vec::with_capacity(buckets.len());
    let mut counts = Vec::with_capacity(buckets.len());
    for (color, count) in buckets {
        colors.push(color);
        counts.push(count);
    }

    Ok(Histogram {
        colors,
        counts,
        channel_count,
    })
}
