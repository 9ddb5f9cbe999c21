//! Median-cut style palette construction.
//!
//! The histogram becomes one [`ColorGroup`]; the group with the largest
//! split metric is greedily split in two until the palette size target is
//! reached or no group can be usefully split.

use crate::colorspace::{linear_to_srgb, SrgbLut};
use crate::error::QuantizeError;
use crate::histogram::{channel, Histogram};

/// How a group measures its extent and cuts itself in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Axis-aligned cut at the midpoint of the widest channel range.
    BoundingBox,
    /// Hyperplane cut orthogonal to an approximate diameter of the group.
    /// Two greedy passes find a far pair without exact diameter computation.
    FarthestPair,
}

impl Default for SplitStrategy {
    fn default() -> Self {
        Self::FarthestPair
    }
}

/// Color space in which group centroids are averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageSpace {
    /// Weighted mean of the gamma-encoded bytes. Kept for compatibility;
    /// biases midtones dark.
    Raw,
    /// Weighted mean in linear light, converted back to sRGB.
    Linear,
}

impl Default for AverageSpace {
    fn default() -> Self {
        Self::Linear
    }
}

/// Split geometry cached at group construction, paired with the strategy
/// that produced it.
#[derive(Debug, Clone)]
enum SplitGeometry {
    Axis { axis: usize, min: u8 },
    Pair { point1: u32, point2: u32 },
}

/// Squared Euclidean distance between two packed colors.
fn distance_sq(a: u32, b: u32, channel_count: usize) -> u32 {
    let mut d = 0u32;
    for c in 0..channel_count {
        let diff = channel(a, c) as i32 - channel(b, c) as i32;
        d += (diff * diff) as u32;
    }
    d
}

/// The member color farthest (squared distance) from `origin`.
/// The first of equally-far members wins, in member order.
fn farthest_from(origin: u32, colors: &[u32], channel_count: usize) -> u32 {
    let mut best = colors[0];
    let mut best_d = distance_sq(origin, best, channel_count);
    for &color in &colors[1..] {
        let d = distance_sq(origin, color, channel_count);
        if d > best_d {
            best_d = d;
            best = color;
        }
    }
    best
}

/// A disjoint partition of the histogram: distinct packed colors with their
/// multiplicities. Immutable after construction; splitting consumes the
/// group and moves every member into exactly one of two children.
#[derive(Debug, Clone)]
pub(crate) struct ColorGroup {
    colors: Vec<u32>,
    counts: Vec<u32>,
    channel_count: usize,
    /// Scalar ≥ 0. Zero means the group cannot be usefully split (all
    /// members coincide along the metric dimension).
    metric: u32,
    geometry: SplitGeometry,
}

impl ColorGroup {
    fn new(
        colors: Vec<u32>,
        counts: Vec<u32>,
        channel_count: usize,
        strategy: SplitStrategy,
    ) -> Result<Self, QuantizeError> {
        if colors.is_empty() || colors.len() != counts.len() {
            return Err(QuantizeError::GroupShape {
                colors: colors.len(),
                counts: counts.len(),
            });
        }

        let (metric, geometry) = match strategy {
            SplitStrategy::BoundingBox => {
                let mut mins = [u8::MAX; 4];
                let mut maxs = [u8::MIN; 4];
                for &color in &colors {
                    for c in 0..channel_count {
                        let v = channel(color, c);
                        mins[c] = mins[c].min(v);
                        maxs[c] = maxs[c].max(v);
                    }
                }
                // Widest channel wins; strict > keeps the lowest index on ties.
                let mut axis = 0;
                let mut spread = maxs[0] - mins[0];
                for c in 1..channel_count {
                    let len = maxs[c] - mins[c];
                    if len > spread {
                        axis = c;
                        spread = len;
                    }
                }
                (
                    spread as u32,
                    SplitGeometry::Axis {
                        axis,
                        min: mins[axis],
                    },
                )
            }
            SplitStrategy::FarthestPair => {
                let seed = colors[0];
                let point1 = farthest_from(seed, &colors, channel_count);
                let point2 = farthest_from(point1, &colors, channel_count);
                (
                    distance_sq(point1, point2, channel_count),
                    SplitGeometry::Pair { point1, point2 },
                )
            }
        };

        Ok(Self {
            colors,
            counts,
            channel_count,
            metric,
            geometry,
        })
    }

    pub(crate) fn from_histogram(
        hist: Histogram,
        strategy: SplitStrategy,
    ) -> Result<Self, QuantizeError> {
        Self::new(hist.colors, hist.counts, hist.channel_count, strategy)
    }

    pub(crate) fn metric(&self) -> u32 {
        self.metric
    }

    #[cfg(test)]
    pub(crate) fn total_count(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Cut the group in two along its cached geometry. Every member lands in
    /// exactly one child. With a nonzero metric both children are non-empty:
    /// the axis cut strictly separates the channel min from the channel max,
    /// and the hyperplane cut strictly separates the far pair.
    pub(crate) fn split(
        self,
        strategy: SplitStrategy,
    ) -> Result<(ColorGroup, ColorGroup), QuantizeError> {
        let cc = self.channel_count;
        let n = self.colors.len();
        let mut colors1 = Vec::with_capacity(n / 2 + 1);
        let mut counts1 = Vec::with_capacity(n / 2 + 1);
        let mut colors2 = Vec::with_capacity(n / 2 + 1);
        let mut counts2 = Vec::with_capacity(n / 2 + 1);

        match self.geometry {
            SplitGeometry::Axis { axis, min } => {
                let threshold = min as f32 + self.metric as f32 / 2.0;
                for (&color, &count) in self.colors.iter().zip(&self.counts) {
                    if (channel(color, axis) as f32) < threshold {
                        colors1.push(color);
                        counts1.push(count);
                    } else {
                        colors2.push(color);
                        counts2.push(count);
                    }
                }
            }
            SplitGeometry::Pair { point1, point2 } => {
                let mut center = [0.0f32; 4];
                let mut vector = [0.0f32; 4];
                for c in 0..cc {
                    let p1 = channel(point1, c) as f32;
                    let p2 = channel(point2, c) as f32;
                    center[c] = (p1 + p2) / 2.0;
                    vector[c] = (p2 - p1) / 2.0;
                }
                for (&color, &count) in self.colors.iter().zip(&self.counts) {
                    let mut dot = 0.0f32;
                    for c in 0..cc {
                        dot += (channel(color, c) as f32 - center[c]) * vector[c];
                    }
                    if dot > 0.0 {
                        colors1.push(color);
                        counts1.push(count);
                    } else {
                        colors2.push(color);
                        counts2.push(count);
                    }
                }
            }
        }

        Ok((
            ColorGroup::new(colors1, counts1, cc, strategy)?,
            ColorGroup::new(colors2, counts2, cc, strategy)?,
        ))
    }

    /// Count-weighted centroid of the group, one byte per channel.
    pub(crate) fn average(&self, space: AverageSpace, lut: &SrgbLut) -> [u8; 4] {
        let mut sums = [0.0f64; 4];
        let mut total = 0u64;
        for (&color, &count) in self.colors.iter().zip(&self.counts) {
            total += count as u64;
            for c in 0..self.channel_count {
                let v = channel(color, c);
                sums[c] += match space {
                    AverageSpace::Raw => v as f64 * count as f64,
                    AverageSpace::Linear => lut.linear(v) as f64 * count as f64,
                };
            }
        }

        let mut out = [0u8; 4];
        for c in 0..self.channel_count {
            let mean = sums[c] / total as f64;
            out[c] = match space {
                AverageSpace::Raw => mean.min(255.0) as u8,
                AverageSpace::Linear => {
                    linear_to_srgb(mean as f32).round().clamp(0.0, 255.0) as u8
                }
            };
        }
        out
    }
}

/// Greedily split the histogram into up to `color_count` groups and emit one
/// centroid per group.
///
/// Each iteration scans live groups in ascending index order and takes the
/// first group with the strictly largest metric; a maximum of zero ends the
/// loop early (every remaining group is a single distinct color or a set of
/// metric-coincident ones). Removal is swap-with-last — group order carries
/// no meaning.
pub(crate) fn median_cut(
    hist: Histogram,
    color_count: usize,
    strategy: SplitStrategy,
    space: AverageSpace,
) -> Result<Vec<[u8; 4]>, QuantizeError> {
    let mut groups = vec![ColorGroup::from_histogram(hist, strategy)?];

    while groups.len() < color_count {
        let mut best = 0;
        for i in 1..groups.len() {
            if groups[i].metric() > groups[best].metric() {
                best = i;
            }
        }
        if groups[best].metric() == 0 {
            break;
        }
        let group = groups.swap_remove(best);
        let (first, second) = group.split(strategy)?;
        groups.push(first);
        groups.push(second);
    }

    let lut = SrgbLut::new();
    // `take` only bites when color_count == 0 (the loop never overshoots);
    // the resulting empty set is rejected at palette construction.
    Ok(groups
        .iter()
        .take(color_count)
        .map(|g| g.average(space, &lut))
        .collect())
}
