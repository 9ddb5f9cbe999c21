use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("empty pixel buffer")]
    EmptyPixels,

    #[error("channel count must be between 1 and 4, got {0}")]
    InvalidChannelCount(usize),

    /// A color group's member sequences went out of sync. This is an internal
    /// invariant of the splitting loop, not something callers can trigger.
    #[error("color group has {colors} colors but {counts} counts")]
    GroupShape { colors: usize, counts: usize },

    #[error("palette would be empty")]
    EmptyPalette,
}
