//! Error types for bolt configuration.

use thiserror::Error;

/// Result type for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reasons a [`crate::config::GrowthConfig`] is rejected before a run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The attractor volume has no extent.
    #[error("area extent must be positive and finite, got {0}")]
    AreaExtent(f32),

    /// The capture radius is zero, negative or not a number.
    #[error("capture radius (min_dist) must be positive, got {0}")]
    CaptureRadius(f32),

    /// The influence radius does not enclose the capture radius.
    #[error("influence radius (max_dist) {max_dist} must exceed capture radius {min_dist}")]
    InfluenceRadius { min_dist: f32, max_dist: f32 },

    /// Children would be emitted on top of their parent.
    #[error("segment length must be positive and finite, got {0}")]
    SegmentLength(f32),

    /// The jitter range cannot produce a symmetric interval.
    #[error("jitter range must be non-negative and finite, got {0}")]
    JitterRange(f32),

    /// A run with no iterations would never grow anything.
    #[error("iteration cap must be at least 1")]
    IterationCap,

    /// The origin height cannot place the root segment.
    #[error("origin height must be finite, got {0}")]
    OriginHeight(f32),
}
