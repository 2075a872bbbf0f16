use crate::error::{ConfigError, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Upper bound of the attractor volume on the Y axis.
pub const ATTRACTOR_CEILING: f32 = 40.0;

/// The root sits this far above `origin_height`, on top of the attractor volume.
pub const ORIGIN_LIFT: f32 = 40.0;

/// Parameters of a single bolt growth run.
///
/// All fields are public so callers can start from [`GrowthConfig::default`]
/// and override what they need; [`GrowthConfig::validate`] is called by the
/// engine before anything is allocated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Number of attractors scattered in the volume. Zero is a valid, empty run.
    pub attractor_count: usize,
    /// Half extent of the attractor volume on X and Z.
    pub area_extent: f32,
    /// Height offset of the root segment.
    pub origin_height: f32,
    /// Capture radius: attractors closer than this to any segment are reached.
    pub min_dist: f32,
    /// Influence radius: attractors farther than this from a segment ignore it.
    pub max_dist: f32,
    /// Distance between a segment and the child it emits.
    pub segment_length: f32,
    /// Per-axis half range of the random jitter added to each growth direction.
    pub jitter_range: f32,
    /// Seed for reproducible runs; `None` draws a fresh one.
    pub seed: Option<u64>,
    /// Hard bound on the number of growth iterations.
    pub max_iterations: u32,
    /// Fold each segment's own heading into its averaged pull.
    pub heading_bias: bool,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            attractor_count: 40,
            area_extent: 7.0,
            origin_height: 10.0,
            min_dist: 5.0,
            max_dist: 100.0,
            segment_length: 1.0,
            jitter_range: 0.5,
            seed: None,
            max_iterations: 10_000,
            heading_bias: false,
        }
    }
}

impl GrowthConfig {
    /// Checks that the configuration describes a growable bolt.
    ///
    /// ### Returns
    /// - `Ok(())` if every parameter is in range.
    /// - The first [`ConfigError`] found otherwise.
    pub fn validate(&self) -> Result<()> {
        // Written as negated comparisons so NaN is rejected too. Sampling
        // spans twice the extent, which must stay finite as well.
        if !(self.area_extent > 0.0 && (2.0 * self.area_extent).is_finite()) {
            return Err(ConfigError::AreaExtent(self.area_extent));
        }
        if !self.origin_height.is_finite() {
            return Err(ConfigError::OriginHeight(self.origin_height));
        }
        if !(self.min_dist > 0.0) {
            return Err(ConfigError::CaptureRadius(self.min_dist));
        }
        if !(self.max_dist > self.min_dist) {
            return Err(ConfigError::InfluenceRadius {
                min_dist: self.min_dist,
                max_dist: self.max_dist,
            });
        }
        if !(self.segment_length > 0.0 && self.segment_length.is_finite()) {
            return Err(ConfigError::SegmentLength(self.segment_length));
        }
        if !(self.jitter_range >= 0.0 && (2.0 * self.jitter_range).is_finite()) {
            return Err(ConfigError::JitterRange(self.jitter_range));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::IterationCap);
        }
        Ok(())
    }

    /// Position of the root segment: above the attractor volume, on the Y axis.
    pub fn origin(&self) -> Vec3 {
        Vec3::new(0.0, self.origin_height + ORIGIN_LIFT, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GrowthConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_attractors_is_not_an_error() {
        let cfg = GrowthConfig {
            attractor_count: 0,
            ..GrowthConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_area() {
        let cfg = GrowthConfig {
            area_extent: 0.0,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::AreaExtent(0.0)));
    }

    #[test]
    fn rejects_radii_out_of_order() {
        let cfg = GrowthConfig {
            min_dist: 10.0,
            max_dist: 10.0,
            ..GrowthConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InfluenceRadius {
                min_dist: 10.0,
                max_dist: 10.0
            })
        );

        let cfg = GrowthConfig {
            min_dist: -1.0,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::CaptureRadius(-1.0)));
    }

    #[test]
    fn rejects_nan_capture_radius() {
        let cfg = GrowthConfig {
            min_dist: f32::NAN,
            ..GrowthConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::CaptureRadius(_))));
    }

    #[test]
    fn rejects_infinite_area_and_length() {
        let cfg = GrowthConfig {
            area_extent: f32::INFINITY,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::AreaExtent(f32::INFINITY)));

        let cfg = GrowthConfig {
            segment_length: f32::INFINITY,
            ..GrowthConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SegmentLength(f32::INFINITY))
        );
    }

    #[test]
    fn rejects_non_finite_origin_height() {
        let cfg = GrowthConfig {
            origin_height: f32::NEG_INFINITY,
            ..GrowthConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::OriginHeight(f32::NEG_INFINITY))
        );

        let cfg = GrowthConfig {
            origin_height: f32::NAN,
            ..GrowthConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::OriginHeight(_))));
    }

    #[test]
    fn rejects_area_whose_span_overflows() {
        let cfg = GrowthConfig {
            area_extent: f32::MAX,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::AreaExtent(f32::MAX)));
        assert!(crate::run_growth(cfg).is_err());
    }

    #[test]
    fn rejects_jitter_whose_span_overflows() {
        let cfg = GrowthConfig {
            jitter_range: f32::MAX,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::JitterRange(f32::MAX)));
        assert!(crate::run_growth(cfg).is_err());
    }

    #[test]
    fn accepts_huge_but_samplable_area() {
        let cfg = GrowthConfig {
            area_extent: f32::MAX / 4.0,
            attractor_count: 3,
            max_iterations: 2,
            seed: Some(1),
            ..GrowthConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert!(crate::run_growth(cfg).is_ok());
    }

    #[test]
    fn rejects_bad_length_jitter_and_cap() {
        let cfg = GrowthConfig {
            segment_length: 0.0,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::SegmentLength(0.0)));

        let cfg = GrowthConfig {
            jitter_range: -0.1,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::JitterRange(-0.1)));

        let cfg = GrowthConfig {
            max_iterations: 0,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::IterationCap));
    }

    #[test]
    fn origin_sits_above_the_volume() {
        let cfg = GrowthConfig {
            origin_height: 0.0,
            ..GrowthConfig::default()
        };
        assert_eq!(cfg.origin(), Vec3::new(0.0, 40.0, 0.0));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults_when_deserialized() {
        let cfg: GrowthConfig =
            serde_json::from_str(r#"{ "attractor_count": 12, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.attractor_count, 12);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.max_dist, GrowthConfig::default().max_dist);
    }
}
