//! How a grown bolt looks: segment radius, colour, glow and placement.
//!
//! All falloffs are driven by the iteration a segment was created in, so
//! later (lower) parts of the bolt come out thinner, darker and dimmer.

use glam::{Affine3A, Vec3};

/// Radius of a segment created at iteration 0.
pub const BASE_RADIUS: f32 = 0.1;
/// Radius lost per iteration when segment falloff is on.
pub const RADIUS_FALLOFF: f32 = 0.001;
/// Radii at or below zero are clamped to this.
pub const MIN_RADIUS: f32 = 0.0001;
/// Colour (and glow) lost per iteration per channel.
pub const COLOUR_FALLOFF: f32 = 0.003;
/// Glow lightening at brightness 1, in percent of the base colour.
pub const GLOW_PERCENT: f32 = 75.0;
/// Point the whole bolt is rotated and scaled around.
pub const PIVOT: Vec3 = Vec3::new(0.0, 25.0, 0.0);

/// User-facing appearance settings of the bolt.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    /// Multiplier on the segment radius.
    pub thickness: f32,
    pub segment_falloff: bool,
    /// 0 disables glow; higher values give a brighter glow.
    pub brightness: f32,
    pub colour: [f32; 3],
    pub brightness_falloff: bool,
    pub colour_falloff: bool,
    /// Rotation about Z, in degrees.
    pub rotation_deg: f32,
    pub scale: f32,
    pub play_animation: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            segment_falloff: true,
            brightness: 1.0,
            colour: [0.55, 0.55, 1.0],
            brightness_falloff: true,
            colour_falloff: true,
            rotation_deg: 315.0,
            scale: 1.0,
            play_animation: true,
        }
    }
}

impl Appearance {
    /// Radius of a segment created in `iteration`, thickness applied.
    pub fn radius(&self, iteration: u32) -> f32 {
        let decrease = if self.segment_falloff {
            iteration as f32 * RADIUS_FALLOFF
        } else {
            0.0
        };
        let mut radius = BASE_RADIUS - decrease;
        if radius <= 0.0 {
            radius = MIN_RADIUS;
        }
        radius * self.thickness
    }

    /// Surface colour of a segment created in `iteration`.
    ///
    /// Channels may go below zero; [`to_rgb8`] clamps when drawing.
    pub fn colour(&self, iteration: u32) -> [f32; 3] {
        let change = if self.colour_falloff {
            iteration as f32 * COLOUR_FALLOFF
        } else {
            0.0
        };
        self.colour.map(|c| c - change)
    }

    /// Glow colour of a segment created in `iteration`, or `None` when
    /// brightness is zero.
    pub fn glow(&self, iteration: u32) -> Option<[f32; 3]> {
        if self.brightness == 0.0 {
            return None;
        }
        let fraction = GLOW_PERCENT / self.brightness / 100.0;
        let change = if self.brightness_falloff {
            iteration as f32 * COLOUR_FALLOFF
        } else {
            0.0
        };
        Some(self.colour.map(|c| c - c * fraction - change))
    }

    /// Rotation about Z by `-rotation_deg` then uniform scale, both
    /// around [`PIVOT`].
    pub fn transform(&self) -> Affine3A {
        Affine3A::from_translation(PIVOT)
            * Affine3A::from_scale(Vec3::splat(self.scale))
            * Affine3A::from_rotation_z(-self.rotation_deg.to_radians())
            * Affine3A::from_translation(-PIVOT)
    }
}

/// Converts a float colour to 8-bit channels, clamping to `[0, 1]`.
pub fn to_rgb8(c: [f32; 3]) -> [u8; 3] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}
