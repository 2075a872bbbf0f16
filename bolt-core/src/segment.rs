use crate::{types::SegmentId, vector};
use glam::Vec3;

/// One node of the bolt: a position, the heading it was emitted with and
/// the pulls collected during the current iteration.
///
/// Pull state (`pull`, `pull_count`) and the working `direction` are
/// scratch values. They are filled by the attraction phase and consumed,
/// then reset, by the emission phase.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// World-space position of the segment's end point.
    pub pos: Vec3,
    /// Working direction, overwritten while emitting and reset afterwards.
    pub direction: Vec3,
    /// Direction the segment was created with.
    pub original_direction: Vec3,
    pub parent: Option<SegmentId>,
    pub children: Vec<SegmentId>,
    /// Sum of unit pulls toward the attractors assigned this iteration.
    pub pull: Vec3,
    /// Number of pulls summed into `pull`.
    pub pull_count: u32,
    /// Iteration in which the segment was created; the root is 0.
    pub iteration: u32,
    /// Iteration in which the segment emitted its first child.
    pub first_emission: Option<u32>,
}

impl Segment {
    pub fn new_root(pos: Vec3, direction: Vec3) -> Self {
        Self::new(pos, direction, None, 0)
    }

    pub fn new_child(pos: Vec3, direction: Vec3, parent: SegmentId, iteration: u32) -> Self {
        Self::new(pos, direction, Some(parent), iteration)
    }

    fn new(pos: Vec3, direction: Vec3, parent: Option<SegmentId>, iteration: u32) -> Self {
        Self {
            pos,
            direction,
            original_direction: direction,
            parent,
            children: Vec::with_capacity(2),
            pull: Vec3::ZERO,
            pull_count: 0,
            iteration,
            first_emission: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the segment has emitted at least one child.
    pub fn is_emitted(&self) -> bool {
        self.first_emission.is_some()
    }

    /// Adds one pull toward an attractor.
    #[inline]
    pub fn add_pull(&mut self, dir: Vec3) {
        self.pull += dir;
        self.pull_count += 1;
    }

    #[inline]
    pub fn is_pulled(&self) -> bool {
        self.pull_count > 0
    }

    /// Mean of the pulls collected this iteration.
    ///
    /// With `heading_bias` the segment's original direction is folded into
    /// the sum before dividing, which keeps branches closer to their heading.
    pub fn averaged_pull(&self, heading_bias: bool) -> Vec3 {
        let sum = if heading_bias {
            self.pull + self.original_direction
        } else {
            self.pull
        };
        vector::average(sum, self.pull_count)
    }

    /// Position of a child emitted along the working direction.
    pub fn next_pos(&self, length: f32) -> Vec3 {
        self.pos + self.direction * length
    }

    /// Clears pull state and restores the working direction.
    pub fn reset(&mut self) {
        self.direction = self.original_direction;
        self.pull = Vec3::ZERO;
        self.pull_count = 0;
    }
}
