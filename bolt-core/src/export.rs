//! Flat, serializable view of a grown bolt.
//!
//! Consumers that persist or ship a bolt (mesh builders, animation tools)
//! read one [`SegmentRecord`] per segment instead of walking the tree.

use crate::{tree::SegmentTree, types::SegmentId};
use serde::{Deserialize, Serialize};

/// One segment of a bolt, in creation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub index: SegmentId,
    pub parent_index: Option<SegmentId>,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub dir_x: f32,
    pub dir_y: f32,
    pub dir_z: f32,
    /// Iteration in which the segment appeared; 0 for the root.
    pub iteration: u32,
    /// Iteration in which the segment first emitted a child, if it ever did.
    pub first_emission: Option<u32>,
}

impl SegmentTree {
    /// One record per segment, indexed by creation order.
    pub fn records(&self) -> Vec<SegmentRecord> {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, s)| SegmentRecord {
                index,
                parent_index: s.parent,
                x: s.pos.x,
                y: s.pos.y,
                z: s.pos.z,
                dir_x: s.original_direction.x,
                dir_y: s.original_direction.y,
                dir_z: s.original_direction.z,
                iteration: s.iteration,
                first_emission: s.first_emission,
            })
            .collect()
    }
}
