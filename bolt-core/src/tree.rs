use crate::{segment::Segment, types::SegmentId};
use glam::Vec3;

/// Append-only arena of bolt segments. Index 0 is the root.
#[derive(Clone, Debug)]
pub struct SegmentTree {
    pub segments: Vec<Segment>,
}

/// How an attractor relates to the closest part of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reach {
    /// Some segment is inside the capture radius.
    Captured,
    /// The closest segment inside the influence shell.
    Within { id: SegmentId, dist: f32 },
    /// No segment is within the influence radius.
    OutOfRange,
}

/// The span between a segment and its parent, i.e. what gets drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Vec3,
    pub end: Vec3,
    pub direction: Vec3,
}

impl Edge {
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

impl SegmentTree {
    pub fn new(root_pos: Vec3, root_dir: Vec3) -> Self {
        Self {
            segments: vec![Segment::new_root(root_pos, root_dir)],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn root(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Appends a child of `parent` and returns its id.
    ///
    /// ### Panics
    /// Panics if `parent` is not a valid id.
    pub fn add_child(
        &mut self,
        parent: SegmentId,
        pos: Vec3,
        direction: Vec3,
        iteration: u32,
    ) -> SegmentId {
        let id = self.segments.len();
        self.segments
            .push(Segment::new_child(pos, direction, parent, iteration));
        self.segments[parent].children.push(id);
        id
    }

    /// Finds the segment an attractor at `pos` should pull on.
    ///
    /// Segments are scanned in creation order. The first one closer than
    /// `min_dist` captures the attractor and ends the scan. Among segments
    /// with `min_dist <= d <= max_dist` the strictly closest wins, so ties
    /// go to the lowest id.
    ///
    /// ### Parameters
    /// - `pos` - Attractor position.
    /// - `min_dist` - Capture radius.
    /// - `max_dist` - Influence radius.
    pub fn nearest_in_range(&self, pos: Vec3, min_dist: f32, max_dist: f32) -> Reach {
        let mut best = Reach::OutOfRange;
        let mut best_d = f32::MAX;

        for (id, s) in self.segments.iter().enumerate() {
            let d = s.pos.distance(pos);
            if d < min_dist {
                return Reach::Captured;
            }
            if d > max_dist {
                continue;
            }
            if d < best_d {
                best_d = d;
                best = Reach::Within { id, dist: d };
            }
        }
        best
    }

    /// The drawable span ending at `id`; `None` for the root or a bad id.
    pub fn edge(&self, id: SegmentId) -> Option<Edge> {
        let seg = self.segments.get(id)?;
        let parent = self.segments.get(seg.parent?)?;
        Some(Edge {
            start: parent.pos,
            end: seg.pos,
            direction: seg.original_direction,
        })
    }

    /// Iterates over the ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: SegmentId) -> impl Iterator<Item = SegmentId> + '_ {
        std::iter::successors(self.segments.get(id).and_then(|s| s.parent), |&p| {
            self.segments[p].parent
        })
    }

    /// Number of links between `id` and the root.
    pub fn depth(&self, id: SegmentId) -> usize {
        self.ancestors(id).count()
    }

    /// Segments that never emitted a child: the tips of the bolt.
    pub fn leaves(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(id, s)| if s.children.is_empty() { Some(id) } else { None })
    }

    /// Latest creation iteration found in the tree.
    pub fn last_iteration(&self) -> u32 {
        self.segments.iter().map(|s| s.iteration).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_tree() -> SegmentTree {
        // Root at y = 10 growing down in unit steps to y = 7.
        let mut tree = SegmentTree::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let a = tree.add_child(0, Vec3::new(0.0, 9.0, 0.0), Vec3::NEG_Y, 1);
        let b = tree.add_child(a, Vec3::new(0.0, 8.0, 0.0), Vec3::NEG_Y, 2);
        tree.add_child(b, Vec3::new(0.0, 7.0, 0.0), Vec3::NEG_Y, 3);
        tree
    }

    #[test]
    fn add_child_links_both_ways() {
        let tree = line_tree();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.segments[2].parent, Some(1));
        assert_eq!(tree.segments[1].children, vec![2]);
        assert_eq!(tree.segments[3].iteration, 3);
    }

    #[test]
    fn capture_wins_over_closer_in_range_candidates() {
        let tree = line_tree();
        // Distance 2 from the last segment, 5 from the root.
        let reach = tree.nearest_in_range(Vec3::new(0.0, 5.0, 0.0), 2.5, 100.0);
        assert_eq!(reach, Reach::Captured);
    }

    #[test]
    fn picks_closest_within_shell() {
        let tree = line_tree();
        let reach = tree.nearest_in_range(Vec3::new(0.0, 0.0, 0.0), 1.0, 100.0);
        assert_eq!(reach, Reach::Within { id: 3, dist: 7.0 });
    }

    #[test]
    fn ignores_segments_beyond_influence_radius() {
        let tree = line_tree();
        let reach = tree.nearest_in_range(Vec3::new(0.0, 0.0, 0.0), 1.0, 6.0);
        assert_eq!(reach, Reach::OutOfRange);
    }

    #[test]
    fn distance_equal_to_capture_radius_still_attracts() {
        let tree = SegmentTree::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let reach = tree.nearest_in_range(Vec3::new(0.0, 5.0, 0.0), 5.0, 100.0);
        assert_eq!(reach, Reach::Within { id: 0, dist: 5.0 });
    }

    #[test]
    fn equidistant_segments_tie_to_lowest_id() {
        let mut tree = SegmentTree::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);
        tree.add_child(0, Vec3::new(1.0, 0.0, 0.0), Vec3::X, 1);

        let reach = tree.nearest_in_range(Vec3::new(0.0, 3.0, 0.0), 1.0, 100.0);
        assert!(matches!(reach, Reach::Within { id: 0, .. }));
    }

    #[test]
    fn edge_spans_parent_to_child() {
        let tree = line_tree();
        assert_eq!(tree.edge(0), None);

        let edge = tree.edge(2).unwrap();
        assert_eq!(edge.start, Vec3::new(0.0, 9.0, 0.0));
        assert_eq!(edge.end, Vec3::new(0.0, 8.0, 0.0));
        assert_eq!(edge.midpoint(), Vec3::new(0.0, 8.5, 0.0));
        assert_eq!(edge.length(), 1.0);
    }

    #[test]
    fn ancestors_walk_back_to_root() {
        let tree = line_tree();
        assert_eq!(tree.ancestors(3).collect::<Vec<_>>(), vec![2, 1, 0]);
        assert_eq!(tree.depth(3), 3);
        assert_eq!(tree.depth(0), 0);
        assert_eq!(tree.leaves().collect::<Vec<_>>(), vec![3]);
        assert_eq!(tree.last_iteration(), 3);
    }
}
