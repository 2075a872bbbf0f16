//! The three phases of one growth iteration.
//!
//! A bolt step runs them in order:
//! 1. [`attraction_phase`] — every active attractor pulls on its nearest
//!    in-range segment, or gets marked reached if a segment is inside the
//!    capture radius.
//! 2. [`retire_phase`] — reached attractors leave the active set.
//! 3. [`emission_phase`] — every pulled segment averages its pulls, adds
//!    jitter and emits one child.

use crate::{
    attractor::AttractorSet,
    config::GrowthConfig,
    tree::{Reach, SegmentTree},
    types::SegmentId,
    vector,
};
use glam::Vec3;
use rand::Rng;

/// Accumulates pulls from active attractors onto the tree.
///
/// For each attractor that is not yet reached:
///
/// 1. Calls [`SegmentTree::nearest_in_range`] with the capture and
///    influence radii from `cfg`.
/// 2. On [`Reach::Captured`] the attractor is marked reached and exerts
///    no pull this iteration.
/// 3. On [`Reach::Within`] the unit vector from that segment toward the
///    attractor is added to the segment's pull.
///
/// ### Returns
/// The number of attractors that applied a pull.
pub fn attraction_phase(
    tree: &mut SegmentTree,
    attractors: &mut AttractorSet,
    cfg: &GrowthConfig,
) -> usize {
    let mut pulls = 0;

    for a in attractors.points.iter_mut().filter(|a| !a.reached) {
        match tree.nearest_in_range(a.pos, cfg.min_dist, cfg.max_dist) {
            Reach::Captured => a.reached = true,
            Reach::Within { id, .. } => {
                let seg = &mut tree.segments[id];
                let dir = (a.pos - seg.pos).normalize_or_zero();
                seg.add_pull(dir);
                pulls += 1;
            }
            Reach::OutOfRange => {}
        }
    }
    pulls
}

/// Removes reached attractors from the active set.
///
/// ### Returns
/// How many attractors were retired.
pub fn retire_phase(attractors: &mut AttractorSet) -> usize {
    attractors.retire_reached()
}

/// Emits one child for every segment that collected pulls.
///
/// Segments are visited in ascending id order, and only those that
/// existed when the phase started. For each pulled segment:
///
/// 1. Average its pulls with [`crate::segment::Segment::averaged_pull`].
/// 2. Add a jitter vector from [`vector::random_symmetric`] and normalize.
/// 3. If the result is non-zero, append a child at
///    `pos + dir * cfg.segment_length` tagged with `iteration`, and record
///    `iteration` as the segment's first emission if it had none.
/// 4. Reset the segment's pull state and working direction.
///
/// A zero direction (pulls cancelling out with no jitter) emits nothing.
///
/// ### Returns
/// Ids of the new segments, in creation order.
pub fn emission_phase(
    tree: &mut SegmentTree,
    cfg: &GrowthConfig,
    rng: &mut impl Rng,
    iteration: u32,
) -> Vec<SegmentId> {
    let mut new_ids = Vec::new();
    let existing = tree.len();

    for id in 0..existing {
        if !tree.segments[id].is_pulled() {
            continue;
        }

        let seg = &mut tree.segments[id];
        let jitter = vector::random_symmetric(rng, cfg.jitter_range);
        let dir = (seg.averaged_pull(cfg.heading_bias) + jitter).normalize_or_zero();

        if dir == Vec3::ZERO {
            seg.reset();
            continue;
        }

        seg.direction = dir;
        let pos = seg.next_pos(cfg.segment_length);
        if seg.first_emission.is_none() {
            seg.first_emission = Some(iteration);
        }
        seg.reset();

        new_ids.push(tree.add_child(id, pos, dir, iteration));
    }
    new_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn still_cfg() -> GrowthConfig {
        GrowthConfig {
            min_dist: 1.0,
            max_dist: 100.0,
            jitter_range: 0.0,
            ..GrowthConfig::default()
        }
    }

    #[test]
    fn attraction_phase_pulls_nearest_segment() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut attractors = AttractorSet::from_positions(vec![Vec3::new(10.0, 0.0, 0.0)]);

        let pulls = attraction_phase(&mut tree, &mut attractors, &still_cfg());

        assert_eq!(pulls, 1);
        assert_eq!(tree.segments[0].pull_count, 1);
        assert_eq!(tree.segments[0].pull, Vec3::X);
        assert!(!attractors.points[0].reached);
    }

    #[test]
    fn captured_attractor_exerts_no_pull() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut attractors = AttractorSet::from_positions(vec![Vec3::new(0.5, 0.0, 0.0)]);

        let pulls = attraction_phase(&mut tree, &mut attractors, &still_cfg());

        assert_eq!(pulls, 0);
        assert!(attractors.points[0].reached);
        assert!(!tree.segments[0].is_pulled());
        assert_eq!(retire_phase(&mut attractors), 1);
        assert!(attractors.is_empty());
    }

    #[test]
    fn out_of_range_attractor_is_left_alone() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut attractors = AttractorSet::from_positions(vec![Vec3::new(200.0, 0.0, 0.0)]);

        let pulls = attraction_phase(&mut tree, &mut attractors, &still_cfg());

        assert_eq!(pulls, 0);
        assert!(!attractors.points[0].reached);
        assert_eq!(retire_phase(&mut attractors), 0);
    }

    #[test]
    fn two_pulls_average_to_the_diagonal() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut attractors = AttractorSet::from_positions(vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ]);
        let cfg = still_cfg();
        let mut rng = StdRng::seed_from_u64(0);

        attraction_phase(&mut tree, &mut attractors, &cfg);
        let new_ids = emission_phase(&mut tree, &cfg, &mut rng, 1);

        assert_eq!(new_ids, vec![1]);
        let child = &tree.segments[1];
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!(child.original_direction.abs_diff_eq(expected, 1e-6));
        assert!(child.pos.abs_diff_eq(expected, 1e-6));
        assert_eq!(child.parent, Some(0));
        assert_eq!(child.iteration, 1);
    }

    #[test]
    fn jittered_direction_stays_close_to_average() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        tree.segments[0].add_pull(Vec3::X);
        tree.segments[0].add_pull(Vec3::Y);
        let cfg = GrowthConfig {
            jitter_range: 0.05,
            ..still_cfg()
        };
        let mut rng = StdRng::seed_from_u64(11);

        emission_phase(&mut tree, &cfg, &mut rng, 1);

        let dir = tree.segments[1].original_direction;
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.abs_diff_eq(Vec3::new(0.7071, 0.7071, 0.0), 0.15));
    }

    #[test]
    fn emission_resets_pull_and_records_first_emission() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        tree.segments[0].add_pull(Vec3::X);
        let cfg = still_cfg();
        let mut rng = StdRng::seed_from_u64(0);

        emission_phase(&mut tree, &cfg, &mut rng, 4);
        tree.segments[0].add_pull(Vec3::Z);
        emission_phase(&mut tree, &cfg, &mut rng, 5);

        let root = &tree.segments[0];
        assert_eq!(root.first_emission, Some(4));
        assert_eq!(root.children, vec![1, 2]);
        assert_eq!(root.pull_count, 0);
        assert_eq!(root.pull, Vec3::ZERO);
        assert_eq!(root.direction, Vec3::NEG_Y);
    }

    #[test]
    fn cancelling_pulls_without_jitter_emit_nothing() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut attractors = AttractorSet::from_positions(vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(-10.0, 0.0, 0.0),
        ]);
        let cfg = still_cfg();
        let mut rng = StdRng::seed_from_u64(0);

        attraction_phase(&mut tree, &mut attractors, &cfg);
        let new_ids = emission_phase(&mut tree, &cfg, &mut rng, 1);

        assert!(new_ids.is_empty());
        assert_eq!(tree.len(), 1);
        assert!(!tree.segments[0].is_pulled());
    }

    #[test]
    fn unpulled_segments_do_not_emit() {
        let mut tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(emission_phase(&mut tree, &still_cfg(), &mut rng, 1).is_empty());
    }
}
