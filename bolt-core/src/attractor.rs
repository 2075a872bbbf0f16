use crate::config::ATTRACTOR_CEILING;
use glam::Vec3;
use rand::Rng;

/// A point that pulls the bolt toward it until a segment reaches it.
#[derive(Clone, Debug, PartialEq)]
pub struct Attractor {
    pub pos: Vec3,
    pub reached: bool,
}

/// The attractors still taking part in a growth run.
#[derive(Clone, Debug, Default)]
pub struct AttractorSet {
    pub points: Vec<Attractor>,
}

impl AttractorSet {
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        let points = positions
            .into_iter()
            .map(|pos| Attractor {
                pos,
                reached: false,
            })
            .collect();

        Self { points }
    }

    /// Scatters `count` attractors uniformly in the bolt volume.
    ///
    /// X and Z are drawn from `[-area, area]`, Y from `[0, ATTRACTOR_CEILING]`.
    pub fn random_in_volume(count: usize, area: f32, rng: &mut impl Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                let x = rng.random_range(-area..=area);
                let y = rng.random_range(0.0..=ATTRACTOR_CEILING);
                let z = rng.random_range(-area..=area);
                Vec3::new(x, y, z)
            })
            .collect();

        Self::from_positions(positions)
    }

    /// Drops every reached attractor and returns how many were removed.
    pub fn retire_reached(&mut self) -> usize {
        let before = self.points.len();
        self.points.retain(|a| !a.reached);
        before - self.points.len()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
