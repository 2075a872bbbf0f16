//! The growth engine that drives one bolt from a seed to a finished tree.

use crate::{
    attractor::AttractorSet,
    config::GrowthConfig,
    error::Result,
    phases,
    tree::SegmentTree,
    types::SegmentId,
};
use glam::Vec3;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

/// How a growth run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// Every attractor was captured.
    Complete,
    /// The iteration cap ran out with attractors still active.
    CapReached { remaining: usize },
}

/// The finished (or capped) bolt.
#[derive(Clone, Debug)]
pub struct Growth {
    pub tree: SegmentTree,
    pub outcome: GrowthOutcome,
    /// Number of iterations that ran.
    pub iterations: u32,
    /// Seed the run used, for reproducing it.
    pub seed: u64,
}

impl Growth {
    pub fn is_complete(&self) -> bool {
        self.outcome == GrowthOutcome::Complete
    }
}

/// What a single [`Bolt::step`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub iteration: u32,
    pub pulls: usize,
    pub retired: usize,
    pub new_ids: Vec<SegmentId>,
}

/// Growth engine for a single lightning bolt.
///
/// Owns the active attractors, the segment tree and the random generator.
/// The root starts at [`GrowthConfig::origin`] heading straight down.
#[derive(Debug)]
pub struct Bolt {
    cfg: GrowthConfig,
    attractors: AttractorSet,
    tree: SegmentTree,
    rng: StdRng,
    seed: u64,
    iteration: u32,
}

impl Bolt {
    /// Creates an engine with randomly scattered attractors.
    ///
    /// The configuration is validated first; nothing is allocated for an
    /// invalid one. A missing seed is drawn from the thread generator and
    /// kept so the run can be replayed.
    pub fn new(cfg: GrowthConfig) -> Result<Self> {
        cfg.validate()?;
        let seed = cfg.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let attractors =
            AttractorSet::random_in_volume(cfg.attractor_count, cfg.area_extent, &mut rng);
        Ok(Self::assemble(cfg, attractors, rng, seed))
    }

    /// Creates an engine with attractors at fixed positions.
    ///
    /// `cfg.attractor_count` and `cfg.area_extent` are not used for
    /// placement; the seed still drives jitter.
    pub fn with_attractors(cfg: GrowthConfig, positions: Vec<Vec3>) -> Result<Self> {
        cfg.validate()?;
        let seed = cfg.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(seed);
        let attractors = AttractorSet::from_positions(positions);
        Ok(Self::assemble(cfg, attractors, rng, seed))
    }

    fn assemble(cfg: GrowthConfig, attractors: AttractorSet, rng: StdRng, seed: u64) -> Self {
        let tree = SegmentTree::new(cfg.origin(), Vec3::NEG_Y);
        debug!(
            seed,
            attractors = attractors.len(),
            origin = ?cfg.origin(),
            "bolt seeded"
        );
        Self {
            cfg,
            attractors,
            tree,
            rng,
            seed,
            iteration: 0,
        }
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.cfg
    }

    pub fn tree(&self) -> &SegmentTree {
        &self.tree
    }

    pub fn attractors(&self) -> &AttractorSet {
        &self.attractors
    }

    /// Number of iterations run so far.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `true` once every attractor has been captured.
    pub fn is_done(&self) -> bool {
        self.attractors.is_empty()
    }

    /// `true` once `max_iterations` iterations have run.
    pub fn cap_reached(&self) -> bool {
        self.iteration >= self.cfg.max_iterations
    }

    /// `true` when [`Bolt::grow`] would return without stepping.
    pub fn is_finished(&self) -> bool {
        self.is_done() || self.cap_reached()
    }

    /// Runs one iteration: attraction, retirement, emission.
    ///
    /// Iterations are numbered from 1; children created here carry the
    /// new iteration number.
    pub fn step(&mut self) -> StepReport {
        self.iteration += 1;
        let iteration = self.iteration;

        let pulls = phases::attraction_phase(&mut self.tree, &mut self.attractors, &self.cfg);
        let retired = phases::retire_phase(&mut self.attractors);
        let new_ids = phases::emission_phase(&mut self.tree, &self.cfg, &mut self.rng, iteration);

        debug!(
            iteration,
            pulls,
            retired,
            emitted = new_ids.len(),
            remaining = self.attractors.len(),
            "growth step"
        );

        StepReport {
            iteration,
            pulls,
            retired,
            new_ids,
        }
    }

    /// Grows until every attractor is captured or the iteration cap runs out.
    ///
    /// Attractors outside `max_dist` of the whole tree are never captured,
    /// so the cap is what bounds such runs. Hitting it is reported through
    /// [`GrowthOutcome::CapReached`] together with the partial tree.
    pub fn grow(mut self) -> Growth {
        let outcome = loop {
            if self.is_done() {
                break GrowthOutcome::Complete;
            }
            if self.cap_reached() {
                break GrowthOutcome::CapReached {
                    remaining: self.attractors.len(),
                };
            }
            self.step();
        };

        match outcome {
            GrowthOutcome::Complete => info!(
                iterations = self.iteration,
                segments = self.tree.len(),
                seed = self.seed,
                "bolt fully grown"
            ),
            GrowthOutcome::CapReached { remaining } => warn!(
                iterations = self.iteration,
                segments = self.tree.len(),
                remaining,
                seed = self.seed,
                "iteration cap reached before all attractors were captured"
            ),
        }

        Growth {
            tree: self.tree,
            outcome,
            iterations: self.iteration,
            seed: self.seed,
        }
    }
}
