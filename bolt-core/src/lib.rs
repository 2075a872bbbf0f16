//! Space-colonization growth of a single lightning bolt.
//!
//! Main components:
//! - [`attractor`] — attractor points and their generation.
//! - [`segment`] — bolt segments and their per-iteration pull state.
//! - [`tree`] — the append-only segment tree and nearest-segment search.
//! - [`phases`] — attraction, retirement and emission phases.
//! - [`engine`] — the [`Bolt`] growth engine and its outcome.
//! - [`config`] — run parameters and validation.
//! - [`export`] — flat per-segment records for consumers.
//! - [`vector`] — jitter sampling helpers.
//!
//! Most callers only need [`run_growth`]:
//!
//! ```
//! use bolt_core::{GrowthConfig, run_growth};
//!
//! let growth = run_growth(GrowthConfig {
//!     seed: Some(7),
//!     ..GrowthConfig::default()
//! })
//! .unwrap();
//! assert!(growth.tree.len() >= 1);
//! ```

pub mod attractor;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod phases;
pub mod segment;
pub mod tree;
pub mod types;
pub mod vector;

pub use config::GrowthConfig;
pub use engine::{Bolt, Growth, GrowthOutcome, StepReport};
pub use error::ConfigError;
pub use export::SegmentRecord;
pub use tree::SegmentTree;

/// Validates `config`, seeds a [`Bolt`] and grows it to completion or to
/// the iteration cap.
pub fn run_growth(config: GrowthConfig) -> error::Result<Growth> {
    Ok(Bolt::new(config)?.grow())
}
