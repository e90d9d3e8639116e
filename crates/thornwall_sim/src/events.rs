//! # Collision Event Channel
//!
//! Bridges the pipeline's synchronous callbacks to systems that prefer to
//! drain hits on their own schedule. A registered callback forwards every
//! confirmed pair into an unbounded channel; the receiver drains it with
//! `try_iter` during its own update.

use crossbeam_channel::{unbounded, Receiver};
use thornwall_core::{CollisionPipeline, EntityId};

/// One confirmed collision between two entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitEvent {
    /// First entity of the pair.
    pub a: EntityId,
    /// Second entity of the pair.
    pub b: EntityId,
}

/// Subscribes to the pipeline's confirmed collisions over a channel.
///
/// The channel is unbounded, so the callback never blocks the collision
/// tick. Dropping the receiver makes further sends no-ops.
#[must_use]
pub fn subscribe_hits(pipeline: &mut CollisionPipeline) -> Receiver<HitEvent> {
    let (tx, rx) = unbounded();
    pipeline.register_callback(move |_world, a, b| {
        // Send failure just means the subscriber is gone.
        let _ = tx.send(HitEvent { a, b });
    });
    rx
}
