//! # Frame Scheduler
//!
//! Systems are process-wide behavior units invoked once per frame in
//! ascending priority order; ties preserve registration order, so frame
//! ordering is deterministic across runs with identical inputs. Mutations
//! made by a system are visible to every later system in the same tick -
//! that is the intended coupling mechanism (movement before collision
//! before damage resolution).

use crate::ecs::World;
use tracing::trace;

/// A stateful behavior unit driven once per frame.
pub trait System {
    /// Stable name used for registration bookkeeping and logging.
    fn name(&self) -> &'static str;

    /// Advances this system by `dt` seconds.
    ///
    /// Systems may mutate components in place freely; entity destruction
    /// requested mid-tick must go through [`World::queue_destroy`] and is
    /// applied at the end-of-tick flush point.
    fn update(&mut self, world: &mut World, dt: f32);
}

struct Entry {
    priority: i32,
    seq: u64,
    system: Box<dyn System>,
}

/// Ordered collection of systems plus the frame-tick entry point.
#[derive(Default)]
pub struct SystemScheduler {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl SystemScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered systems.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no systems are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a system. Lower priority runs earlier; equal priorities
    /// run in registration order.
    pub fn add_system(&mut self, system: Box<dyn System>, priority: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            priority,
            seq,
            system,
        });
        // Stable ordering key: sequence numbers break priority ties.
        self.entries.sort_by_key(|e| (e.priority, e.seq));
    }

    /// Detaches the system registered under `name`; later ticks skip it.
    /// Returns false if no such system is registered.
    pub fn remove_system(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.system.name() != name);
        self.entries.len() != before
    }

    /// Runs one frame: every system exactly once, ascending priority, all
    /// with the same `dt`, then flushes the world's deferred-destruction
    /// queue - the single structural mutation point of the frame.
    pub fn tick(&mut self, world: &mut World, dt: f32) {
        for entry in &mut self.entries {
            trace!(system = entry.system.name(), priority = entry.priority, "update");
            entry.system.update(world, dt);
        }
        let destroyed = world.flush_deferred();
        if destroyed > 0 {
            trace!(destroyed, "flushed deferred destruction");
        }
    }

    /// Registered system names in execution order.
    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.system.name())
    }
}
