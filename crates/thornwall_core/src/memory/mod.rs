//! # Memory Management
//!
//! Object pooling for instances that are acquired and released every
//! frame (collision-pair buffers, transient projectile-like payloads).
//! The pool grows to the high-water mark of concurrent usage and never
//! shrinks, trading memory for the absence of reallocation spikes.

mod pool;

pub use pool::{ObjectPool, PoolHandle, PoolStats};
