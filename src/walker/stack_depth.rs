use std::cell::Cell;

use tracing::warn;

use crate::TreeError;

/// Default nesting limit for a single traversal
pub const DEFAULT_MAX_EXPR_DEPTH: usize = 1000;

/// Remaining stack below which a recursive step moves to a new segment
const STACK_RED_ZONE: usize = 256 << 10;
/// Size of each additional stack segment
const STACK_SEGMENT_SIZE: usize = 4 << 20;

thread_local! {
    /// Current traversal nesting on this thread
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EXPR_DEPTH) };
}

/// Change the nesting limit for traversals running on this thread
pub fn set_max_expr_depth(limit: usize) {
    MAX_DEPTH.with(|max| max.set(limit));
}

pub fn max_expr_depth() -> usize {
    MAX_DEPTH.with(|max| max.get())
}

/// Nesting of the traversal currently running on this thread
pub fn current_depth() -> usize {
    DEPTH.with(|depth| depth.get())
}

/// Holds one level of traversal nesting until dropped.
///
/// Every recursive step of the walkers, mutators and attribute lookups
/// enters a guard, so the counter tracks tree depth and the limit turns
/// runaway input into an error. Steps normally enter through [`guarded`].
#[derive(Debug)]
pub struct DepthGuard {
    _private: (),
}

impl DepthGuard {
    pub fn enter() -> Result<Self, TreeError> {
        let limit = max_expr_depth();
        DEPTH.with(|depth| {
            let next = depth.get() + 1;
            if next > limit {
                warn!("Traversal depth {} exceeds limit {}", next, limit);
                return Err(TreeError::StackDepthExceeded { depth: next, limit });
            }
            depth.set(next);
            Ok(DepthGuard { _private: () })
        })
    }
}

/// Run one recursive step of a traversal under a [`DepthGuard`].
///
/// When the thread's stack is close to exhausted the step continues on a
/// heap-allocated segment, so only the nesting limit bounds recursion.
pub fn guarded<T, E>(step: impl FnOnce() -> Result<T, E>) -> Result<T, E>
where
    E: From<TreeError>,
{
    let _guard = DepthGuard::enter()?;
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, step)
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
