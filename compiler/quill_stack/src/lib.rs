//! Stack safety for deeply nested scripts.
//!
//! Two separate concerns:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so that
//!   deeply nested expressions (`((((...))))`, long `else if` chains) do not
//!   overflow while being parsed or evaluated.
//! - [`DepthGuard`] caps script-level recursion. A script calling itself
//!   forever must fail with an error, not grow the stack until the process
//!   runs out of memory.

/// Grow the stack when less than this remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red
/// zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Error returned when a [`DepthGuard`] is entered past its limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Counter for nested calls with a fixed limit.
#[derive(Clone, Debug)]
pub struct DepthGuard {
    depth: usize,
    limit: usize,
}

impl DepthGuard {
    pub const fn new(limit: usize) -> Self {
        DepthGuard { depth: 0, limit }
    }

    /// Enter one level. Fails without changing the depth if the limit is hit.
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.depth >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level. Must pair with a successful [`enter`](Self::enter).
    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "DepthGuard::exit without enter");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Reset to zero, e.g. after a script aborted mid-call.
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}
