//! Stack growth for the recursive walker.
//!
//! Function calls and deeply nested expressions recurse on the host stack.
//! `with_stack_headroom` grows it on demand through `stacker`; the call-depth
//! bound in [`EvalConfig`](crate::EvalConfig) is what turns runaway recursion
//! into an error.

/// Bytes that must remain free before recursing further.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

// No stack switching on wasm.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    f()
}
