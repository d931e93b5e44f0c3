//! Stack growth for deep recursion.
//!
//! Bir scripts may recurse thousands of block calls deep, and each call
//! re-enters the evaluator several times. The call-stack limit of the engine
//! is what should stop a runaway script, not the native thread stack, so the
//! recursive entry points of the parser and the evaluator are wrapped in
//! [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a new stack segment when
//! fewer than [`RED_ZONE`] bytes remain. On WASM the closure is called as is.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
    }

    #[test]
    fn passes_through_result() {
        assert_eq!(ensure_sufficient_stack(|| 7), 7);
    }

    #[test]
    fn survives_deep_recursion() {
        assert_eq!(depth(200_000), 200_000);
    }
}
