//! Stack growth for deeply recursive evaluation.
//!
//! Each Lox call nests several Rust frames, so a script that recurses up to
//! the call depth limit could exhaust the native stack first. Wrapping each
//! call body in [`ensure_sufficient_stack`] moves onto a fresh heap segment
//! when the current one runs low.

/// Runs `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const STACK_PER_SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
