//! Cycle and depth guarding for recursive generation.
//!
//! A [`GenerationContext`] is created fresh by every top-level
//! [`Engine::generate`](crate::Engine::generate) call and threaded by value
//! through all recursion. It is never shared between top-level calls or
//! threads, so guard state cannot leak across unrelated generations.
//!
//! Violations are not errors: [`GenerationContext::guarded`] skips the
//! thunk and the caller substitutes a null value.

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Per-generation stack of structured types currently under construction,
/// plus a nesting-depth counter.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    active: Vec<String>,
    depth: usize,
    max_depth: usize,
}

impl GenerationContext {
    /// Fresh context with the given depth bound.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            active: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Whether `type_name` is already being constructed on this chain.
    #[must_use]
    pub fn is_circular(&self, type_name: &str) -> bool {
        self.active.iter().any(|t| t == type_name)
    }

    /// Whether the next push would exceed the depth bound.
    #[must_use]
    pub fn is_over_depth(&self) -> bool {
        self.depth >= self.max_depth
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Mark `type_name` as under construction.
    pub fn push(&mut self, type_name: &str) {
        self.active.push(type_name.to_owned());
        self.depth += 1;
    }

    /// Unmark the most recently pushed type.
    pub fn pop(&mut self) {
        self.active.pop();
        self.depth = self.depth.saturating_sub(1);
    }

    /// Check-push-run-pop. Returns `Ok(None)` without running `thunk` when
    /// the type is circular or the depth bound is exceeded; the pop is
    /// guaranteed even when `thunk` fails.
    pub fn guarded<T, E>(
        &mut self,
        type_name: &str,
        thunk: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<Option<T>, E> {
        if self.is_circular(type_name) || self.is_over_depth() {
            return Ok(None);
        }
        self.push(type_name);
        let outcome = thunk(self);
        self.pop();
        outcome.map(Some)
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_detection() {
        let mut cx = GenerationContext::default();
        assert!(!cx.is_circular("Node"));
        cx.push("Node");
        assert!(cx.is_circular("Node"));
        assert!(!cx.is_circular("Other"));
        cx.pop();
        assert!(!cx.is_circular("Node"));
    }

    #[test]
    fn guarded_skips_on_cycle() {
        let mut cx = GenerationContext::default();
        cx.push("Node");
        let out: Result<Option<i32>, ()> = cx.guarded("Node", |_| Ok(1));
        assert_eq!(out, Ok(None));
        // Depth unchanged by the skipped call.
        assert_eq!(cx.depth(), 1);
    }

    #[test]
    fn guarded_skips_over_depth() {
        let mut cx = GenerationContext::new(2);
        cx.push("A");
        cx.push("B");
        assert!(cx.is_over_depth());
        let out: Result<Option<i32>, ()> = cx.guarded("C", |_| Ok(1));
        assert_eq!(out, Ok(None));
    }

    #[test]
    fn guarded_pops_on_error() {
        let mut cx = GenerationContext::default();
        let out: Result<Option<i32>, &str> = cx.guarded("Node", |_| Err("boom"));
        assert_eq!(out, Err("boom"));
        assert_eq!(cx.depth(), 0);
        assert!(!cx.is_circular("Node"));
    }

    #[test]
    fn guarded_nests() {
        let mut cx = GenerationContext::default();
        let out: Result<Option<i32>, ()> = cx.guarded("A", |cx| {
            let inner = cx.guarded("B", |cx| {
                assert!(cx.is_circular("A"));
                assert!(cx.is_circular("B"));
                Ok(2)
            })?;
            Ok(inner.unwrap() + 1)
        });
        assert_eq!(out, Ok(Some(3)));
        assert_eq!(cx.depth(), 0);
    }
}
