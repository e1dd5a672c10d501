//! Stack growth guard.
//!
//! Parsing and evaluation both recurse once per syntactic nesting level, and
//! evaluation additionally recurses once per analysed call. Scripts with
//! deeply nested literals or long call chains would otherwise overflow the
//! thread stack, so every recursive entry point runs through
//! [`ensure_sufficient_stack`].
//!
//! On native targets the stack is extended with `stacker`; on wasm32 the
//! closure runs directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
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

    enum Nested {
        Leaf,
        Wrap(Box<Nested>),
    }

    fn depth(node: &Nested) -> usize {
        ensure_sufficient_stack(|| match node {
            Nested::Leaf => 0,
            Nested::Wrap(inner) => depth(inner) + 1,
        })
    }

    #[test]
    fn test_passes_result_through() {
        assert_eq!(ensure_sufficient_stack(|| "done"), "done");
    }

    #[test]
    fn test_deeply_nested_walk() {
        let mut node = Nested::Leaf;
        for _ in 0..50_000 {
            node = Nested::Wrap(Box::new(node));
        }
        assert_eq!(depth(&node), 50_000);

        // Dropping a deep Box chain recurses too; unwind it iteratively.
        let mut current = node;
        while let Nested::Wrap(inner) = current {
            current = *inner;
        }
    }
}
