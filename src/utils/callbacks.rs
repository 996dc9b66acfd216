//! Chunk observer registration and fan-out.

use std::fmt;

/// Handler invoked with the normalized byte form of every chunk read.
///
/// The buffer is always signed little-endian regardless of the source
/// encoding. Handlers must not retain it beyond the call.
pub type ChunkHandler = Box<dyn FnMut(&[u8])>;

/// Ordered collection of chunk observers attached to a reader.
///
/// Dispatch runs every handler synchronously on the caller's stack, most
/// recently registered first, passing each the same normalized buffer.
/// Handlers are side-effect-only; no return value is consulted.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: Vec<ChunkHandler>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. Later registrations are dispatched first.
    pub fn register<F>(&mut self, handler: F)
    where
        F: FnMut(&[u8]) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Invokes every registered handler with `buffer`.
    pub fn dispatch(&mut self, buffer: &[u8]) {
        for handler in self.handlers.iter_mut().rev() {
            handler(buffer);
        }
    }

    /// Releases every registered handler. Idempotent.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn dispatch_runs_most_recent_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CallbackRegistry::new();

        for name in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            registry.register(move |_| order.borrow_mut().push(name));
        }

        registry.dispatch(&[0u8; 4]);
        assert_eq!(*order.borrow(), ["third", "second", "first"]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut registry = CallbackRegistry::new();
        registry.register(|_| {});
        assert_eq!(registry.len(), 1);

        registry.clear();
        registry.clear();
        assert!(registry.is_empty());
    }
}
