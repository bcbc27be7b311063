//! Fill-in handler registry
//!
//! Handlers receive the cell being recycled and the item index it now
//! shows, and must set the cell's content before returning.

use super::types::CellIndex;

/// Identifies a connected fill-in handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type FillHandler<C> = Box<dyn FnMut(&mut C, CellIndex)>;

/// Ordered list of fill-in handlers, invoked in connection order.
pub(crate) struct FillHandlers<C> {
    next_id: u64,
    handlers: Vec<(HandlerId, FillHandler<C>)>,
}

impl<C> FillHandlers<C> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    pub(crate) fn connect(&mut self, handler: impl FnMut(&mut C, CellIndex) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns `false` if `id` was not connected.
    pub(crate) fn disconnect(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub(crate) fn emit(&mut self, cell: &mut C, index: CellIndex) {
        for (_, handler) in &mut self.handlers {
            handler(cell, index);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl<C> std::fmt::Debug for FillHandlers<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FillHandlers")
            .field("connected", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_runs_handlers_in_connection_order() {
        let mut handlers: FillHandlers<Vec<String>> = FillHandlers::new();
        handlers.connect(|cell, index| cell.push(format!("a{index}")));
        handlers.connect(|cell, index| cell.push(format!("b{index}")));

        let mut cell = Vec::new();
        handlers.emit(&mut cell, CellIndex::new(4));

        assert_eq!(cell, vec!["a4", "b4"]);
    }

    #[test]
    fn disconnect_removes_only_that_handler() {
        let mut handlers: FillHandlers<Vec<u8>> = FillHandlers::new();
        let first = handlers.connect(|cell, _| cell.push(1));
        handlers.connect(|cell, _| cell.push(2));

        assert!(handlers.disconnect(first));
        assert!(!handlers.disconnect(first), "already gone");
        assert_eq!(handlers.len(), 1);

        let mut cell = Vec::new();
        handlers.emit(&mut cell, CellIndex::new(0));
        assert_eq!(cell, vec![2]);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut handlers: FillHandlers<()> = FillHandlers::new();
        let a = handlers.connect(|_, _| {});
        handlers.disconnect(a);
        let b = handlers.connect(|_, _| {});
        assert_ne!(a, b);
    }
}
