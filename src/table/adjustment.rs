//! Scrollable range shared between the table and the host's scrollbar
//!
//! An [`Adjustment`] is a cheap cloneable handle: the table and the host hold
//! clones of the same range. Notifications are not callbacks; every
//! subscriber gets an `mpsc` receiver and polls it from its own event loop,
//! so emitting a notification can never re-enter the table.

use std::cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

/// Bounds, page size and position of a scrollable range, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjustmentValues {
    /// Smallest value.
    pub lower: u64,
    /// End of the content.
    pub upper: u64,
    /// Visible extent.
    pub page_size: u64,
    /// Current scroll offset.
    pub value: u64,
}

impl AdjustmentValues {
    /// Largest value that still shows a full page: `max(lower, upper - page_size)`.
    pub fn max_value(&self) -> u64 {
        self.upper.saturating_sub(self.page_size).max(self.lower)
    }

    /// Clamp `value` into `[lower, max_value]`.
    pub fn clamp(&self, value: u64) -> u64 {
        value.clamp(self.lower, self.max_value())
    }
}

/// Notification sent to adjustment subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentSignal {
    /// Bounds or page size were (re)configured.
    Changed(AdjustmentValues),
    /// The value moved, or a refresh was forced.
    ValueChanged(u64),
}

#[derive(Debug, Default)]
struct Inner {
    values: cell::Cell<AdjustmentValues>,
    subscribers: RefCell<Vec<Sender<AdjustmentSignal>>>,
}

/// Shared handle to a scrollable range.
///
/// Cloning yields another handle to the same range; use
/// [`Adjustment::ptr_eq`] for identity.
#[derive(Debug, Clone, Default)]
pub struct Adjustment {
    inner: Rc<Inner>,
}

impl Adjustment {
    /// Create an empty range (everything zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a range with the given values; `value` is clamped.
    pub fn with_values(values: AdjustmentValues) -> Self {
        let adjustment = Self::new();
        adjustment.inner.values.set(AdjustmentValues {
            value: values.clamp(values.value),
            ..values
        });
        adjustment
    }

    /// Snapshot of the current values.
    pub fn values(&self) -> AdjustmentValues {
        self.inner.values.get()
    }

    /// Current scroll offset.
    pub fn value(&self) -> u64 {
        self.values().value
    }

    /// End of the content.
    pub fn upper(&self) -> u64 {
        self.values().upper
    }

    /// Whether both handles refer to the same range.
    pub fn ptr_eq(&self, other: &Adjustment) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Receive every notification emitted from now on.
    ///
    /// Dropping the receiver unsubscribes; the sender is pruned on the next
    /// emission.
    pub fn subscribe(&self) -> Receiver<AdjustmentSignal> {
        let (tx, rx) = mpsc::channel();
        self.inner.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Move to `value`, clamped to the valid range.
    ///
    /// Emits [`AdjustmentSignal::ValueChanged`] if the value actually moved.
    /// Returns the clamped value.
    ///
    /// A host that scrolls a bound adjustment directly must then call
    /// [`SmoothTable::on_position_changed`](crate::table::SmoothTable::on_position_changed),
    /// or use [`SmoothTable::scroll_to`](crate::table::SmoothTable::scroll_to)
    /// which does both.
    pub fn set_value(&self, value: u64) -> u64 {
        let values = self.values();
        let clamped = values.clamp(value);
        if clamped != values.value {
            self.store_value(clamped);
            self.value_changed();
        }
        clamped
    }

    /// Tell subscribers that the bounds changed.
    pub fn changed(&self) {
        self.emit(AdjustmentSignal::Changed(self.values()));
    }

    /// Tell subscribers that the value changed.
    pub fn value_changed(&self) {
        self.emit(AdjustmentSignal::ValueChanged(self.value()));
    }

    fn set_range(&self, lower: u64, upper: u64, page_size: u64) {
        let values = self.values();
        self.inner.values.set(AdjustmentValues {
            lower,
            upper,
            page_size,
            ..values
        });
    }

    fn store_value(&self, value: u64) {
        let values = self.values();
        self.inner.values.set(AdjustmentValues { value, ..values });
    }

    fn emit(&self, signal: AdjustmentSignal) {
        self.inner
            .subscribers
            .borrow_mut()
            .retain(|tx| tx.send(signal).is_ok());
    }
}

/// Result of [`sync_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeSync {
    /// Value was in range and no refresh was forced.
    Unchanged,
    /// Value was past the end and was pulled back.
    Clamped {
        /// Previous value.
        from: u64,
        /// New value.
        to: u64,
    },
    /// Value was in range; a refresh was forced.
    Forced,
}

impl RangeSync {
    /// Whether `value-changed` was emitted, so a windowing pass is due.
    pub(crate) fn value_changed(self) -> bool {
        !matches!(self, RangeSync::Unchanged)
    }
}

/// Derive the range from the table geometry.
///
/// Sets `lower = 0`, `upper = virtual_rows * cell_height` and
/// `page_size`, then emits `changed`. A value past `max(0, upper - page_size)`
/// is clamped and `value-changed` emitted; otherwise `value-changed` is
/// emitted only when `force` is set.
pub(crate) fn sync_range(
    adjustment: &Adjustment,
    virtual_rows: usize,
    cell_height: u32,
    page_size: u64,
    force: bool,
) -> RangeSync {
    let upper = virtual_rows as u64 * u64::from(cell_height);
    adjustment.set_range(0, upper, page_size);
    adjustment.changed();

    let values = adjustment.values();
    let max_value = values.max_value();
    if values.value > max_value {
        trace!(from = values.value, to = max_value, "Clamping scroll value");
        adjustment.store_value(max_value);
        adjustment.value_changed();
        RangeSync::Clamped {
            from: values.value,
            to: max_value,
        }
    } else if force {
        adjustment.value_changed();
        RangeSync::Forced
    } else {
        RangeSync::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(lower: u64, upper: u64, page_size: u64, value: u64) -> AdjustmentValues {
        AdjustmentValues {
            lower,
            upper,
            page_size,
            value,
        }
    }

    #[test]
    fn max_value_saturates_when_page_exceeds_content() {
        assert_eq!(values(0, 20, 30, 0).max_value(), 0);
        assert_eq!(values(0, 340, 30, 0).max_value(), 310);
    }

    #[test]
    fn with_values_clamps_value() {
        let adj = Adjustment::with_values(values(0, 100, 30, 500));
        assert_eq!(adj.value(), 70);
    }

    #[test]
    fn clones_share_state() {
        let a = Adjustment::with_values(values(0, 100, 10, 0));
        let b = a.clone();
        b.set_value(40);
        assert_eq!(a.value(), 40);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Adjustment::new()));
    }

    #[test]
    fn set_value_clamps_and_notifies_once() {
        let adj = Adjustment::with_values(values(0, 100, 30, 0));
        let rx = adj.subscribe();

        assert_eq!(adj.set_value(1_000), 70);
        assert_eq!(adj.set_value(70), 70);

        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(signals, vec![AdjustmentSignal::ValueChanged(70)]);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let adj = Adjustment::with_values(values(0, 100, 10, 0));
        drop(adj.subscribe());
        let rx = adj.subscribe();

        adj.set_value(5);

        assert_eq!(adj.inner.subscribers.borrow().len(), 1);
        assert_eq!(rx.try_recv(), Ok(AdjustmentSignal::ValueChanged(5)));
    }

    #[test]
    fn sync_range_sets_bounds_and_emits_changed() {
        let adj = Adjustment::new();
        let rx = adj.subscribe();

        let sync = sync_range(&adj, 34, 10, 30, false);

        assert_eq!(sync, RangeSync::Unchanged);
        assert_eq!(adj.values(), values(0, 340, 30, 0));
        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            signals,
            vec![AdjustmentSignal::Changed(values(0, 340, 30, 0))]
        );
    }

    #[test]
    fn sync_range_forced_emits_value_changed() {
        let adj = Adjustment::new();
        let rx = adj.subscribe();

        let sync = sync_range(&adj, 34, 10, 30, true);

        assert_eq!(sync, RangeSync::Forced);
        assert!(sync.value_changed());
        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(signals.last(), Some(&AdjustmentSignal::ValueChanged(0)));
    }

    #[test]
    fn sync_range_clamps_value_after_shrink() {
        let adj = Adjustment::with_values(values(0, 340, 30, 300));
        let rx = adj.subscribe();

        let sync = sync_range(&adj, 10, 10, 30, false);

        assert_eq!(sync, RangeSync::Clamped { from: 300, to: 70 });
        assert_eq!(adj.value(), 70);
        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[1], AdjustmentSignal::ValueChanged(70));
    }

    #[test]
    fn sync_range_clamps_to_zero_when_content_fits() {
        let adj = Adjustment::with_values(values(0, 340, 30, 120));
        let sync = sync_range(&adj, 2, 10, 30, false);
        assert_eq!(sync, RangeSync::Clamped { from: 120, to: 0 });
        assert_eq!(adj.value(), 0);
    }
}
