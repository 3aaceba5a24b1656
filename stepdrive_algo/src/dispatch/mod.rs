//! Routing of hardware events to registered callbacks.
//!
//! A fixed table maps every event kind to an optional zero-argument
//! callback. Registration can change at runtime; dispatching an event with
//! no registration is a safe no-op instead of a jump through whatever
//! happens to sit in the slot.

/// Zero-argument callback invoked when its event fires.
pub type Callback = fn();

/// Number of routable event kinds.
pub const EVENT_COUNT: usize = 15;

/// Hardware event kinds, discriminants ordered by dispatch priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    ExternalInt0 = 0,    // External line 0
    ExternalInt1 = 1,    // External line 1
    Timer2CompareA = 2,  // Timer2 output compare match A
    Timer2CompareB = 3,  // Timer2 output compare match B
    Timer2Overflow = 4,  // Timer2 counter overflow
    Timer1Capture = 5,   // Timer1 input capture
    Timer1CompareA = 6,  // Timer1 output compare match A
    Timer1CompareB = 7,  // Timer1 output compare match B
    Timer1Overflow = 8,  // Timer1 counter overflow
    Timer0CompareA = 9,  // Timer0 output compare match A
    Timer0CompareB = 10, // Timer0 output compare match B
    Timer0Overflow = 11, // Timer0 counter overflow
    SerialRxComplete = 12,
    SerialDataEmpty = 13,
    SerialTxComplete = 14,
}

impl Event {
    /// Dispatch priority, lower fires first when events are pending.
    #[inline(always)]
    pub const fn priority(self) -> usize {
        self as usize
    }
}

/// Event-to-callback table.
pub struct EventTable {
    slots: [Option<Callback>; EVENT_COUNT],
}

impl EventTable {
    /// Creates a table with every slot unbound.
    pub const fn new() -> Self {
        Self {
            slots: [None; EVENT_COUNT],
        }
    }

    /// Binds `callback` to `event`, replacing any previous binding.
    pub fn bind(&mut self, event: Event, callback: Callback) {
        self.slots[event.priority()] = Some(callback);
    }

    /// Removes the binding for `event`, if any.
    pub fn unbind(&mut self, event: Event) {
        self.slots[event.priority()] = None;
    }

    /// Invokes the callback bound to `event`.
    ///
    /// Returns `true` when a callback ran, `false` when the slot was
    /// unbound and the dispatch degraded to a no-op.
    pub fn dispatch(&self, event: Event) -> bool {
        match self.slots[event.priority()] {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Whether `event` currently has a callback bound.
    pub fn is_bound(&self, event: Event) -> bool {
        self.slots[event.priority()].is_some()
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unbound_dispatch_is_a_no_op() {
        let table = EventTable::new();
        assert!(!table.dispatch(Event::Timer0Overflow));
        assert!(!table.is_bound(Event::Timer0Overflow));
    }

    #[test]
    fn bound_callback_runs_on_dispatch() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        fn bump() {
            HITS.fetch_add(1, Ordering::Relaxed);
        }

        let mut table = EventTable::new();
        table.bind(Event::ExternalInt0, bump);
        assert!(table.dispatch(Event::ExternalInt0));
        assert!(table.dispatch(Event::ExternalInt0));
        assert_eq!(HITS.load(Ordering::Relaxed), 2);

        // Other slots stay unbound.
        assert!(!table.dispatch(Event::ExternalInt1));
    }

    #[test]
    fn rebinding_replaces_the_callback() {
        static FIRST: AtomicUsize = AtomicUsize::new(0);
        static SECOND: AtomicUsize = AtomicUsize::new(0);
        fn first() {
            FIRST.fetch_add(1, Ordering::Relaxed);
        }
        fn second() {
            SECOND.fetch_add(1, Ordering::Relaxed);
        }

        let mut table = EventTable::new();
        table.bind(Event::Timer1Capture, first);
        table.bind(Event::Timer1Capture, second);
        table.dispatch(Event::Timer1Capture);
        assert_eq!(FIRST.load(Ordering::Relaxed), 0);
        assert_eq!(SECOND.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn unbinding_restores_the_no_op() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        fn bump() {
            HITS.fetch_add(1, Ordering::Relaxed);
        }

        let mut table = EventTable::new();
        table.bind(Event::SerialRxComplete, bump);
        table.unbind(Event::SerialRxComplete);
        assert!(!table.dispatch(Event::SerialRxComplete));
        assert_eq!(HITS.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn priorities_follow_hardware_order() {
        assert_eq!(Event::ExternalInt0.priority(), 0);
        assert!(Event::ExternalInt1.priority() < Event::Timer2CompareA.priority());
        assert!(Event::Timer2Overflow.priority() < Event::Timer1Capture.priority());
        assert!(Event::Timer0Overflow.priority() < Event::SerialRxComplete.priority());
        assert_eq!(Event::SerialTxComplete.priority(), EVENT_COUNT - 1);
    }
}
