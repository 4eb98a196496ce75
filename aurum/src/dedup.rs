use aurum_strategy::signal::{Signal, SignalId};
use parking_lot::Mutex;

/// Remembers the most recently emitted [`SignalId`] so the same market event is only alerted once.
///
/// [`should_emit`](Self::should_emit) checks and records in one step, so concurrent callers can
/// never both be told to emit the same identity.
#[derive(Debug, Default)]
pub struct DedupGate {
    state: Mutex<GateState>,
}

#[derive(Debug, Default)]
struct GateState {
    last: Option<SignalId>,
    displaced: Option<SignalId>,
}

impl DedupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records the [`Signal`] identity if it differs from the last emitted
    /// identity, otherwise returns `false`.
    pub fn should_emit(&self, signal: &Signal) -> bool {
        let id = signal.id();
        let mut state = self.state.lock();

        if state.last == Some(id) {
            return false;
        }

        state.displaced = state.last.replace(id);
        true
    }

    /// Undo a successful [`should_emit`](Self::should_emit) for a [`Signal`] that could not be
    /// delivered, restoring the identity it displaced.
    pub fn release(&self, signal: &Signal) {
        let mut state = self.state.lock();

        if state.last == Some(signal.id()) {
            state.last = state.displaced.take();
        }
    }

    /// Identity of the last emitted [`Signal`], if any.
    pub fn last(&self) -> Option<SignalId> {
        self.state.lock().last
    }
}
