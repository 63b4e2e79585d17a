use crate::domain::ports::PaymentStatusListener;
use crate::domain::result::PaymentResult;
use parking_lot::Mutex;
use std::sync::Arc;

type ListenerSlot = Option<Arc<dyn PaymentStatusListener>>;

/// Single-slot listener registry delivering payment results.
///
/// Cloning yields another handle to the same slot, so the integration layer can keep
/// one to call [`clear`](Self::clear) when its owning scope ends.
///
/// `deliver` snapshots the listener under the lock and invokes it after releasing it:
/// a `clear` ordered before the snapshot drops the result, one ordered after does not
/// stop it. Listeners may call back into the channel.
#[derive(Clone, Default)]
pub struct ResultChannel {
    slot: Arc<Mutex<ListenerSlot>>,
}

impl ResultChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`, replacing (and dropping) any previous one.
    pub fn set_listener<L>(&self, listener: L)
    where
        L: PaymentStatusListener + 'static,
    {
        self.set_shared_listener(Arc::new(listener));
    }

    pub fn set_shared_listener(&self, listener: Arc<dyn PaymentStatusListener>) {
        // old listener is dropped after the lock is released
        let previous = self.slot.lock().replace(listener);
        drop(previous);
    }

    /// Removes the registered listener. Idempotent.
    ///
    /// A `deliver` that took its snapshot before this call may still invoke the old
    /// listener after `clear` returns. Listeners must stay valid until such in-flight
    /// callbacks finish.
    pub fn clear(&self) {
        let previous = self.slot.lock().take();
        drop(previous);
    }

    pub fn is_registered(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Invokes the registered listener once with `result`. With no listener the result
    /// is discarded. Returns whether a listener was invoked.
    pub fn deliver(&self, result: &PaymentResult) -> bool {
        let listener = self.slot.lock().clone();
        match listener {
            Some(listener) => {
                listener.on_payment_result(result);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ResultChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultChannel")
            .field("registered", &self.is_registered())
            .finish()
    }
}
