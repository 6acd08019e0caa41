use std::sync::Mutex;

/// Tracks the one action a screen may have outstanding.
///
/// `K` names what is in flight (a plan, a package id, or `()`), so the view
/// can label the right button while disabling all of them.
#[derive(Debug)]
pub struct InFlight<K> {
    slot: Mutex<Option<K>>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<K: Clone> InFlight<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. `None` means something is already running; the
    /// caller must treat its submission as a no-op.
    pub fn try_begin(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            return None;
        }
        *slot = Some(key);
        Some(InFlightGuard { owner: self })
    }

    pub fn current(&self) -> Option<K> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_busy(&self) -> bool {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

/// Releases the slot on drop, whichever way the action exits.
#[derive(Debug)]
pub struct InFlightGuard<'a, K> {
    owner: &'a InFlight<K>,
}

impl<K> Drop for InFlightGuard<'_, K> {
    fn drop(&mut self) {
        *self.owner.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
