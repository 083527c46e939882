//! Navigation interception while a quiz is active.
//!
//! The guard is the single authority over pending navigation: every
//! navigable control asks it synchronously before acting, so one activation
//! can never produce two navigations. It is generic over the route type so
//! the UI layer can store its own `Route` values without this crate knowing
//! about them.

/// Which of the three dialog actions the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Keep playing: drop the captured target and resume the countdown.
    Continue,
    /// Abandon the session without saving, then navigate.
    LeaveUnsaved,
    /// Complete the session (save path), then navigate.
    SaveAndLeave,
}

/// The effect the caller must carry out after a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardEffect<T> {
    /// Close the dialog; no navigation happens.
    Stay,
    /// Perform the captured navigation, saving first when `save` is set.
    Leave { target: T, save: bool },
}

/// Holds at most one captured navigation target.
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard<T> {
    pending: Option<T>,
}

impl<T> NavigationGuard<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Capture an intercepted navigation target.
    ///
    /// Returns `true` when the target was captured and a dialog should open.
    /// While a target is already pending, later attempts are ignored: the
    /// first capture wins until the open dialog resolves.
    pub fn intercept(&mut self, target: T) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(target);
        true
    }

    /// Whether a dialog is currently awaiting a decision.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Resolve the open dialog.
    ///
    /// Always clears the pending target. A navigating decision with nothing
    /// captured degrades to `Stay` — a no-op beyond closing the dialog.
    pub fn resolve(&mut self, decision: GuardDecision) -> GuardEffect<T> {
        let pending = self.pending.take();
        match decision {
            GuardDecision::Continue => GuardEffect::Stay,
            GuardDecision::LeaveUnsaved => match pending {
                Some(target) => GuardEffect::Leave {
                    target,
                    save: false,
                },
                None => GuardEffect::Stay,
            },
            GuardDecision::SaveAndLeave => match pending {
                Some(target) => GuardEffect::Leave { target, save: true },
                None => GuardEffect::Stay,
            },
        }
    }

    /// Drop any pending target without resolving (view teardown).
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
