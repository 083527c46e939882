/// Shared quiz activity flags, consulted by navigation components.
///
/// This is deliberately not a global: one instance lives in the app context
/// and every writer goes through the named operations below, which keep the
/// `paused ⇒ active` invariant in every reachable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizActivity {
    active: bool,
    paused: bool,
}

impl QuizActivity {
    /// An idle activity: no quiz running, nothing paused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A quiz session began.
    pub fn start(&mut self) {
        self.active = true;
        self.paused = false;
    }

    /// Freeze the countdown. Ignored while no quiz is active, so the
    /// invariant cannot be violated by a stray pause.
    pub fn pause(&mut self) {
        if self.active {
            self.paused = true;
        }
    }

    /// Unfreeze the countdown.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// The session finished through the normal completion path.
    pub fn complete(&mut self) {
        self.active = false;
        self.paused = false;
    }

    /// The session was discarded without saving ("leave anyway").
    pub fn abandon(&mut self) {
        self.active = false;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant_holds(activity: &QuizActivity) -> bool {
        !activity.is_paused() || activity.is_active()
    }

    #[test]
    fn starts_idle() {
        let activity = QuizActivity::new();
        assert!(!activity.is_active());
        assert!(!activity.is_paused());
    }

    #[test]
    fn pause_requires_an_active_quiz() {
        let mut activity = QuizActivity::new();
        activity.pause();
        assert!(!activity.is_paused());

        activity.start();
        activity.pause();
        assert!(activity.is_paused());
        assert!(invariant_holds(&activity));
    }

    #[test]
    fn resume_clears_pause() {
        let mut activity = QuizActivity::new();
        activity.start();
        activity.pause();
        activity.resume();
        assert!(activity.is_active());
        assert!(!activity.is_paused());
    }

    #[test]
    fn complete_and_abandon_clear_both_flags() {
        for op in 0..2 {
            let mut activity = QuizActivity::new();
            activity.start();
            activity.pause();
            if op == 0 {
                activity.complete();
            } else {
                activity.abandon();
            }
            assert!(!activity.is_active());
            assert!(!activity.is_paused());
        }
    }

    #[test]
    fn invariant_holds_across_all_operation_sequences() {
        // Exhaustively walk every sequence of four operations.
        let ops: [fn(&mut QuizActivity); 5] = [
            QuizActivity::start,
            QuizActivity::pause,
            QuizActivity::resume,
            QuizActivity::complete,
            QuizActivity::abandon,
        ];

        for a in ops {
            for b in ops {
                for c in ops {
                    for d in ops {
                        let mut activity = QuizActivity::new();
                        a(&mut activity);
                        b(&mut activity);
                        c(&mut activity);
                        d(&mut activity);
                        assert!(invariant_holds(&activity));
                    }
                }
            }
        }
    }
}
