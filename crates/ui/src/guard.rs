//! The single navigation-interception authority.
//!
//! Every navigable control — sidebar links, the back button, programmatic
//! jumps — consults [`NavigationAuthority`] synchronously instead of calling
//! the router directly. While a quiz is active the authority captures the
//! attempted destination, pauses the session, and leaves the three-way
//! resolution to the quiz view's dialog. One activation therefore reaches
//! the router at most once, and never through two competing listeners.

use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator, use_route};

use services::{GuardDecision, NavigationGuard, QuizActivity};

use crate::routes::Route;

/// What the authority decided to do with a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision<T> {
    /// No quiz is active: navigate right away.
    Proceed(T),
    /// Captured as pending; the countdown pauses and the dialog opens.
    Intercept,
    /// A dialog is already open; the attempt is dropped.
    Ignore,
}

/// Pure decision core, kept free of router handles so it can be tested
/// without a running app.
pub fn decide<T>(
    activity: QuizActivity,
    guard: &mut NavigationGuard<T>,
    target: T,
) -> NavDecision<T> {
    if !activity.is_active() {
        return NavDecision::Proceed(target);
    }
    if guard.intercept(target) {
        NavDecision::Intercept
    } else {
        NavDecision::Ignore
    }
}

/// Install the shared guard state. Called once, above the router.
pub fn provide_navigation_context() {
    use_context_provider(|| Signal::new(QuizActivity::new()));
    use_context_provider(|| Signal::new(NavigationGuard::<Route>::new()));
    use_context_provider(|| Signal::new(None::<Route>));
}

/// The shared quiz activity flags.
#[must_use]
pub fn use_quiz_activity() -> Signal<QuizActivity> {
    use_context::<Signal<QuizActivity>>()
}

/// The shared pending-navigation state.
#[must_use]
pub fn use_navigation_guard() -> Signal<NavigationGuard<Route>> {
    use_context::<Signal<NavigationGuard<Route>>>()
}

/// Handle used by navigable controls.
#[derive(Clone)]
pub struct NavigationAuthority {
    activity: Signal<QuizActivity>,
    guard: Signal<NavigationGuard<Route>>,
    previous: Signal<Option<Route>>,
    current: Route,
    navigator: Navigator,
}

#[must_use]
pub fn use_navigation_authority() -> NavigationAuthority {
    NavigationAuthority {
        activity: use_quiz_activity(),
        guard: use_navigation_guard(),
        previous: use_context::<Signal<Option<Route>>>(),
        current: use_route::<Route>(),
        navigator: use_navigator(),
    }
}

impl NavigationAuthority {
    /// Request navigation to `target`.
    ///
    /// Inactive quiz: pushes the route immediately. Active quiz: suppresses
    /// the navigation, captures it as pending, and pauses the countdown.
    pub fn navigate(&mut self, target: Route) {
        let activity = *self.activity.read();
        let decision = decide(activity, &mut self.guard.write(), target);
        match decision {
            NavDecision::Proceed(route) => {
                self.previous.set(Some(self.current.clone()));
                let _ = self.navigator.push(route);
            }
            NavDecision::Intercept => {
                self.activity.write().pause();
            }
            NavDecision::Ignore => {}
        }
    }

    /// Request history-back navigation.
    ///
    /// While a quiz is active the current view stays put and the last
    /// visited route is captured as the attempted destination, so the
    /// dialog can name where "back" would have gone.
    pub fn back(&mut self) {
        if !self.activity.read().is_active() {
            self.navigator.go_back();
            return;
        }
        let destination = self
            .previous
            .read()
            .as_ref()
            .cloned()
            .unwrap_or(Route::Home {});
        if self.guard.write().intercept(destination) {
            self.activity.write().pause();
        }
    }
}

/// A navigable control that defers to the authority instead of navigating
/// directly while a quiz is active.
#[component]
pub fn GuardLink(to: Route, children: Element) -> Element {
    let mut authority = use_navigation_authority();

    rsx! {
        a {
            class: "guard-link",
            href: "#",
            onclick: move |evt| {
                evt.prevent_default();
                authority.navigate(to.clone());
            },
            {children}
        }
    }
}

/// The three-way resolution dialog shown over an intercepted navigation.
#[component]
pub fn GuardDialog(destination: String, on_decision: EventHandler<GuardDecision>) -> Element {
    rsx! {
        div { class: "guard-overlay",
            div {
                class: "guard-dialog",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "guard-dialog-title",
                h3 { class: "guard-dialog__title", id: "guard-dialog-title", "Quiz in progress" }
                p { class: "guard-dialog__text",
                    "Leaving for {destination} will interrupt your quiz."
                }
                div { class: "guard-dialog__actions",
                    button {
                        class: "btn btn-primary",
                        id: "guard-continue",
                        r#type: "button",
                        onclick: move |_| on_decision.call(GuardDecision::Continue),
                        "Continue quiz"
                    }
                    button {
                        class: "btn btn-secondary",
                        id: "guard-save-leave",
                        r#type: "button",
                        onclick: move |_| on_decision.call(GuardDecision::SaveAndLeave),
                        "End quiz (save)"
                    }
                    button {
                        class: "btn btn-ghost",
                        id: "guard-leave",
                        r#type: "button",
                        onclick: move |_| on_decision.call(GuardDecision::LeaveUnsaved),
                        "Leave anyway"
                    }
                }
            }
        }
    }
}

/// Short label for a route, used by the dialog text.
#[must_use]
pub fn route_label(route: &Route) -> &'static str {
    match route {
        Route::Home {} => "Home",
        Route::Quiz {} => "Quiz",
        Route::Dashboard {} => "Dashboard",
        Route::Settings {} => "Settings",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> QuizActivity {
        let mut activity = QuizActivity::new();
        activity.start();
        activity
    }

    #[test]
    fn inactive_quiz_proceeds_immediately() {
        let mut guard = NavigationGuard::new();
        let decision = decide(QuizActivity::new(), &mut guard, "/dashboard");
        assert_eq!(decision, NavDecision::Proceed("/dashboard"));
        assert!(!guard.is_open());
    }

    #[test]
    fn active_quiz_intercepts_and_captures() {
        let mut guard = NavigationGuard::new();
        let decision = decide(active(), &mut guard, "/dashboard");
        assert_eq!(decision, NavDecision::Intercept);
        assert_eq!(guard.pending(), Some(&"/dashboard"));
    }

    #[test]
    fn second_attempt_while_open_is_ignored() {
        let mut guard = NavigationGuard::new();
        assert_eq!(decide(active(), &mut guard, "/dashboard"), NavDecision::Intercept);
        assert_eq!(decide(active(), &mut guard, "/settings"), NavDecision::Ignore);
        assert_eq!(guard.pending(), Some(&"/dashboard"));
    }

    #[test]
    fn one_activation_reaches_the_router_at_most_once() {
        // Count Proceed decisions across an intercept-then-resolve cycle.
        let mut guard = NavigationGuard::new();
        let mut pushes = 0;

        if let NavDecision::Proceed(_) = decide(active(), &mut guard, "/dashboard") {
            pushes += 1;
        }
        if let services::GuardEffect::Leave { .. } =
            guard.resolve(GuardDecision::LeaveUnsaved)
        {
            pushes += 1;
        }
        assert_eq!(pushes, 1);
    }
}
