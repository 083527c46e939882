use std::time::Duration;

use dioxus::document::eval;
use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tokio::time::MissedTickBehavior;

use quiz_core::model::{OptionId, Question};
use services::{GuardDecision, GuardEffect, TickOutcome};

use crate::context::AppContext;
use crate::guard::{
    GuardDialog, GuardLink, route_label, use_navigation_authority, use_navigation_guard,
    use_quiz_activity,
};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizPhase, QuizVm, format_seconds, start_quiz};
use super::scripts::close_guard_script;

/// How long a resolved question stays on screen before the next one.
const RESULT_DISPLAY_SECS: u64 = 5;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut authority = use_navigation_authority();
    let activity = use_quiz_activity();
    let guard = use_navigation_guard();
    let quiz_loop = ctx.quiz_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);
    let finished = use_signal(|| false);

    let quiz_loop_for_resource = quiz_loop.clone();
    let filter_for_resource = ctx.default_filter();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let filter = filter_for_resource.clone();
        let mut vm = vm;
        let mut error = error;
        let mut activity = activity;
        let mut finished = finished;

        async move {
            finished.set(false);
            let started = start_quiz(&quiz_loop, &filter).await?;
            vm.set(Some(started));
            error.set(None);
            activity.write().start();
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    // The 5-second reveal delay. Scheduled once per resolution; advancing a
    // question that was already advanced (or a torn-down session) is a no-op
    // inside the state machine, so a stray schedule cannot skip a question.
    let schedule_advance = use_callback(move |()| {
        let mut vm = vm;
        spawn(async move {
            tokio::time::sleep(Duration::from_secs(RESULT_DISPLAY_SECS)).await;
            if let Some(vm_value) = vm.write().as_mut() {
                vm_value.advance();
            }
        });
    });

    // Countdown: one cancellable periodic task, keyed to the pause state.
    // Dropped with the view, which also tears the scheduler down.
    use_future(move || {
        let mut vm = vm;
        let activity = activity;
        async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // Swallow the immediate first tick so second one lands a full
            // second after the question appears.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if activity.read().is_paused() {
                    continue;
                }
                let should_tick = vm
                    .read()
                    .as_ref()
                    .is_some_and(|v| v.phase() == QuizPhase::Question && !v.is_complete());
                if !should_tick {
                    continue;
                }
                let outcome = vm.write().as_mut().map(QuizVm::tick);
                if outcome == Some(TickOutcome::TimedOut) {
                    schedule_advance.call(());
                }
            }
        }
    });

    // Tab-close hook follows the active flag; removed again on teardown.
    use_effect(move || {
        let active = activity.read().is_active();
        let _ = eval(&close_guard_script(active));
    });
    use_drop(move || {
        let mut activity = activity;
        let mut guard = guard;
        activity.write().abandon();
        guard.write().clear();
        let _ = eval(&close_guard_script(false));
    });

    let on_answer = use_callback(move |option_id: OptionId| {
        let mut vm = vm;
        let submitted = vm
            .write()
            .as_mut()
            .and_then(|v| v.submit(option_id))
            .is_some();
        if submitted {
            schedule_advance.call(());
        }
    });

    let quiz_loop_for_finish = quiz_loop.clone();
    let on_finish = use_callback(move |()| {
        let quiz_loop = quiz_loop_for_finish.clone();
        let mut vm = vm;
        let mut activity = activity;
        let mut finished = finished;
        spawn(async move {
            let taken = vm.write().take();
            let Some(mut vm_value) = taken else {
                return;
            };
            let _ = quiz_loop.finish_quiz(vm_value.session_mut()).await;
            *vm.write() = Some(vm_value);
            activity.write().complete();
            finished.set(true);
        });
    });

    let quiz_loop_for_guard = quiz_loop.clone();
    let on_guard_decision = use_callback(move |decision: GuardDecision| {
        let mut guard = guard;
        let mut activity = activity;
        let mut vm = vm;
        let effect = guard.write().resolve(decision);
        match effect {
            GuardEffect::Stay => {
                activity.write().resume();
            }
            GuardEffect::Leave { target, save } => {
                let quiz_loop = quiz_loop_for_guard.clone();
                spawn(async move {
                    if save {
                        let taken = vm.write().take();
                        if let Some(mut vm_value) = taken {
                            let _ = quiz_loop.finish_quiz(vm_value.session_mut()).await;
                            *vm.write() = Some(vm_value);
                        }
                        activity.write().complete();
                    } else {
                        activity.write().abandon();
                    }
                    let _ = navigator.push(target);
                });
            }
        }
    });

    let on_restart = {
        let mut resource = resource;
        use_callback(move |()| {
            resource.restart();
        })
    };

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if evt.data.key() == Key::Escape {
            evt.prevent_default();
            authority.navigate(Route::Home {});
            return;
        }

        let option_ids: Vec<OptionId> = {
            let vm_guard = vm.read();
            match vm_guard.as_ref() {
                Some(v) if v.phase() == QuizPhase::Question && !v.is_complete() => {
                    v.question().options().iter().map(|o| o.id()).collect()
                }
                _ => return,
            }
        };

        if let Key::Character(value) = evt.data.key() {
            if let Ok(slot) = value.parse::<usize>() {
                if slot >= 1 && slot <= option_ids.len() {
                    evt.prevent_default();
                    on_answer.call(option_ids[slot - 1]);
                }
            }
        }
    });

    let vm_guard = vm.read();
    let is_finished = finished();
    let pending_destination = guard.read().pending().map(route_label);

    let question_snapshot = vm_guard.as_ref().map(|v| QuestionSnapshot::of(v));
    let counters = vm_guard.as_ref().map_or((0, 0, 0), |v| {
        (v.correct_count(), v.wrong_count(), v.timeout_count())
    });
    let duration_label = vm_guard
        .as_ref()
        .and_then(QuizVm::duration_seconds)
        .map(format_seconds);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err == ViewError::EmptyQuiz {
                        GuardLink { to: Route::Home {}, "Back to Home" }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_restart.call(()),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { "{err.message()}" }
                    }
                    if is_finished {
                        CompletionPanel {
                            correct: counters.0,
                            wrong: counters.1,
                            timed_out: counters.2,
                            duration_label,
                            on_restart,
                        }
                    } else if let Some(snapshot) = question_snapshot {
                        QuestionCard {
                            snapshot,
                            on_answer,
                            on_finish,
                        }
                        footer { class: "quiz-footer",
                            span { class: "quiz-footer__item", "Correct: {counters.0}" }
                            span { class: "quiz-footer__item", "Wrong: {counters.1}" }
                            span { class: "quiz-footer__item", "Timed out: {counters.2}" }
                        }
                    } else {
                        p { "No quiz running." }
                    }
                },
            }
            if let Some(destination) = pending_destination {
                GuardDialog {
                    destination: destination.to_string(),
                    on_decision: on_guard_decision,
                }
            }
        }
    }
}

/// Everything the question card needs, captured outside the signal guard so
/// event handlers never hold a read borrow.
#[derive(Clone, PartialEq)]
struct QuestionSnapshot {
    number: u32,
    prompt: String,
    options: Vec<(OptionId, String)>,
    correct_option_id: OptionId,
    selected_option: Option<OptionId>,
    time_left: u32,
    reveal: bool,
    user_answered: bool,
}

impl QuestionSnapshot {
    fn of(vm: &QuizVm) -> Self {
        let question: &Question = vm.question();
        Self {
            number: vm.question_number(),
            prompt: question.prompt().to_string(),
            options: question
                .options()
                .iter()
                .map(|o| (o.id(), o.text().to_string()))
                .collect(),
            correct_option_id: question.correct_option_id(),
            selected_option: vm.selected_option(),
            time_left: vm.time_left(),
            reveal: vm.phase() == QuizPhase::Reveal,
            user_answered: vm.user_answered(),
        }
    }

    fn result_line(&self) -> Option<&'static str> {
        if !self.reveal {
            return None;
        }
        if !self.user_answered {
            return Some("Time's up!");
        }
        if self.selected_option == Some(self.correct_option_id) {
            Some("Correct!")
        } else {
            Some("Not quite — the right answer is highlighted.")
        }
    }
}

#[component]
fn QuestionCard(
    snapshot: QuestionSnapshot,
    on_answer: EventHandler<OptionId>,
    on_finish: EventHandler<()>,
) -> Element {
    let time_label = format_seconds(snapshot.time_left);
    let result_line = snapshot.result_line();

    rsx! {
        div { class: "quiz-card",
            header { class: "quiz-card__header",
                span { class: "quiz-card__number", "Question {snapshot.number}" }
                span { class: "quiz-card__timer", id: "quiz-timer-label", "Time: {time_label}" }
                button {
                    class: "quiz-card__finish",
                    id: "quiz-finish",
                    r#type: "button",
                    onclick: move |_| on_finish.call(()),
                    "Finish quiz"
                }
            }
            div { class: "quiz-question",
                p { class: "quiz-question__prompt", "{snapshot.prompt}" }
            }
            div { class: "quiz-options",
                for (option_id, text) in snapshot.options.iter().cloned() {
                    OptionButton {
                        key: "{snapshot.number}-{option_id}",
                        option_id,
                        text,
                        reveal: snapshot.reveal,
                        is_correct: option_id == snapshot.correct_option_id,
                        is_selected: snapshot.selected_option == Some(option_id),
                        on_answer,
                    }
                }
            }
            if let Some(line) = result_line {
                p { class: "quiz-result", "{line}" }
            }
        }
    }
}

#[component]
fn OptionButton(
    option_id: OptionId,
    text: String,
    reveal: bool,
    is_correct: bool,
    is_selected: bool,
    on_answer: EventHandler<OptionId>,
) -> Element {
    let mut class = String::from("quiz-option");
    if reveal && is_correct {
        class.push_str(" quiz-option--correct");
    } else if reveal && is_selected {
        class.push_str(" quiz-option--wrong");
    }

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: reveal,
            onclick: move |_| on_answer.call(option_id),
            "{text}"
        }
    }
}

#[component]
fn CompletionPanel(
    correct: u32,
    wrong: u32,
    timed_out: u32,
    duration_label: Option<String>,
    on_restart: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "quiz-complete",
            h3 { class: "quiz-complete__title", "Quiz finished" }
            ul { class: "quiz-complete__stats",
                li { "Correct: {correct}" }
                li { "Wrong: {wrong}" }
                li { "Timed out: {timed_out}" }
                if let Some(duration) = duration_label {
                    li { "Duration: {duration}" }
                }
            }
            div { class: "quiz-complete__actions",
                button {
                    class: "btn btn-primary",
                    id: "quiz-restart",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Practice again"
                }
                GuardLink { to: Route::Dashboard {}, "View dashboard" }
                GuardLink { to: Route::Home {}, "Back home" }
            }
        }
    }
}
