//! End-to-end interception flows: activity, guard, and workflow wired the
//! way the views wire them, minus the rendering layer.

use std::sync::Arc;

use quiz_core::model::{Language, LanguageFilter, PhraseDraft, PhraseId};
use quiz_core::pacing::TimeBudgetBounds;
use quiz_core::time::fixed_now;
use services::{
    Clock, GuardDecision, GuardEffect, NavigationGuard, QuizActivity, QuizLoopService,
};
use storage::{InMemoryRepository, PhraseRepository, QuizResultRepository};
use ui::guard::{NavDecision, decide};

async fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    for id in 1..=10_u64 {
        let phrase = PhraseDraft {
            source_text: format!("Wort {id}"),
            source_language: "German".to_string(),
            target_text: format!("word {id}"),
            target_language: "English".to_string(),
            tags: Vec::new(),
        }
        .validate()
        .unwrap()
        .assign_id(PhraseId::new(id));
        repo.upsert_phrase(&phrase).await.unwrap();
    }
    repo
}

fn filter() -> LanguageFilter {
    LanguageFilter::new(
        Language::new("German").unwrap(),
        Language::new("English").unwrap(),
    )
}

fn loop_service(repo: &InMemoryRepository) -> QuizLoopService {
    QuizLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        TimeBudgetBounds::new(5, 15, 30).unwrap(),
    )
}

#[tokio::test]
async fn leave_anyway_navigates_without_saving() {
    let repo = seeded_repo().await;
    let loop_svc = loop_service(&repo);

    let mut session = loop_svc.start_quiz(&filter()).await.unwrap();
    let mut activity = QuizActivity::new();
    activity.start();

    let correct = session.question().correct_option_id();
    session.submit_answer(correct).unwrap();

    // A click on a dashboard link while the quiz is active.
    let mut guard = NavigationGuard::new();
    assert_eq!(
        decide(activity, &mut guard, "/dashboard"),
        NavDecision::Intercept
    );
    activity.pause();
    assert!(activity.is_paused());

    let mut navigated_to = None;
    match guard.resolve(GuardDecision::LeaveUnsaved) {
        GuardEffect::Leave { target, save } => {
            assert!(!save);
            activity.abandon();
            navigated_to = Some(target);
        }
        GuardEffect::Stay => panic!("expected a navigation effect"),
    }

    assert_eq!(navigated_to, Some("/dashboard"));
    assert!(!activity.is_active());
    assert!(!session.is_complete());
    // Nothing was persisted.
    assert!(repo.get_summary(1).await.is_err());
}

#[tokio::test]
async fn end_quiz_saves_counters_then_navigates() {
    let repo = seeded_repo().await;
    let loop_svc = loop_service(&repo);

    let mut session = loop_svc.start_quiz(&filter()).await.unwrap();
    let mut activity = QuizActivity::new();
    activity.start();

    let correct = session.question().correct_option_id();
    session.submit_answer(correct).unwrap();
    session.advance().unwrap();
    let wrong = session
        .question()
        .options()
        .iter()
        .map(|o| o.id())
        .find(|id| *id != session.question().correct_option_id())
        .unwrap();
    session.submit_answer(wrong).unwrap();

    let mut guard = NavigationGuard::new();
    assert_eq!(
        decide(activity, &mut guard, "/settings"),
        NavDecision::Intercept
    );
    activity.pause();

    let mut navigated_to = None;
    match guard.resolve(GuardDecision::SaveAndLeave) {
        GuardEffect::Leave { target, save } => {
            assert!(save);
            let saved = loop_svc.finish_quiz(&mut session).await.unwrap();
            assert!(saved.is_some());
            activity.complete();
            navigated_to = Some(target);
        }
        GuardEffect::Stay => panic!("expected a navigation effect"),
    }

    assert_eq!(navigated_to, Some("/settings"));
    assert!(!activity.is_active());
    assert!(!activity.is_paused());

    let stored = repo.get_summary(session.summary_id().unwrap()).await.unwrap();
    assert_eq!(stored.correct(), 1);
    assert_eq!(stored.wrong(), 1);
    assert_eq!(stored.timed_out(), 0);
}

#[tokio::test]
async fn continue_resumes_without_navigation() {
    let repo = seeded_repo().await;
    let loop_svc = loop_service(&repo);

    let session = loop_svc.start_quiz(&filter()).await.unwrap();
    let mut activity = QuizActivity::new();
    activity.start();

    let mut guard = NavigationGuard::new();
    decide(activity, &mut guard, "/dashboard");
    activity.pause();

    assert_eq!(guard.resolve(GuardDecision::Continue), GuardEffect::Stay);
    activity.resume();

    assert!(activity.is_active());
    assert!(!activity.is_paused());
    assert!(!session.is_complete());
    assert!(!guard.is_open());
}
