use std::sync::Arc;

use chrono::Duration;
use storage::repository::{
    NewSessionRecord, NewSubjectRecord, NewTopicRecord, StorageError, Storage,
    StudySessionRepository, SubjectRepository, TopicRepository,
};
use study_core::model::{
    SessionDraft, StudySession, Subject, SubjectDraft, SubjectId, Topic, TopicId,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage, test_repo};

fn subject_record(title: &str, description: &str) -> NewSubjectRecord {
    NewSubjectRecord::from_draft(&SubjectDraft::new(title, description).unwrap())
}

async fn drive(harness: &mut super::test_harness::ViewHarness) -> String {
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    harness.render()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_empty_state() {
    let repo = test_repo();
    let mut harness = setup_view_harness(&repo, ViewKind::Home);

    let html = drive(&mut harness).await;
    assert!(html.contains("Study Tracker"), "missing header in {html}");
    assert!(html.contains("No subjects yet."), "missing empty state in {html}");
    assert!(html.contains("Welcome!"), "missing welcome pane in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_subjects_newest_first() {
    let repo = test_repo();
    repo.insert_subject(subject_record("Oldest Subject", ""))
        .await
        .expect("insert subject");
    repo.advance_clock(Duration::minutes(1));
    repo.insert_subject(subject_record("Newest Subject", "fresh"))
        .await
        .expect("insert subject");

    let mut harness = setup_view_harness(&repo, ViewKind::Home);
    let html = drive(&mut harness).await;

    let newest = html.find("Newest Subject").expect("newest missing");
    let oldest = html.find("Oldest Subject").expect("oldest missing");
    assert!(newest < oldest, "expected newest-first order in {html}");
    assert!(html.contains("fresh"), "missing description in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn detail_view_smoke_renders_progress() {
    let repo = test_repo();
    let subject = repo
        .insert_subject(subject_record("Calculus", "limits and rates"))
        .await
        .expect("insert subject");

    let first = repo
        .insert_topic(NewTopicRecord {
            subject_id: subject.id(),
            title: "Limits".into(),
            is_completed: false,
        })
        .await
        .expect("insert topic");
    for title in ["Derivatives", "Integrals"] {
        repo.advance_clock(Duration::minutes(1));
        repo.insert_topic(NewTopicRecord {
            subject_id: subject.id(),
            title: title.into(),
            is_completed: false,
        })
        .await
        .expect("insert topic");
    }
    repo.set_completed(first.id(), true).await.expect("complete topic");

    let mut harness = setup_view_harness(&repo, ViewKind::Detail(subject));
    let html = drive(&mut harness).await;

    assert!(
        html.contains("Progress: 1 of 3 topics completed"),
        "missing progress label in {html}"
    );
    assert!(html.contains("33%"), "missing percentage in {html}");

    // Topics list oldest-first.
    let limits = html.find("Limits").expect("first topic missing");
    let integrals = html.find("Integrals").expect("last topic missing");
    assert!(limits < integrals, "expected oldest-first topics in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn detail_view_smoke_totals_stay_hidden_until_history_expands() {
    let repo = test_repo();
    let subject = repo
        .insert_subject(subject_record("Physics", ""))
        .await
        .expect("insert subject");
    let topic = repo
        .insert_topic(NewTopicRecord {
            subject_id: subject.id(),
            title: "Kinematics".into(),
            is_completed: false,
        })
        .await
        .expect("insert topic");
    repo.insert_session(NewSessionRecord::from_draft(
        topic.id(),
        &SessionDraft::new(45, "reviewed chapter 2").unwrap(),
    ))
    .await
    .expect("insert session");

    let mut harness = setup_view_harness(&repo, ViewKind::Detail(subject));
    let html = drive(&mut harness).await;

    // History loads lazily; before the first expand no total is shown.
    assert!(html.contains("Show History"), "missing history toggle in {html}");
    assert!(!html.contains("Total:"), "total leaked before expand in {html}");
    assert!(
        !html.contains("reviewed chapter 2"),
        "session leaked before expand in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn detail_view_smoke_renders_empty_topics_hint() {
    let repo = test_repo();
    let subject = repo
        .insert_subject(subject_record("History", ""))
        .await
        .expect("insert subject");

    let mut harness = setup_view_harness(&repo, ViewKind::Detail(subject));
    let html = drive(&mut harness).await;

    assert!(html.contains("Progress: 0 of 0 topics completed"), "missing zero progress in {html}");
    assert!(html.contains("0%"), "missing zero percent in {html}");
    assert!(html.contains("No topics added yet."), "missing empty hint in {html}");
}

struct FailingSubjectRepo;

#[async_trait::async_trait]
impl SubjectRepository for FailingSubjectRepo {
    async fn insert_subject(&self, _record: NewSubjectRecord) -> Result<Subject, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_subject(&self, _id: SubjectId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[async_trait::async_trait]
impl TopicRepository for FailingSubjectRepo {
    async fn insert_topic(&self, _record: NewTopicRecord) -> Result<Topic, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_topics(&self, _subject_id: SubjectId) -> Result<Vec<Topic>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set_completed(&self, _id: TopicId, _is_completed: bool) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_topic(&self, _id: TopicId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[async_trait::async_trait]
impl StudySessionRepository for FailingSubjectRepo {
    async fn insert_session(
        &self,
        _record: NewSessionRecord,
    ) -> Result<StudySession, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_sessions(&self, _topic_id: TopicId) -> Result<Vec<StudySession>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let repo = Arc::new(FailingSubjectRepo);
    let storage = Storage {
        subjects: repo.clone(),
        topics: repo.clone(),
        sessions: repo,
    };
    let mut harness = setup_view_harness_with_storage(storage, ViewKind::Home);
    let html = drive(&mut harness).await;

    assert!(
        html.contains("Something went wrong"),
        "missing error state in {html}"
    );
}
