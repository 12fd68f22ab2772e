use chrono::Duration;
use storage::repository::{
    InMemoryRepository, NewSessionRecord, NewSubjectRecord, NewTopicRecord, StudySessionRepository,
    SubjectRepository, TopicRepository,
};
use study_core::model::{SessionDraft, SubjectDraft};
use study_core::time::fixed_clock;

fn subject_record(title: &str, description: &str) -> NewSubjectRecord {
    NewSubjectRecord::from_draft(&SubjectDraft::new(title, description).unwrap())
}

fn topic_record(subject_id: study_core::model::SubjectId, title: &str) -> NewTopicRecord {
    NewTopicRecord {
        subject_id,
        title: title.to_owned(),
        is_completed: false,
    }
}

#[tokio::test]
async fn subjects_list_newest_first() {
    let repo = InMemoryRepository::with_clock(fixed_clock());

    repo.insert_subject(subject_record("Oldest", "")).await.unwrap();
    repo.advance_clock(Duration::minutes(1));
    repo.insert_subject(subject_record("Middle", "")).await.unwrap();
    repo.advance_clock(Duration::minutes(1));
    repo.insert_subject(subject_record("Newest", "")).await.unwrap();

    let titles: Vec<String> = repo
        .list_subjects()
        .await
        .unwrap()
        .iter()
        .map(|s| s.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn topics_list_oldest_first_within_subject() {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let subject = repo.insert_subject(subject_record("Math", "")).await.unwrap();
    let other = repo.insert_subject(subject_record("Other", "")).await.unwrap();

    repo.insert_topic(topic_record(subject.id(), "First")).await.unwrap();
    repo.advance_clock(Duration::minutes(1));
    repo.insert_topic(topic_record(other.id(), "Elsewhere")).await.unwrap();
    repo.advance_clock(Duration::minutes(1));
    repo.insert_topic(topic_record(subject.id(), "Second")).await.unwrap();

    let titles: Vec<String> = repo
        .list_topics(subject.id())
        .await
        .unwrap()
        .iter()
        .map(|t| t.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn sessions_list_newest_first() {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let subject = repo.insert_subject(subject_record("Math", "")).await.unwrap();
    let topic = repo
        .insert_topic(topic_record(subject.id(), "Limits"))
        .await
        .unwrap();

    for minutes in [10_u32, 20, 30] {
        repo.insert_session(NewSessionRecord::from_draft(
            topic.id(),
            &SessionDraft::new(minutes, "").unwrap(),
        ))
        .await
        .unwrap();
        repo.advance_clock(Duration::hours(1));
    }

    let durations: Vec<u32> = repo
        .list_sessions(topic.id())
        .await
        .unwrap()
        .iter()
        .map(study_core::model::StudySession::duration_minutes)
        .collect();
    assert_eq!(durations, vec![30, 20, 10]);
}

#[tokio::test]
async fn set_completed_round_trips_through_reload() {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let subject = repo.insert_subject(subject_record("Math", "")).await.unwrap();
    let topic = repo
        .insert_topic(topic_record(subject.id(), "Limits"))
        .await
        .unwrap();
    assert!(!topic.is_completed());

    repo.set_completed(topic.id(), true).await.unwrap();
    let reloaded = repo.list_topics(subject.id()).await.unwrap();
    assert!(reloaded[0].is_completed());

    repo.set_completed(topic.id(), false).await.unwrap();
    let reloaded = repo.list_topics(subject.id()).await.unwrap();
    assert!(!reloaded[0].is_completed());
}

#[tokio::test]
async fn subject_delete_cascades_to_topics_and_sessions() {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let subject = repo
        .insert_subject(subject_record("Math", "all of it"))
        .await
        .unwrap();
    let keep = repo.insert_subject(subject_record("Keep", "")).await.unwrap();

    let topic = repo
        .insert_topic(topic_record(subject.id(), "Limits"))
        .await
        .unwrap();
    let kept_topic = repo
        .insert_topic(topic_record(keep.id(), "Stays"))
        .await
        .unwrap();
    repo.insert_session(NewSessionRecord::from_draft(
        topic.id(),
        &SessionDraft::new(25, "cascade me").unwrap(),
    ))
    .await
    .unwrap();

    repo.delete_subject(subject.id()).await.unwrap();

    assert!(repo.list_topics(subject.id()).await.unwrap().is_empty());
    assert!(repo.list_sessions(topic.id()).await.unwrap().is_empty());
    assert_eq!(repo.list_topics(keep.id()).await.unwrap().len(), 1);
    assert_eq!(
        repo.list_topics(keep.id()).await.unwrap()[0].id(),
        kept_topic.id()
    );
}

#[tokio::test]
async fn topic_delete_cascades_to_sessions_only() {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let subject = repo.insert_subject(subject_record("Math", "")).await.unwrap();
    let topic = repo
        .insert_topic(topic_record(subject.id(), "Limits"))
        .await
        .unwrap();
    repo.insert_session(NewSessionRecord::from_draft(
        topic.id(),
        &SessionDraft::new(15, "").unwrap(),
    ))
    .await
    .unwrap();

    repo.delete_topic(topic.id()).await.unwrap();

    assert!(repo.list_topics(subject.id()).await.unwrap().is_empty());
    assert!(repo.list_sessions(topic.id()).await.unwrap().is_empty());
    assert_eq!(repo.list_subjects().await.unwrap().len(), 1);
}

#[tokio::test]
async fn equal_timestamps_order_by_insertion() {
    // A fixed clock gives every row the same timestamp; newest-first
    // listings must then fall back to insertion order, like a serial key.
    let repo = InMemoryRepository::with_clock(fixed_clock());
    repo.insert_subject(subject_record("A", "")).await.unwrap();
    repo.insert_subject(subject_record("B", "")).await.unwrap();

    let titles: Vec<String> = repo
        .list_subjects()
        .await
        .unwrap()
        .iter()
        .map(|s| s.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
}
