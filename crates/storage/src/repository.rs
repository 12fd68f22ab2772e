use async_trait::async_trait;
use chrono::Duration;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use study_core::Clock;
use study_core::model::{
    SessionDraft, StudySession, StudySessionId, Subject, SubjectDraft, SubjectId, Topic, TopicId,
};

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("store is not configured")]
    NotConfigured,

    #[error("not found")]
    NotFound,

    #[error("store request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Input row for a subject insert. The store assigns id and `created_at`.
#[derive(Debug, Clone)]
pub struct NewSubjectRecord {
    pub title: String,
    pub description: Option<String>,
}

impl NewSubjectRecord {
    #[must_use]
    pub fn from_draft(draft: &SubjectDraft) -> Self {
        Self {
            title: draft.title().to_owned(),
            description: draft.description().map(ToOwned::to_owned),
        }
    }
}

/// Input row for a topic insert. The store assigns id and `created_at`;
/// new topics always start incomplete.
#[derive(Debug, Clone)]
pub struct NewTopicRecord {
    pub subject_id: SubjectId,
    pub title: String,
    pub is_completed: bool,
}

/// Input row for a study-session insert. The store assigns id and
/// `studied_at`.
#[derive(Debug, Clone)]
pub struct NewSessionRecord {
    pub topic_id: TopicId,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

impl NewSessionRecord {
    #[must_use]
    pub fn from_draft(topic_id: TopicId, draft: &SessionDraft) -> Self {
        Self {
            topic_id,
            duration_minutes: draft.duration_minutes(),
            notes: draft.notes().map(ToOwned::to_owned),
        }
    }
}

/// Repository contract for subjects.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Insert a subject and return the stored row, including the
    /// server-assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the subject cannot be stored.
    async fn insert_subject(&self, record: NewSubjectRecord) -> Result<Subject, StorageError>;

    /// List all subjects, newest-first by creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError>;

    /// Delete a subject by id. The store cascades to its topics and their
    /// sessions; deleting an id that no longer exists is a success.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete request fails.
    async fn delete_subject(&self, id: SubjectId) -> Result<(), StorageError>;
}

/// Repository contract for topics.
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Insert a topic and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the topic cannot be stored.
    async fn insert_topic(&self, record: NewTopicRecord) -> Result<Topic, StorageError>;

    /// List a subject's topics, oldest-first by creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, StorageError>;

    /// Write a topic's completion flag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the update request fails.
    async fn set_completed(&self, id: TopicId, is_completed: bool) -> Result<(), StorageError>;

    /// Delete a topic by id. The store cascades to its sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete request fails.
    async fn delete_topic(&self, id: TopicId) -> Result<(), StorageError>;
}

/// Repository contract for study sessions.
#[async_trait]
pub trait StudySessionRepository: Send + Sync {
    /// Insert a session and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn insert_session(&self, record: NewSessionRecord)
    -> Result<StudySession, StorageError>;

    /// List a topic's sessions, newest-first by study time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn list_sessions(&self, topic_id: TopicId) -> Result<Vec<StudySession>, StorageError>;
}

/// In-memory backend for tests, prototyping, and the `--memory` demo mode.
///
/// Emulates the remote store's behavior: ids and timestamps are assigned
/// here, deletes cascade, and timestamp ties order by insertion sequence the
/// way a serial server key would.
#[derive(Clone)]
pub struct InMemoryRepository {
    clock: Arc<Mutex<Clock>>,
    seq: Arc<AtomicU64>,
    subjects: Arc<Mutex<Vec<(u64, Subject)>>>,
    topics: Arc<Mutex<Vec<(u64, Topic)>>>,
    sessions: Arc<Mutex<Vec<(u64, StudySession)>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Clock::default_clock())
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock: Arc::new(Mutex::new(clock)),
            seq: Arc::new(AtomicU64::new(0)),
            subjects: Arc::new(Mutex::new(Vec::new())),
            topics: Arc::new(Mutex::new(Vec::new())),
            sessions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Advance a fixed clock, so tests can create rows with distinct
    /// server-assigned timestamps.
    pub fn advance_clock(&self, delta: Duration) {
        if let Ok(mut clock) = self.clock.lock() {
            clock.advance(delta);
        }
    }

    fn now(&self) -> Result<chrono::DateTime<chrono::Utc>, StorageError> {
        self.clock
            .lock()
            .map(|clock| clock.now())
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl SubjectRepository for InMemoryRepository {
    async fn insert_subject(&self, record: NewSubjectRecord) -> Result<Subject, StorageError> {
        let subject = Subject::new(
            SubjectId::generate(),
            record.title,
            record.description,
            self.now()?,
        )
        .map_err(ser)?;

        let mut guard = self
            .subjects
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push((self.next_seq(), subject.clone()));
        Ok(subject)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let guard = self
            .subjects
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<(u64, Subject)> = guard.clone();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at()
                .cmp(&a.created_at())
                .then(seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, subject)| subject).collect())
    }

    async fn delete_subject(&self, id: SubjectId) -> Result<(), StorageError> {
        let mut subjects = self
            .subjects
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        subjects.retain(|(_, subject)| subject.id() != id);

        // Mirrors the store's ON DELETE CASCADE constraints.
        let mut topics = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let removed: Vec<TopicId> = topics
            .iter()
            .filter(|(_, topic)| topic.subject_id() == id)
            .map(|(_, topic)| topic.id())
            .collect();
        topics.retain(|(_, topic)| topic.subject_id() != id);

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        sessions.retain(|(_, session)| !removed.contains(&session.topic_id()));
        Ok(())
    }
}

#[async_trait]
impl TopicRepository for InMemoryRepository {
    async fn insert_topic(&self, record: NewTopicRecord) -> Result<Topic, StorageError> {
        {
            let subjects = self
                .subjects
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            if !subjects
                .iter()
                .any(|(_, subject)| subject.id() == record.subject_id)
            {
                return Err(StorageError::NotFound);
            }
        }

        let topic = Topic::new(
            TopicId::generate(),
            record.subject_id,
            record.title,
            record.is_completed,
            self.now()?,
        )
        .map_err(ser)?;

        let mut guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push((self.next_seq(), topic.clone()));
        Ok(topic)
    }

    async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, StorageError> {
        let guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<(u64, Topic)> = guard
            .iter()
            .filter(|(_, topic)| topic.subject_id() == subject_id)
            .cloned()
            .collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            a.created_at()
                .cmp(&b.created_at())
                .then(seq_a.cmp(seq_b))
        });
        Ok(rows.into_iter().map(|(_, topic)| topic).collect())
    }

    async fn set_completed(&self, id: TopicId, is_completed: bool) -> Result<(), StorageError> {
        let mut guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let Some((_, topic)) = guard.iter_mut().find(|(_, topic)| topic.id() == id) else {
            return Err(StorageError::NotFound);
        };
        *topic = Topic::new(
            topic.id(),
            topic.subject_id(),
            topic.title(),
            is_completed,
            topic.created_at(),
        )
        .map_err(ser)?;
        Ok(())
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), StorageError> {
        let mut topics = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        topics.retain(|(_, topic)| topic.id() != id);

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        sessions.retain(|(_, session)| session.topic_id() != id);
        Ok(())
    }
}

#[async_trait]
impl StudySessionRepository for InMemoryRepository {
    async fn insert_session(
        &self,
        record: NewSessionRecord,
    ) -> Result<StudySession, StorageError> {
        {
            let topics = self
                .topics
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            if !topics.iter().any(|(_, topic)| topic.id() == record.topic_id) {
                return Err(StorageError::NotFound);
            }
        }

        let session = StudySession::new(
            StudySessionId::generate(),
            record.topic_id,
            record.duration_minutes,
            record.notes,
            self.now()?,
        )
        .map_err(ser)?;

        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push((self.next_seq(), session.clone()));
        Ok(session)
    }

    async fn list_sessions(&self, topic_id: TopicId) -> Result<Vec<StudySession>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<(u64, StudySession)> = guard
            .iter()
            .filter(|(_, session)| session.topic_id() == topic_id)
            .cloned()
            .collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.studied_at()
                .cmp(&a.studied_at())
                .then(seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, session)| session).collect())
    }
}

/// Aggregates the per-entity repositories behind trait objects for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub subjects: Arc<dyn SubjectRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub sessions: Arc<dyn StudySessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::in_memory_with_clock(Clock::default_clock())
    }

    #[must_use]
    pub fn in_memory_with_clock(clock: Clock) -> Self {
        let repo = InMemoryRepository::with_clock(clock);
        let subjects: Arc<dyn SubjectRepository> = Arc::new(repo.clone());
        let topics: Arc<dyn TopicRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn StudySessionRepository> = Arc::new(repo);
        Self {
            subjects,
            topics,
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::SubjectDraft;
    use study_core::time::fixed_clock;

    fn subject_record(title: &str) -> NewSubjectRecord {
        NewSubjectRecord::from_draft(&SubjectDraft::new(title, "").unwrap())
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let repo = InMemoryRepository::with_clock(fixed_clock());
        let first = repo.insert_subject(subject_record("Algebra")).await.unwrap();
        let second = repo.insert_subject(subject_record("Biology")).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.created_at(), study_core::time::fixed_now());
    }

    #[tokio::test]
    async fn topic_insert_requires_existing_subject() {
        let repo = InMemoryRepository::with_clock(fixed_clock());
        let err = repo
            .insert_topic(NewTopicRecord {
                subject_id: SubjectId::generate(),
                title: "orphan".into(),
                is_completed: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn delete_of_absent_subject_is_success() {
        let repo = InMemoryRepository::with_clock(fixed_clock());
        repo.delete_subject(SubjectId::generate()).await.unwrap();
    }

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryRepository>();
    }
}
