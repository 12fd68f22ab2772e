use std::sync::Arc;

use storage::repository::{NewSessionRecord, StudySessionRepository};
use study_core::model::{SessionDraft, StudySession, TopicId};

use crate::error::SessionServiceError;

/// Orchestrates study-session logging and history loading for a topic.
#[derive(Clone)]
pub struct StudySessionService {
    sessions: Arc<dyn StudySessionRepository>,
}

impl StudySessionService {
    #[must_use]
    pub fn new(sessions: Arc<dyn StudySessionRepository>) -> Self {
        Self { sessions }
    }

    /// Persist a validated session draft against a topic, returning the
    /// stored row with its server-assigned id and `studied_at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` if persistence fails.
    pub async fn log_session(
        &self,
        topic_id: TopicId,
        draft: SessionDraft,
    ) -> Result<StudySession, SessionServiceError> {
        let session = self
            .sessions
            .insert_session(NewSessionRecord::from_draft(topic_id, &draft))
            .await?;
        Ok(session)
    }

    /// List a topic's sessions, newest-first. Callers load lazily: nothing
    /// fetches history until the user asks for it.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` if repository access fails.
    pub async fn list_sessions(
        &self,
        topic_id: TopicId,
    ) -> Result<Vec<StudySession>, SessionServiceError> {
        let sessions = self.sessions.list_sessions(topic_id).await?;
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::{
        InMemoryRepository, NewSubjectRecord, NewTopicRecord, SubjectRepository, TopicRepository,
    };
    use study_core::model::{SubjectDraft, total_minutes};
    use study_core::time::fixed_clock;

    async fn service_with_topic() -> (StudySessionService, TopicId) {
        let repo = InMemoryRepository::with_clock(fixed_clock());
        let subject = repo
            .insert_subject(NewSubjectRecord::from_draft(
                &SubjectDraft::new("Math", "").unwrap(),
            ))
            .await
            .unwrap();
        let topic = repo
            .insert_topic(NewTopicRecord {
                subject_id: subject.id(),
                title: "Limits".into(),
                is_completed: false,
            })
            .await
            .unwrap();
        (StudySessionService::new(Arc::new(repo)), topic.id())
    }

    #[tokio::test]
    async fn log_session_persists_and_totals() {
        let (service, topic_id) = service_with_topic().await;

        let session = service
            .log_session(
                topic_id,
                SessionDraft::new(45, "reviewed chapter 2").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(session.duration_minutes(), 45);
        assert_eq!(session.notes(), Some("reviewed chapter 2"));

        let loaded = service.list_sessions(topic_id).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(total_minutes(&loaded), 45);
    }

    #[tokio::test]
    async fn history_of_unknown_topic_is_empty() {
        let (service, _) = service_with_topic().await;
        let loaded = service.list_sessions(TopicId::generate()).await.unwrap();
        assert!(loaded.is_empty());
    }
}
