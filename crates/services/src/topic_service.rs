use std::sync::Arc;

use storage::repository::{NewTopicRecord, TopicRepository};
use study_core::model::{SubjectId, Topic, TopicId};

use crate::error::TopicServiceError;

/// Orchestrates topic creation, listing, completion, and deletion within a
/// subject.
#[derive(Clone)]
pub struct TopicService {
    topics: Arc<dyn TopicRepository>,
}

impl TopicService {
    #[must_use]
    pub fn new(topics: Arc<dyn TopicRepository>) -> Self {
        Self { topics }
    }

    /// Validate and persist a new topic scoped to a subject. New topics
    /// always start incomplete.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Topic` for blank titles; no store call
    /// happens in that case.
    /// Returns `TopicServiceError::Storage` if persistence fails.
    pub async fn create_topic(
        &self,
        subject_id: SubjectId,
        title: String,
    ) -> Result<Topic, TopicServiceError> {
        let title = title.trim().to_owned();
        if title.is_empty() {
            return Err(study_core::model::TopicError::EmptyTitle.into());
        }

        let topic = self
            .topics
            .insert_topic(NewTopicRecord {
                subject_id,
                title,
                is_completed: false,
            })
            .await?;
        Ok(topic)
    }

    /// List a subject's topics, oldest-first.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if repository access fails.
    pub async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, TopicServiceError> {
        let topics = self.topics.list_topics(subject_id).await?;
        Ok(topics)
    }

    /// Flip a topic's completion flag in the store. The caller reloads the
    /// collection afterwards; nothing is patched locally.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if the update fails.
    pub async fn toggle_completed(&self, topic: &Topic) -> Result<(), TopicServiceError> {
        self.topics.set_completed(topic.id(), topic.toggled()).await?;
        Ok(())
    }

    /// Delete a topic; the store cascades to its sessions.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if the delete fails.
    pub async fn delete_topic(&self, id: TopicId) -> Result<(), TopicServiceError> {
        self.topics.delete_topic(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::{InMemoryRepository, NewSubjectRecord, SubjectRepository};
    use study_core::model::{SubjectDraft, TopicError};
    use study_core::time::fixed_clock;

    async fn service_with_subject() -> (TopicService, InMemoryRepository, SubjectId) {
        let repo = InMemoryRepository::with_clock(fixed_clock());
        let subject = repo
            .insert_subject(NewSubjectRecord::from_draft(
                &SubjectDraft::new("Math", "").unwrap(),
            ))
            .await
            .unwrap();
        (
            TopicService::new(Arc::new(repo.clone())),
            repo,
            subject.id(),
        )
    }

    #[tokio::test]
    async fn create_starts_incomplete_and_trims() {
        let (service, _, subject_id) = service_with_subject().await;
        let topic = service
            .create_topic(subject_id, "  Derivatives  ".into())
            .await
            .unwrap();

        assert_eq!(topic.title(), "Derivatives");
        assert!(!topic.is_completed());
    }

    #[tokio::test]
    async fn blank_title_never_reaches_the_store() {
        let (service, _, subject_id) = service_with_subject().await;
        let err = service
            .create_topic(subject_id, " \t ".into())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TopicServiceError::Topic(TopicError::EmptyTitle)
        ));
        assert!(service.list_topics(subject_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_state() {
        let (service, _, subject_id) = service_with_subject().await;
        let topic = service
            .create_topic(subject_id, "Integrals".into())
            .await
            .unwrap();

        service.toggle_completed(&topic).await.unwrap();
        let reloaded = service.list_topics(subject_id).await.unwrap();
        assert!(reloaded[0].is_completed());

        service.toggle_completed(&reloaded[0]).await.unwrap();
        let reloaded = service.list_topics(subject_id).await.unwrap();
        assert!(!reloaded[0].is_completed());
    }
}
