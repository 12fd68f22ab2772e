use std::sync::Arc;

use storage::repository::Storage;

use crate::session_service::StudySessionService;
use crate::subject_service::SubjectService;
use crate::topic_service::TopicService;

/// Assembles the app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    subject_service: Arc<SubjectService>,
    topic_service: Arc<TopicService>,
    session_service: Arc<StudySessionService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        Self {
            subject_service: Arc::new(SubjectService::new(Arc::clone(&storage.subjects))),
            topic_service: Arc::new(TopicService::new(Arc::clone(&storage.topics))),
            session_service: Arc::new(StudySessionService::new(Arc::clone(&storage.sessions))),
        }
    }

    /// Build services over the remote store configured via the process
    /// environment. Missing configuration surfaces per-operation, not here.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(&Storage::rest_from_env())
    }

    #[must_use]
    pub fn subject_service(&self) -> Arc<SubjectService> {
        Arc::clone(&self.subject_service)
    }

    #[must_use]
    pub fn topic_service(&self) -> Arc<TopicService> {
        Arc::clone(&self.topic_service)
    }

    #[must_use]
    pub fn session_service(&self) -> Arc<StudySessionService> {
        Arc::clone(&self.session_service)
    }
}
