use std::sync::Arc;

use services::{StudySessionService, SubjectService, TopicService};

pub trait UiApp: Send + Sync {
    fn subject_service(&self) -> Arc<SubjectService>;
    fn topic_service(&self) -> Arc<TopicService>;
    fn session_service(&self) -> Arc<StudySessionService>;
}

#[derive(Clone)]
pub struct AppContext {
    subject_service: Arc<SubjectService>,
    topic_service: Arc<TopicService>,
    session_service: Arc<StudySessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            subject_service: app.subject_service(),
            topic_service: app.topic_service(),
            session_service: app.session_service(),
        }
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
