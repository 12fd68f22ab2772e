mod ids;
mod progress;
mod study_session;
mod subject;
mod topic;

pub use ids::{ParseIdError, StudySessionId, SubjectId, TopicId};
pub use progress::Progress;
pub use study_session::{SessionDraft, StudySession, StudySessionError, total_minutes};
pub use subject::{Subject, SubjectDraft, SubjectError};
pub use topic::{Topic, TopicError};
