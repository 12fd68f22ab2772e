use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{SubjectId, TopicId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic title cannot be empty")]
    EmptyTitle,
}

/// A learnable unit inside a subject, with a completion flag.
///
/// The only mutation a topic ever sees is toggling `is_completed`; the flag
/// feeds the subject's progress percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    id: TopicId,
    subject_id: SubjectId,
    title: String,
    is_completed: bool,
    created_at: DateTime<Utc>,
}

impl Topic {
    /// Creates a Topic from store-assigned identity plus user input.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyTitle` if the title is empty or
    /// whitespace-only.
    pub fn new(
        id: TopicId,
        subject_id: SubjectId,
        title: impl Into<String>,
        is_completed: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TopicError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TopicError::EmptyTitle);
        }

        Ok(Self {
            id,
            subject_id,
            title: title.trim().to_owned(),
            is_completed,
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> TopicId {
        self.id
    }

    #[must_use]
    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The completion state a toggle would write for this topic.
    #[must_use]
    pub fn toggled(&self) -> bool {
        !self.is_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn subject_id() -> SubjectId {
        SubjectId::generate()
    }

    #[test]
    fn topic_new_rejects_blank_title() {
        let err = Topic::new(TopicId::generate(), subject_id(), "\t ", false, fixed_now())
            .unwrap_err();
        assert_eq!(err, TopicError::EmptyTitle);
    }

    #[test]
    fn topic_new_trims_title() {
        let topic = Topic::new(
            TopicId::generate(),
            subject_id(),
            "  Eigenvalues  ",
            false,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(topic.title(), "Eigenvalues");
        assert!(!topic.is_completed());
    }

    #[test]
    fn toggled_flips_state() {
        let topic = Topic::new(
            TopicId::generate(),
            subject_id(),
            "Chain rule",
            false,
            fixed_now(),
        )
        .unwrap();
        assert!(topic.toggled());

        let done = Topic::new(
            TopicId::generate(),
            subject_id(),
            "Chain rule",
            true,
            fixed_now(),
        )
        .unwrap();
        assert!(!done.toggled());
    }
}
