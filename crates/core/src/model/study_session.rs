use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{StudySessionId, TopicId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudySessionError {
    #[error("study duration must be > 0 minutes")]
    InvalidDuration,
}

/// Validated input for a study session the store has not seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    duration_minutes: u32,
    notes: Option<String>,
}

impl SessionDraft {
    /// Trims the notes and rejects zero-minute durations.
    ///
    /// # Errors
    ///
    /// Returns `StudySessionError::InvalidDuration` if `duration_minutes`
    /// is zero.
    pub fn new(duration_minutes: u32, notes: impl Into<String>) -> Result<Self, StudySessionError> {
        if duration_minutes == 0 {
            return Err(StudySessionError::InvalidDuration);
        }

        let notes = notes.into();
        let notes = Some(notes.trim().to_owned()).filter(|n| !n.is_empty());

        Ok(Self {
            duration_minutes,
            notes,
        })
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// A timed, optionally annotated record of time spent on a topic.
///
/// Sessions are append-only: the application never edits or deletes one;
/// they only disappear when the store cascades a topic or subject delete.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    id: StudySessionId,
    topic_id: TopicId,
    duration_minutes: u32,
    notes: Option<String>,
    studied_at: DateTime<Utc>,
}

impl StudySession {
    /// Creates a StudySession from store-assigned identity plus user input.
    ///
    /// # Errors
    ///
    /// Returns `StudySessionError::InvalidDuration` if `duration_minutes`
    /// is zero.
    pub fn new(
        id: StudySessionId,
        topic_id: TopicId,
        duration_minutes: u32,
        notes: Option<String>,
        studied_at: DateTime<Utc>,
    ) -> Result<Self, StudySessionError> {
        if duration_minutes == 0 {
            return Err(StudySessionError::InvalidDuration);
        }

        let notes = notes.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty());

        Ok(Self {
            id,
            topic_id,
            duration_minutes,
            notes,
            studied_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> StudySessionId {
        self.id
    }

    #[must_use]
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn studied_at(&self) -> DateTime<Utc> {
        self.studied_at
    }
}

/// Total minutes across a loaded session set.
///
/// Operates on whatever has actually been loaded; a topic whose history has
/// never been fetched totals zero.
#[must_use]
pub fn total_minutes(sessions: &[StudySession]) -> u64 {
    sessions
        .iter()
        .fold(0_u64, |sum, session| {
            sum.saturating_add(u64::from(session.duration_minutes()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn build_session(minutes: u32) -> StudySession {
        StudySession::new(
            StudySessionId::generate(),
            TopicId::generate(),
            minutes,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn draft_rejects_zero_minutes() {
        let err = SessionDraft::new(0, "notes").unwrap_err();
        assert_eq!(err, StudySessionError::InvalidDuration);
    }

    #[test]
    fn draft_trims_and_filters_notes() {
        let draft = SessionDraft::new(45, "  reviewed chapter 2  ").unwrap();
        assert_eq!(draft.duration_minutes(), 45);
        assert_eq!(draft.notes(), Some("reviewed chapter 2"));

        let empty = SessionDraft::new(10, "   ").unwrap();
        assert_eq!(empty.notes(), None);
    }

    #[test]
    fn session_new_rejects_zero_minutes() {
        let err = StudySession::new(
            StudySessionId::generate(),
            TopicId::generate(),
            0,
            None,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, StudySessionError::InvalidDuration);
    }

    #[test]
    fn total_minutes_sums_loaded_sessions() {
        let sessions = vec![build_session(25), build_session(45), build_session(5)];
        assert_eq!(total_minutes(&sessions), 75);
    }

    #[test]
    fn total_minutes_of_empty_set_is_zero() {
        assert_eq!(total_minutes(&[]), 0);
    }
}
