use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::SubjectId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject title cannot be empty")]
    EmptyTitle,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Validated input for a subject the store has not seen yet.
///
/// The remote store assigns the id and creation timestamp, so creation flows
/// carry a draft instead of a full [`Subject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    title: String,
    description: Option<String>,
}

impl SubjectDraft {
    /// Trims the inputs and rejects whitespace-only titles.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyTitle` if the title is empty or
    /// whitespace-only.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, SubjectError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SubjectError::EmptyTitle);
        }

        let description = description.into();
        let description = Some(description.trim().to_owned()).filter(|d| !d.is_empty());

        Ok(Self {
            title: title.trim().to_owned(),
            description,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// A top-level study container chosen by the user.
///
/// Subjects are never mutated after creation; they only go away whole, and
/// the store cascades the delete to their topics and study sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    id: SubjectId,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Subject {
    /// Creates a Subject from store-assigned identity plus user input.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyTitle` if the title is empty or
    /// whitespace-only.
    pub fn new(
        id: SubjectId,
        title: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, SubjectError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SubjectError::EmptyTitle);
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description,
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> SubjectId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn draft_rejects_blank_title() {
        let err = SubjectDraft::new("   ", "something").unwrap_err();
        assert_eq!(err, SubjectError::EmptyTitle);
    }

    #[test]
    fn draft_trims_title_and_description() {
        let draft = SubjectDraft::new("  Linear Algebra  ", "  matrices and spaces  ").unwrap();
        assert_eq!(draft.title(), "Linear Algebra");
        assert_eq!(draft.description(), Some("matrices and spaces"));
    }

    #[test]
    fn draft_filters_empty_description() {
        let draft = SubjectDraft::new("Chemistry", "   ").unwrap();
        assert_eq!(draft.description(), None);
    }

    #[test]
    fn subject_new_rejects_blank_title() {
        let err =
            Subject::new(SubjectId::generate(), " ", None, fixed_now()).unwrap_err();
        assert_eq!(err, SubjectError::EmptyTitle);
    }

    #[test]
    fn subject_new_happy_path() {
        let id = SubjectId::generate();
        let subject = Subject::new(
            id,
            "German B1",
            Some("verbs + phrases".into()),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(subject.id(), id);
        assert_eq!(subject.title(), "German B1");
        assert_eq!(subject.description(), Some("verbs + phrases"));
        assert_eq!(subject.created_at(), fixed_now());
    }

    #[test]
    fn subject_trims_and_filters() {
        let subject = Subject::new(
            SubjectId::generate(),
            "  Spanish  ",
            Some("   ".into()),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(subject.title(), "Spanish");
        assert_eq!(subject.description(), None);
    }
}
