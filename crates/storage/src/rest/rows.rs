use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use study_core::model::{
    StudySession, StudySessionId, Subject, SubjectId, Topic, TopicId,
};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

//
// ─── ROWS ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectRow {
    pub id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicRow {
    pub id: TopicId,
    pub subject_id: SubjectId,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionRow {
    pub id: StudySessionId,
    pub topic_id: TopicId,
    pub duration_minutes: u32,
    pub notes: Option<String>,
    pub studied_at: DateTime<Utc>,
}

pub(crate) fn subject_from_row(row: SubjectRow) -> Result<Subject, StorageError> {
    Subject::new(row.id, row.title, row.description, row.created_at).map_err(ser)
}

pub(crate) fn topic_from_row(row: TopicRow) -> Result<Topic, StorageError> {
    Topic::new(
        row.id,
        row.subject_id,
        row.title,
        row.is_completed,
        row.created_at,
    )
    .map_err(ser)
}

pub(crate) fn session_from_row(row: SessionRow) -> Result<StudySession, StorageError> {
    StudySession::new(
        row.id,
        row.topic_id,
        row.duration_minutes,
        row.notes,
        row.studied_at,
    )
    .map_err(ser)
}

//
// ─── INSERT / PATCH BODIES ─────────────────────────────────────────────────────
//

// Bodies omit id and timestamp columns so the store assigns them.

#[derive(Debug, Serialize)]
pub(crate) struct NewSubjectBody<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewTopicBody<'a> {
    pub subject_id: SubjectId,
    pub title: &'a str,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewSessionBody<'a> {
    pub topic_id: TopicId,
    pub duration_minutes: u32,
    pub notes: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletedPatch {
    pub is_completed: bool,
}
