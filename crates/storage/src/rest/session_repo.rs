use study_core::model::{StudySession, TopicId};

use super::rows::{NewSessionBody, SessionRow, session_from_row};
use super::{RestRepository, SESSIONS_TABLE};
use crate::repository::{NewSessionRecord, StorageError, StudySessionRepository};

#[async_trait::async_trait]
impl StudySessionRepository for RestRepository {
    async fn insert_session(
        &self,
        record: NewSessionRecord,
    ) -> Result<StudySession, StorageError> {
        let body = NewSessionBody {
            topic_id: record.topic_id,
            duration_minutes: record.duration_minutes,
            notes: record.notes.as_deref().unwrap_or(""),
        };
        let row: SessionRow = self.insert_returning(SESSIONS_TABLE, &body).await?;
        session_from_row(row)
    }

    async fn list_sessions(&self, topic_id: TopicId) -> Result<Vec<StudySession>, StorageError> {
        let rows: Vec<SessionRow> = self
            .fetch_rows(
                SESSIONS_TABLE,
                &[
                    ("select", "*".to_owned()),
                    ("topic_id", format!("eq.{topic_id}")),
                    ("order", "studied_at.desc".to_owned()),
                ],
            )
            .await?;

        rows.into_iter().map(session_from_row).collect()
    }
}
