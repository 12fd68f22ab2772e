use study_core::model::{SubjectId, Topic, TopicId};

use super::rows::{CompletedPatch, NewTopicBody, TopicRow, topic_from_row};
use super::{RestRepository, TOPICS_TABLE};
use crate::repository::{NewTopicRecord, StorageError, TopicRepository};

#[async_trait::async_trait]
impl TopicRepository for RestRepository {
    async fn insert_topic(&self, record: NewTopicRecord) -> Result<Topic, StorageError> {
        let body = NewTopicBody {
            subject_id: record.subject_id,
            title: &record.title,
            is_completed: record.is_completed,
        };
        let row: TopicRow = self.insert_returning(TOPICS_TABLE, &body).await?;
        topic_from_row(row)
    }

    async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, StorageError> {
        let rows: Vec<TopicRow> = self
            .fetch_rows(
                TOPICS_TABLE,
                &[
                    ("select", "*".to_owned()),
                    ("subject_id", format!("eq.{subject_id}")),
                    ("order", "created_at.asc".to_owned()),
                ],
            )
            .await?;

        rows.into_iter().map(topic_from_row).collect()
    }

    async fn set_completed(&self, id: TopicId, is_completed: bool) -> Result<(), StorageError> {
        self.patch_by_id(TOPICS_TABLE, id.value(), &CompletedPatch { is_completed })
            .await
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), StorageError> {
        self.delete_by_id(TOPICS_TABLE, id.value()).await
    }
}
