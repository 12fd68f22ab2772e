use study_core::model::{Subject, SubjectId};

use super::rows::{NewSubjectBody, SubjectRow, subject_from_row};
use super::{RestRepository, SUBJECTS_TABLE};
use crate::repository::{NewSubjectRecord, StorageError, SubjectRepository};

#[async_trait::async_trait]
impl SubjectRepository for RestRepository {
    async fn insert_subject(&self, record: NewSubjectRecord) -> Result<Subject, StorageError> {
        let body = NewSubjectBody {
            title: &record.title,
            description: record.description.as_deref().unwrap_or(""),
        };
        let row: SubjectRow = self.insert_returning(SUBJECTS_TABLE, &body).await?;
        subject_from_row(row)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let rows: Vec<SubjectRow> = self
            .fetch_rows(
                SUBJECTS_TABLE,
                &[
                    ("select", "*".to_owned()),
                    ("order", "created_at.desc".to_owned()),
                ],
            )
            .await?;

        rows.into_iter().map(subject_from_row).collect()
    }

    async fn delete_subject(&self, id: SubjectId) -> Result<(), StorageError> {
        // Topics and their sessions go with it; the cascade is a store
        // constraint, not an application concern.
        self.delete_by_id(SUBJECTS_TABLE, id.value()).await
    }
}
