use std::sync::Arc;

use storage::repository::{NewSubjectRecord, SubjectRepository};
use study_core::model::{Subject, SubjectDraft, SubjectId};

use crate::error::SubjectServiceError;

/// Orchestrates subject creation, listing, and deletion.
#[derive(Clone)]
pub struct SubjectService {
    subjects: Arc<dyn SubjectRepository>,
}

impl SubjectService {
    #[must_use]
    pub fn new(subjects: Arc<dyn SubjectRepository>) -> Self {
        Self { subjects }
    }

    /// Validate and persist a new subject, returning the stored row with
    /// its server-assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `SubjectServiceError::Subject` for blank titles; no store
    /// call happens in that case.
    /// Returns `SubjectServiceError::Storage` if persistence fails.
    pub async fn create_subject(
        &self,
        title: String,
        description: String,
    ) -> Result<Subject, SubjectServiceError> {
        let draft = SubjectDraft::new(title, description)?;
        let subject = self
            .subjects
            .insert_subject(NewSubjectRecord::from_draft(&draft))
            .await?;
        Ok(subject)
    }

    /// List all subjects, newest-first.
    ///
    /// # Errors
    ///
    /// Returns `SubjectServiceError::Storage` if repository access fails.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, SubjectServiceError> {
        let subjects = self.subjects.list_subjects().await?;
        Ok(subjects)
    }

    /// Delete a subject; the store cascades to topics and sessions.
    ///
    /// # Errors
    ///
    /// Returns `SubjectServiceError::Storage` if the delete fails.
    pub async fn delete_subject(&self, id: SubjectId) -> Result<(), SubjectServiceError> {
        self.subjects.delete_subject(id).await?;
        Ok(())
    }
}
