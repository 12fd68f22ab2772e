use std::env;
use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::repository::{
    Storage, StorageError, StudySessionRepository, SubjectRepository, TopicRepository,
};

mod rows;
mod session_repo;
mod subject_repo;
mod topic_repo;

pub(crate) const SUBJECTS_TABLE: &str = "subjects";
pub(crate) const TOPICS_TABLE: &str = "topics";
pub(crate) const SESSIONS_TABLE: &str = "study_sessions";

/// Connection settings for the remote table store.
#[derive(Clone, Debug)]
pub struct RestConfig {
    pub base_url: String,
    pub api_key: String,
}

impl RestConfig {
    /// Read `STUDY_STORE_URL` / `STUDY_STORE_KEY` from the environment.
    ///
    /// Returns `None` when either is missing or blank; the repository still
    /// constructs and every call fails with `StorageError::NotConfigured`
    /// instead of crashing startup.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::resolve(
            env::var("STUDY_STORE_URL").ok(),
            env::var("STUDY_STORE_KEY").ok(),
        )
    }

    #[must_use]
    pub fn resolve(base_url: Option<String>, api_key: Option<String>) -> Option<Self> {
        let base_url = base_url?.trim().to_owned();
        let api_key = api_key?.trim().to_owned();
        if base_url.is_empty() || api_key.is_empty() {
            return None;
        }
        Some(Self { base_url, api_key })
    }
}

/// Client for a PostgREST-compatible table store.
///
/// One generic operation per verb; the per-table repository impls build
/// their own filter/order parameters on top.
#[derive(Clone)]
pub struct RestRepository {
    client: Client,
    config: Option<RestConfig>,
}

impl RestRepository {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(RestConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<RestConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn configured(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> Result<&RestConfig, StorageError> {
        self.config.as_ref().ok_or(StorageError::NotConfigured)
    }

    pub(crate) async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StorageError> {
        let config = self.config()?;
        let response = self
            .client
            .get(table_url(&config.base_url, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::HttpStatus(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    pub(crate) async fn insert_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StorageError> {
        let config = self.config()?;
        let response = self
            .client
            .post(table_url(&config.base_url, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            // Returns the created row, so the server-assigned id and
            // timestamp come back with the response.
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::HttpStatus(response.status()));
        }

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if rows.is_empty() {
            return Err(StorageError::Serialization(
                "insert returned no rows".into(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    pub(crate) async fn patch_by_id<B: Serialize>(
        &self,
        table: &str,
        id: Uuid,
        body: &B,
    ) -> Result<(), StorageError> {
        let config = self.config()?;
        let response = self
            .client
            .patch(table_url(&config.base_url, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{id}"))])
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::HttpStatus(response.status()));
        }
        Ok(())
    }

    pub(crate) async fn delete_by_id(&self, table: &str, id: Uuid) -> Result<(), StorageError> {
        let config = self.config()?;
        let response = self
            .client
            .delete(table_url(&config.base_url, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        // A filter matching zero rows still returns 2xx; deleting an
        // already-gone row is a success.
        if !response.status().is_success() {
            return Err(StorageError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/{table}", base_url.trim_end_matches('/'))
}

impl Storage {
    /// Build a `Storage` backed by the remote table store configured via
    /// `STUDY_STORE_URL` / `STUDY_STORE_KEY`.
    ///
    /// Missing configuration is not an error here: operations fail
    /// per-call with `StorageError::NotConfigured`.
    #[must_use]
    pub fn rest_from_env() -> Self {
        Self::rest(RestRepository::from_env())
    }

    #[must_use]
    pub fn rest(repo: RestRepository) -> Self {
        let subjects: Arc<dyn SubjectRepository> = Arc::new(repo.clone());
        let topics: Arc<dyn TopicRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn StudySessionRepository> = Arc::new(repo);
        Self {
            subjects,
            topics,
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SubjectRepository;

    #[test]
    fn resolve_requires_both_values() {
        assert!(RestConfig::resolve(None, Some("key".into())).is_none());
        assert!(RestConfig::resolve(Some("url".into()), None).is_none());
        assert!(RestConfig::resolve(Some("  ".into()), Some("key".into())).is_none());
        assert!(RestConfig::resolve(Some("url".into()), Some("".into())).is_none());

        let config = RestConfig::resolve(
            Some(" https://db.example.com/rest/v1 ".into()),
            Some(" secret ".into()),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://db.example.com/rest/v1");
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn table_url_joins_without_double_slash() {
        assert_eq!(
            table_url("https://db.example.com/rest/v1/", SUBJECTS_TABLE),
            "https://db.example.com/rest/v1/subjects"
        );
        assert_eq!(
            table_url("https://db.example.com/rest/v1", TOPICS_TABLE),
            "https://db.example.com/rest/v1/topics"
        );
    }

    #[tokio::test]
    async fn unconfigured_calls_fail_per_operation() {
        let repo = RestRepository::new(None);
        assert!(!repo.configured());

        let err = repo.list_subjects().await.unwrap_err();
        assert!(matches!(err, StorageError::NotConfigured));
    }

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestRepository>();
    }
}
