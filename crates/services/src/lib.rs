#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod session_service;
pub mod subject_service;
pub mod topic_service;

pub use app_services::AppServices;
pub use error::{SessionServiceError, SubjectServiceError, TopicServiceError};
pub use session_service::StudySessionService;
pub use subject_service::SubjectService;
pub use topic_service::TopicService;
