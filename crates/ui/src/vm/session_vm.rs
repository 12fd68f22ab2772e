use study_core::model::{StudySession, StudySessionId};

use crate::vm::time_fmt::format_datetime;

/// UI-ready representation of a study session row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionItemVm {
    pub id: StudySessionId,
    pub duration_label: String,
    pub studied_at_str: String,
    pub notes: Option<String>,
}

impl From<&StudySession> for SessionItemVm {
    fn from(session: &StudySession) -> Self {
        Self {
            id: session.id(),
            duration_label: format!("{} min", session.duration_minutes()),
            studied_at_str: format_datetime(session.studied_at()),
            notes: session.notes().map(ToOwned::to_owned),
        }
    }
}

/// Convert loaded sessions into display rows, preserving store order.
#[must_use]
pub fn map_session_items(sessions: &[StudySession]) -> Vec<SessionItemVm> {
    sessions.iter().map(SessionItemVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::TopicId;
    use study_core::time::fixed_now;

    #[test]
    fn maps_duration_and_notes() {
        let session = StudySession::new(
            StudySessionId::generate(),
            TopicId::generate(),
            45,
            Some("reviewed chapter 2".into()),
            fixed_now(),
        )
        .unwrap();

        let vm = SessionItemVm::from(&session);
        assert_eq!(vm.duration_label, "45 min");
        assert_eq!(vm.notes.as_deref(), Some("reviewed chapter 2"));
        assert_eq!(vm.studied_at_str, "14/11/2023 22:13");
    }
}
