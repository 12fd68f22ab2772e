/// Completed-topic ratio for a subject, derived from loaded topics.
///
/// Never stored; recomputed from the topic collection after every reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    completed: u32,
    total: u32,
}

impl Progress {
    #[must_use]
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }

    /// Counts completion flags over a topic collection.
    #[must_use]
    pub fn of_topics(topics: &[crate::model::Topic]) -> Self {
        let completed = topics.iter().filter(|t| t.is_completed()).count();
        Self {
            completed: u32::try_from(completed).unwrap_or(u32::MAX),
            total: u32::try_from(topics.len()).unwrap_or(u32::MAX),
        }
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Rounded percentage in 0..=100; zero when there are no topics.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = f64::from(self.completed) / f64::from(self.total);
        // completed <= total, so this stays within 0..=100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (ratio * 100.0).round() as u8
        }
    }
}
