//! In-memory learning feed for testing.
//!
//! Records every published delta report so tests can assert the core
//! produced the expected learning signal.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::DomainError;
use crate::domain::outcome::DeltaReport;
use crate::ports::LearningFeed;

/// In-memory learning feed.
#[derive(Debug, Default)]
pub struct InMemoryLearningFeed {
    reports: Mutex<Vec<DeltaReport>>,
    fail: bool,
}

impl InMemoryLearningFeed {
    /// Creates a feed that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a feed that rejects every publish, for failure-path tests.
    pub fn failing() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All reports published so far.
    pub fn reports(&self) -> Vec<DeltaReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl LearningFeed for InMemoryLearningFeed {
    async fn publish(&self, report: &DeltaReport) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::dependency("Learning feed unavailable"));
        }
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}
