pub mod fixtures;
pub mod mock;

use crate::core::data::{CoursePlacement, PlatformAnalytics, Schedule, Tenant};
use crate::utils::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use mock::MockBackend;

/// A change the session asks the backend to acknowledge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ChangeRecord {
    Added(CoursePlacement),
    Updated(CoursePlacement),
    Removed { id: String },
}

impl ChangeRecord {
    pub fn placement_id(&self) -> &str {
        match self {
            ChangeRecord::Added(p) | ChangeRecord::Updated(p) => &p.id,
            ChangeRecord::Removed { id } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub context: String,
    pub placement_id: String,
    pub committed_at: DateTime<Utc>,
}

/// The asynchronous data-service boundary
#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    /// The tenant whose schedules this service holds
    async fn tenant(&self) -> AppResult<Tenant>;
    /// Every tenant of the platform, super admin only
    async fn tenants(&self) -> AppResult<Vec<Tenant>>;
    async fn analytics(&self) -> AppResult<PlatformAnalytics>;
    async fn contexts(&self) -> AppResult<Vec<String>>;
    async fn fetch_schedule(&self, context: &str) -> AppResult<Schedule>;
    async fn commit(&self, context: &str, change: &ChangeRecord) -> AppResult<CommitReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures::builtin_book;

    #[test]
    fn test_change_record_payload_is_tagged_by_op() {
        let removed = ChangeRecord::Removed { id: "1".to_string() };
        assert_eq!(
            serde_json::to_value(&removed).unwrap(),
            serde_json::json!({ "op": "removed", "id": "1" })
        );

        let book = builtin_book();
        let course = book.schedule("L3-INFO").unwrap().placements[0].clone();
        let payload = serde_json::to_value(ChangeRecord::Updated(course)).unwrap();
        assert_eq!(payload["op"], "updated");
        assert_eq!(payload["id"], "1");
        assert_eq!(payload["day"], "Lundi");
        assert_eq!(payload["startTime"], "08:00");
    }
}
