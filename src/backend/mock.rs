use super::{fixtures, ChangeRecord, CommitReceipt, ScheduleBackend};
use crate::core::conflict::duplicate_slots;
use crate::core::data::{PlatformAnalytics, Schedule, ScheduleBook, Tenant};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Serves fixture data after a fixed delay and acknowledges every commit.
///
/// Commits are journaled in memory only; a new backend starts from the
/// fixtures again.
pub struct MockBackend {
    book: ScheduleBook,
    latency: Duration,
    journal: Mutex<Vec<(String, ChangeRecord)>>,
}

impl MockBackend {
    pub fn new(book: ScheduleBook, latency: Duration) -> Self {
        for schedule in &book.schedules {
            let duplicates = duplicate_slots(&schedule.placements);
            if !duplicates.is_empty() {
                warn!(
                    context = %schedule.context,
                    slots = ?duplicates.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                    "fixture schedule has duplicate slots"
                );
            }
        }

        Self {
            book,
            latency,
            journal: Mutex::new(Vec::new()),
        }
    }

    pub fn builtin(latency: Duration) -> Self {
        Self::new(fixtures::builtin_book(), latency)
    }

    pub fn from_fixture_file(path: &Path, latency: Duration) -> AppResult<Self> {
        let book = ScheduleBook::load(path)?;
        debug!(path = %path.display(), views = book.schedules.len(), "loaded fixture file");
        Ok(Self::new(book, latency))
    }

    /// Changes acknowledged so far, oldest first
    pub async fn journal(&self) -> Vec<(String, ChangeRecord)> {
        self.journal.lock().await.clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ScheduleBackend for MockBackend {
    async fn tenant(&self) -> AppResult<Tenant> {
        self.simulate_latency().await;
        Ok(self.book.tenant.clone())
    }

    async fn tenants(&self) -> AppResult<Vec<Tenant>> {
        self.simulate_latency().await;
        Ok(self.book.tenants())
    }

    async fn analytics(&self) -> AppResult<PlatformAnalytics> {
        self.simulate_latency().await;
        Ok(PlatformAnalytics::from_tenants(&self.book.tenants()))
    }

    async fn contexts(&self) -> AppResult<Vec<String>> {
        self.simulate_latency().await;
        Ok(self.book.contexts())
    }

    async fn fetch_schedule(&self, context: &str) -> AppResult<Schedule> {
        self.simulate_latency().await;
        if context.trim().is_empty() {
            return Err(AppError::Backend("schedule context cannot be empty".to_string()));
        }
        Ok(self
            .book
            .schedule(context)
            .cloned()
            .unwrap_or_else(|| Schedule::new(context)))
    }

    async fn commit(&self, context: &str, change: &ChangeRecord) -> AppResult<CommitReceipt> {
        self.simulate_latency().await;

        let receipt = CommitReceipt {
            context: context.to_string(),
            placement_id: change.placement_id().to_string(),
            committed_at: Utc::now(),
        };
        self.journal
            .lock()
            .await
            .push((context.to_string(), change.clone()));
        match serde_json::to_string(change) {
            Ok(payload) => debug!(context, %payload, "change acknowledged"),
            Err(e) => warn!(context, placement = %receipt.placement_id, error = %e, "unserializable change"),
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_and_unknown_views() {
        let backend = MockBackend::builtin(Duration::ZERO);

        let l3 = backend.fetch_schedule("L3-INFO").await.unwrap();
        assert_eq!(l3.len(), 6);

        let unknown = backend.fetch_schedule("M3-BIO").await.unwrap();
        assert_eq!(unknown.context, "M3-BIO");
        assert!(unknown.is_empty());

        assert!(backend.fetch_schedule("  ").await.is_err());
        assert!(backend.contexts().await.unwrap().contains(&"Prof. Jean Dupont".to_string()));
        assert_eq!(backend.tenant().await.unwrap().id, "ufr-sciences");
    }

    #[tokio::test]
    async fn test_platform_directory_and_analytics() {
        let backend = MockBackend::builtin(Duration::ZERO);

        let tenants = backend.tenants().await.unwrap();
        assert_eq!(tenants.len(), 5);
        assert_eq!(tenants[0].id, "ufr-sciences");
        assert!(tenants.iter().any(|t| t.id == "ufr-medecine"));

        let analytics = backend.analytics().await.unwrap();
        assert_eq!(analytics.total_tenants, 5);
        assert_eq!(analytics.active_tenants, 3);
        assert_eq!(analytics.trial_tenants, 2);
        assert_eq!(analytics.total_users, 45 + 18 + 41 + 9 + 48);
        assert_eq!(analytics.monthly_revenue, 87);
    }

    #[tokio::test]
    async fn test_commit_is_journaled_not_applied() {
        let backend = MockBackend::builtin(Duration::from_millis(5));

        let change = ChangeRecord::Removed { id: "1".to_string() };
        let receipt = backend.commit("L3-INFO", &change).await.unwrap();
        assert_eq!(receipt.placement_id, "1");
        assert_eq!(receipt.context, "L3-INFO");

        let journal = backend.journal().await;
        assert_eq!(journal, vec![("L3-INFO".to_string(), change)]);

        // fixtures stay as seeded
        assert_eq!(backend.fetch_schedule("L3-INFO").await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_fixture_file_loading() {
        let path = std::env::temp_dir().join(format!("edusched-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[tenant]
id = "ufr-medecine"
name = "UFR Médecine"
domain = "medecine.univ-lyon.fr"
plan = "trial"
user_count = 23
max_users = 25

[[schedules]]
context = "P1-MED"

[[schedules.placements]]
id = "m1"
subject = "Anatomie"
secondaryLabel = "Prof. Morel"
room = "Amphi A"
day = "Mardi"
startTime = "10:00"
endTime = "12:00"
"#,
        )
        .unwrap();

        let backend = MockBackend::from_fixture_file(&path, Duration::ZERO).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(backend.contexts().await.unwrap(), vec!["P1-MED".to_string()]);
        assert_eq!(backend.tenant().await.unwrap().name, "UFR Médecine");
        assert!(MockBackend::from_fixture_file(&path, Duration::ZERO).is_err());
    }
}
