//! Edusched - weekly course schedules with slot conflict detection
//!
//! This library provides the schedule model, the conflict checker and
//! placement mutator, the mock data service, and the role-specific views
//! of a university department's timetable.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod utils;

// Re-export core types and traits for easier use
pub use backend::{MockBackend, ScheduleBackend};
pub use crate::core::{
    data::{CoursePlacement, Schedule, ScheduleStats, Slot, TimeSlot, Weekday},
    operations::ScheduleSession,
    role::Role,
    traits::{MutationOutcome, ScheduleCrud, ScheduleQuery},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library interface for external usage
pub struct Edusched {
    session: ScheduleSession<MockBackend>,
}

impl Edusched {
    /// Open a view of the built-in data set with the configured timings
    pub async fn open(
        config: &config::Config,
        role: Role,
        context: Option<&str>,
    ) -> utils::error::AppResult<Self> {
        let backend = match &config.general.fixtures {
            Some(path) => MockBackend::from_fixture_file(path, config.latency())?,
            None => MockBackend::builtin(config.latency()),
        };
        let context = config.context_for(role, context);
        let session =
            ScheduleSession::open(backend, role, &context, config.notification_ttl()).await?;
        Ok(Self { session })
    }

    /// Get the underlying session for direct access
    pub fn session(&mut self) -> &mut ScheduleSession<MockBackend> {
        &mut self.session
    }
}
