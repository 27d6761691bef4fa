// Command handlers
pub mod config;  // Configuration management
pub mod crud;    // Move, add, edit and delete
pub mod query;   // Views, lists, slot checks and statistics
pub mod session; // Interactive editing session

pub use config::handle_config_command;
pub use crud::{handle_add_command, handle_delete_command, handle_edit_command, handle_move_command};
pub use query::{
    handle_check_command, handle_list_command, handle_show_command, handle_stats_command,
    handle_view_command,
};
pub use session::handle_session_command;

use crate::backend::MockBackend;
use crate::cli::Invocation;
use crate::core::operations::ScheduleSession;
use crate::utils::error::AppResult;

/// Mock data service seeded from the fixture file, or the built-in data
pub(crate) fn backend_for(invocation: &Invocation) -> AppResult<MockBackend> {
    match &invocation.fixtures {
        Some(path) => MockBackend::from_fixture_file(path, invocation.latency),
        None => Ok(MockBackend::builtin(invocation.latency)),
    }
}

pub(crate) async fn open_session(invocation: &Invocation) -> AppResult<ScheduleSession<MockBackend>> {
    let backend = backend_for(invocation)?;
    ScheduleSession::open(
        backend,
        invocation.role,
        &invocation.context,
        invocation.config.notification_ttl(),
    )
    .await
}
