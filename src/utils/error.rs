use crate::core::data::Slot;
use crate::utils::output::OutputStyle;
use thiserror::Error;

/// Errors raised by the placement mutator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Slot {slot} is already taken by '{occupant}'")]
    SlotConflict { slot: Slot, occupant: String },

    #[error("Placement '{0}' not found")]
    NotFound(String),

    #[error("Invalid placement: {0}")]
    Validation(String),
}

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

pub enum FlowResult {
    NotFound {
        item_type: String,
        search_term: String,
    },
    EmptyList {
        item_type: String,
    },
    Cancelled(String),
    Success(String),
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Schedule(ScheduleError::SlotConflict { .. }) => {
            eprintln!("⛔ {}", OutputStyle::error(&err.to_string()));
        }
        AppError::Schedule(e) => {
            eprintln!("⚠️  {}", OutputStyle::warning(&e.to_string()));
        }
        AppError::Backend(msg) => {
            eprintln!("🌐 {}", OutputStyle::error(&format!("Backend: {}", msg)));
        }
        AppError::Config(msg) | AppError::Parse(msg) => {
            eprintln!("⚙️  {}", OutputStyle::warning(msg));
        }
        AppError::Io(msg) | AppError::System(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::NotFound {
            item_type,
            search_term,
        } => {
            let msg = format!("{} '{}' not found", item_type, search_term);
            println!("⚠️  {}", OutputStyle::warning(&msg));
        }
        FlowResult::EmptyList { item_type } => {
            let msg = format!("No {} found", item_type);
            println!("{}", OutputStyle::muted(&msg));
        }
        FlowResult::Cancelled(msg) => {
            println!("⏹️  {}", OutputStyle::muted(&msg));
        }
        FlowResult::Success(msg) => {
            println!("✅ {}", OutputStyle::success(&msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{TimeSlot, Weekday};

    #[test]
    fn test_conflict_message_names_slot_and_occupant() {
        let err = ScheduleError::SlotConflict {
            slot: Slot::new(Weekday::Monday, TimeSlot::from_hour(8).unwrap()),
            occupant: "Mathématiques".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Slot Lundi 08:00 is already taken by 'Mathématiques'"
        );

        let app: AppError = err.clone().into();
        assert_eq!(app.to_string(), err.to_string());
    }
}
