use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::core::data::{ColorTag, TimeSlot, Weekday};
use crate::core::mutator::{NewPlacement, PlacementEdit};
use crate::core::role::Role;
use crate::manager;
use crate::utils::error::AppResult;

#[derive(Parser)]
#[command(name = "edusched")]
#[command(about = "Weekly course schedule manager with slot conflict detection")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub debug: bool,

    #[arg(short, long, value_enum, help = "View to render (defaults to the configured role)")]
    pub role: Option<Role>,

    #[arg(short = 'x', long, help = "Promotion code or teacher name")]
    pub context: Option<String>,

    #[arg(long, value_name = "FILE", help = "TOML fixture file to seed the mock data service")]
    pub fixtures: Option<PathBuf>,

    #[arg(long, help = "Skip the simulated network delay")]
    pub no_latency: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Everything a command needs, resolved once from flags and config
#[derive(Debug, Clone)]
pub struct Invocation {
    pub config: Config,
    pub role: Role,
    pub context: String,
    pub fixtures: Option<PathBuf>,
    pub latency: Duration,
}

impl Cli {
    pub fn invocation(&self, config: Config) -> Invocation {
        let role = self.role.unwrap_or(config.general.role);
        let context = config.context_for(role, self.context.as_deref());
        let fixtures = self.fixtures.clone().or_else(|| config.general.fixtures.clone());
        let latency = if self.no_latency {
            Duration::ZERO
        } else {
            config.latency()
        };

        Invocation {
            config,
            role,
            context,
            fixtures,
            latency,
        }
    }
}

impl Commands {
    pub async fn execute(self, invocation: Invocation) -> AppResult<()> {
        match self {
            Commands::View => manager::handle_view_command(&invocation).await,
            Commands::List(args) => manager::handle_list_command(&invocation, &args).await,
            Commands::Show(args) => manager::handle_show_command(&invocation, &args).await,
            Commands::Check(args) => manager::handle_check_command(&invocation, &args).await,
            Commands::Stats => manager::handle_stats_command(&invocation).await,
            Commands::Move(args) => manager::handle_move_command(&invocation, &args).await,
            Commands::Add(args) => manager::handle_add_command(&invocation, &args).await,
            Commands::Edit(args) => manager::handle_edit_command(&invocation, &args).await,
            Commands::Delete(args) => manager::handle_delete_command(&invocation, &args).await,
            Commands::Session => manager::handle_session_command(&invocation).await,
            Commands::Config(args) => manager::handle_config_command(invocation.config, args.command),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the current role's screen
    View,

    /// List the courses of a schedule view
    List(ListArgs),

    /// Show course details
    Show(ShowArgs),

    /// Check whether a slot is free
    Check(CheckArgs),

    /// Show schedule statistics
    Stats,

    /// Move a course to another slot (drag and drop)
    Move(MoveArgs),

    /// Add a course
    Add(AddArgs),

    /// Edit a course
    Edit(EditArgs),

    /// Delete a course
    Delete(DeleteArgs),

    /// Start an interactive editing session
    Session,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Clone)]
pub struct ListArgs {
    #[arg(short, long, value_enum)]
    pub format: Option<ListFormat>,
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    #[arg(help = "Course ID")]
    pub id: String,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    #[arg(help = "Day (Lundi..Vendredi)")]
    pub day: Weekday,

    #[arg(help = "Start time (08:00..18:00)")]
    pub time: TimeSlot,

    #[arg(long, help = "Course being moved, ignored when checking")]
    pub moving: Option<String>,
}

#[derive(Args, Clone)]
pub struct MoveArgs {
    #[arg(help = "Course ID")]
    pub id: String,

    #[arg(help = "Target day (Lundi..Vendredi)")]
    pub day: Weekday,

    #[arg(help = "Target start time (08:00..18:00)")]
    pub time: TimeSlot,
}

#[derive(Args, Clone)]
pub struct AddArgs {
    #[arg(help = "Subject")]
    pub subject: String,

    #[arg(short, long, visible_alias = "promotion", help = "Teacher name, or promotion code in a teacher view")]
    pub teacher: String,

    #[arg(short, long)]
    pub room: String,

    #[arg(short, long, default_value = "Lundi")]
    pub day: Weekday,

    #[arg(short, long, default_value = "08:00")]
    pub start: TimeSlot,

    #[arg(short, long, default_value = "10:00")]
    pub end: TimeSlot,
}

impl AddArgs {
    pub fn to_new_placement(&self) -> NewPlacement {
        NewPlacement {
            subject: self.subject.clone(),
            secondary_label: self.teacher.clone(),
            room: self.room.clone(),
            day: self.day,
            start_time: self.start,
            end_time: self.end,
        }
    }
}

#[derive(Args, Clone)]
pub struct EditArgs {
    #[arg(help = "Course ID")]
    pub id: String,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(short, long, visible_alias = "promotion")]
    pub teacher: Option<String>,

    #[arg(short, long)]
    pub room: Option<String>,

    #[arg(short, long)]
    pub day: Option<Weekday>,

    #[arg(short, long)]
    pub start: Option<TimeSlot>,

    #[arg(short, long)]
    pub end: Option<TimeSlot>,

    #[arg(long, value_enum)]
    pub color: Option<ColorTag>,
}

impl EditArgs {
    pub fn to_edit(&self) -> PlacementEdit {
        PlacementEdit {
            subject: self.subject.clone(),
            secondary_label: self.teacher.clone(),
            room: self.room.clone(),
            day: self.day,
            start_time: self.start,
            end_time: self.end,
            color: self.color,
        }
    }
}

#[derive(Args, Clone)]
pub struct DeleteArgs {
    #[arg(help = "Course ID")]
    pub id: String,

    #[arg(short, long)]
    pub force: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ListFormat {
    Simple,
    Detailed,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Commands accepted inside `edusched session`
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Redraw the grid
    Grid,
    /// List courses
    List(ListArgs),
    /// Show course details
    Show(ShowArgs),
    /// Check whether a slot is free
    Check(CheckArgs),
    /// Show statistics
    Stats,
    /// Move a course (drag and drop)
    Move(MoveArgs),
    /// Add a course
    Add(AddArgs),
    /// Edit a course
    Edit(EditArgs),
    /// Delete a course
    Delete(DeleteArgs),
    /// Switch to another promotion or teacher
    Use {
        #[arg(help = "Promotion code or teacher name")]
        context: String,
    },
    /// Leave the session; changes are discarded
    #[command(alias = "exit")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
        SessionLine::command().debug_assert();
    }

    #[test]
    fn test_move_args_parse_labels() {
        let cli = Cli::try_parse_from(["edusched", "move", "2", "mercredi", "09:00"]).unwrap();
        match cli.command {
            Commands::Move(args) => {
                assert_eq!(args.id, "2");
                assert_eq!(args.day, Weekday::Wednesday);
                assert_eq!(args.time, TimeSlot::from_hour(9).unwrap());
            }
            _ => panic!("expected move"),
        }

        assert!(Cli::try_parse_from(["edusched", "move", "2", "Samedi", "09:00"]).is_err());
        assert!(Cli::try_parse_from(["edusched", "move", "2", "Lundi", "09:30"]).is_err());
    }

    #[test]
    fn test_add_args_defaults() {
        let cli = Cli::try_parse_from([
            "edusched", "add", "Compilation", "--teacher", "Prof. Martin", "--room", "B205",
        ])
        .unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        let new = args.to_new_placement();
        assert_eq!(new.day, Weekday::Monday);
        assert_eq!(new.start_time.label(), "08:00");
        assert_eq!(new.end_time.label(), "10:00");
        assert_eq!(new.secondary_label, "Prof. Martin");
    }

    #[test]
    fn test_edit_args_map_to_partial_edit() {
        let cli = Cli::try_parse_from(["edusched", "edit", "3", "--room", "A102", "--color", "cyan"]).unwrap();
        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        let edit = args.to_edit();
        assert_eq!(edit.room.as_deref(), Some("A102"));
        assert_eq!(edit.color, Some(ColorTag::Cyan));
        assert!(edit.day.is_none());
        assert!(!edit.is_empty());
    }

    #[test]
    fn test_invocation_resolution() {
        let cli = Cli::try_parse_from(["edusched", "--role", "teacher", "--no-latency", "stats"]).unwrap();
        let invocation = cli.invocation(Config::default());
        assert_eq!(invocation.role, Role::Teacher);
        assert_eq!(invocation.context, "Prof. Jean Dupont");
        assert_eq!(invocation.latency, Duration::ZERO);

        let cli = Cli::try_parse_from(["edusched", "-x", "M1-INFO", "view"]).unwrap();
        let invocation = cli.invocation(Config::default());
        assert_eq!(invocation.role, Role::Admin);
        assert_eq!(invocation.context, "M1-INFO");
        assert_eq!(invocation.latency, Duration::from_secs(1));
    }

    #[test]
    fn test_session_line_parsing() {
        let line = SessionLine::try_parse_from(["move", "2", "Lundi", "08:00"]).unwrap();
        assert!(matches!(line.command, SessionCommand::Move(_)));

        let line = SessionLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, SessionCommand::Quit));

        let line = SessionLine::try_parse_from(["use", "Prof. Jean Dupont"]).unwrap();
        match line.command {
            SessionCommand::Use { context } => assert_eq!(context, "Prof. Jean Dupont"),
            _ => panic!("expected use"),
        }
    }
}
