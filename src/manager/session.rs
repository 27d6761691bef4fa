// Interactive editing session
//
// One schedule view stays loaded until the user quits, so moves and edits
// accumulate the way they do on the grid. Nothing is written anywhere.

use clap::Parser;
use tracing::{debug, info};

use crate::backend::ScheduleBackend;
use crate::cli::{Invocation, SessionCommand, SessionLine};
use crate::core::operations::ScheduleSession;
use crate::core::traits::ScheduleQuery;
use crate::manager::query::{list_schedule, redraw, report_slot, show_placement};
use crate::manager::{crud, open_session};
use crate::utils::error::{report_error, AppError, AppResult};
use crate::utils::{read_line, split_command_line, OutputStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionFlow {
    Continue,
    Quit,
}

pub async fn handle_session_command(invocation: &Invocation) -> AppResult<()> {
    let mut session = open_session(invocation).await?;
    redraw(&mut session);
    println!(
        "{}",
        OutputStyle::muted("Type 'help' for commands, 'quit' to leave. Changes are discarded on exit.")
    );

    loop {
        let prompt = format!(
            "{} {}> ",
            OutputStyle::label(session.context()),
            OutputStyle::muted(&format!("({})", session.role()))
        );
        let Some(line) = read_line(&prompt)? else {
            println!();
            break;
        };
        if line.is_empty() {
            continue;
        }

        let command = match parse_session_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                report_error(&err);
                continue;
            }
        };

        match run_session_command(&mut session, command).await {
            Ok(SessionFlow::Continue) => {}
            Ok(SessionFlow::Quit) => break,
            Err(err) => report_error(&err),
        }
    }

    info!(context = session.context(), "session closed");
    Ok(())
}

/// `Ok(None)` when clap already printed help or a usage error
fn parse_session_line(line: &str) -> AppResult<Option<SessionCommand>> {
    let words = split_command_line(line)?;
    match SessionLine::try_parse_from(words) {
        Ok(parsed) => Ok(Some(parsed.command)),
        Err(err) => {
            debug!(kind = ?err.kind(), "session line rejected");
            err.print()
                .map_err(|e| AppError::Io(format!("Failed to print usage: {}", e)))?;
            Ok(None)
        }
    }
}

pub(crate) async fn run_session_command<B: ScheduleBackend>(
    session: &mut ScheduleSession<B>,
    command: SessionCommand,
) -> AppResult<SessionFlow> {
    let role = session.role();

    match command {
        SessionCommand::Grid => redraw(session),
        SessionCommand::List(args) => list_schedule(&*session, &args, role)?,
        SessionCommand::Show(args) => show_placement(&*session, &args.id, role),
        SessionCommand::Check(args) => report_slot(&*session, &args),
        SessionCommand::Stats => OutputStyle::print_stats(&session.stats(), role),
        SessionCommand::Use { context } => {
            session.switch_context(&context).await?;
            redraw(session);
        }
        SessionCommand::Move(args) => {
            if crud::ensure_editable(role) {
                crud::apply_move(session, &args).await?;
                redraw(session);
            }
        }
        SessionCommand::Add(args) => {
            if crud::ensure_editable(role) {
                crud::apply_add(session, &args).await?;
                redraw(session);
            }
        }
        SessionCommand::Edit(args) => {
            if crud::ensure_editable(role) && crud::apply_edit(session, &args).await?.is_some() {
                redraw(session);
            }
        }
        SessionCommand::Delete(args) => {
            if crud::ensure_editable(role) && crud::apply_delete(session, &args).await? {
                redraw(session);
            }
        }
        SessionCommand::Quit => return Ok(SessionFlow::Quit),
    }

    Ok(SessionFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Slot, TimeSlot, Weekday};
    use crate::core::role::Role;
    use crate::manager::test_support::invocation;

    fn command(line: &str) -> SessionCommand {
        parse_session_line(line).unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_session_accumulates_moves() {
        let mut session = open_session(&invocation(Role::Admin)).await.unwrap();

        let flow = run_session_command(&mut session, command("move 2 Mercredi 16:00"))
            .await
            .unwrap();
        assert_eq!(flow, SessionFlow::Continue);
        run_session_command(&mut session, command("move 1 Lundi 14:00"))
            .await
            .unwrap();

        let monday_two = Slot::new(Weekday::Monday, TimeSlot::from_hour(14).unwrap());
        assert_eq!(session.check_slot(None, monday_two).unwrap().id, "1");
        assert_eq!(session.backend().journal().await.len(), 2);
    }

    #[tokio::test]
    async fn test_read_only_roles_cannot_mutate() {
        let mut session = open_session(&invocation(Role::Student)).await.unwrap();

        run_session_command(&mut session, command("move 2 Mercredi 16:00"))
            .await
            .unwrap();
        run_session_command(&mut session, command("delete 1 --force"))
            .await
            .unwrap();

        assert_eq!(session.stats().total_courses, 6);
        assert!(session.backend().journal().await.is_empty());
    }

    #[tokio::test]
    async fn test_use_and_quit() {
        let mut session = open_session(&invocation(Role::Admin)).await.unwrap();

        run_session_command(&mut session, command(r#"use "M1-INFO""#))
            .await
            .unwrap();
        assert_eq!(session.context(), "M1-INFO");
        assert!(session.schedule().is_empty());

        let flow = run_session_command(&mut session, command("quit")).await.unwrap();
        assert_eq!(flow, SessionFlow::Quit);
    }

    #[test]
    fn test_bad_lines_do_not_end_the_session() {
        assert!(parse_session_line("teleport 1").unwrap().is_none());
        assert!(parse_session_line(r#"add "Réseaux"#).is_err());
    }
}
