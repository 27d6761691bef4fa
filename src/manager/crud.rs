// CRUD operations - Move, Add, Edit, Delete
//
// The one-shot commands open a fresh session, apply a single change and
// redraw. The interactive session reuses the `apply_*` helpers.

use crate::backend::ScheduleBackend;
use crate::cli::{AddArgs, DeleteArgs, EditArgs, Invocation, MoveArgs};
use crate::core::data::Slot;
use crate::core::mutator::DropOutcome;
use crate::core::operations::ScheduleSession;
use crate::core::role::Role;
use crate::core::traits::{MutationOutcome, ScheduleCrud, ScheduleQuery};
use crate::manager::open_session;
use crate::manager::query::redraw;
use crate::utils::error::{handle_flow, AppResult, FlowResult};
use crate::utils::{print_warning, prompt_yes_no, OutputStyle};

pub async fn handle_move_command(invocation: &Invocation, args: &MoveArgs) -> AppResult<()> {
    if !ensure_editable(invocation.role) {
        return Ok(());
    }
    let mut session = open_session(invocation).await?;
    apply_move(&mut session, args).await?;
    finish(&mut session);
    Ok(())
}

pub async fn handle_add_command(invocation: &Invocation, args: &AddArgs) -> AppResult<()> {
    if !ensure_editable(invocation.role) {
        return Ok(());
    }
    let mut session = open_session(invocation).await?;
    apply_add(&mut session, args).await?;
    finish(&mut session);
    Ok(())
}

pub async fn handle_edit_command(invocation: &Invocation, args: &EditArgs) -> AppResult<()> {
    if !ensure_editable(invocation.role) {
        return Ok(());
    }
    let mut session = open_session(invocation).await?;
    apply_edit(&mut session, args).await?;
    finish(&mut session);
    Ok(())
}

pub async fn handle_delete_command(invocation: &Invocation, args: &DeleteArgs) -> AppResult<()> {
    if !ensure_editable(invocation.role) {
        return Ok(());
    }
    let mut session = open_session(invocation).await?;
    if apply_delete(&mut session, args).await? {
        finish(&mut session);
    }
    Ok(())
}

/// Edit controls exist only on the admin grid
pub(crate) fn ensure_editable(role: Role) -> bool {
    if !role.allows_editing() {
        print_warning(&format!(
            "The {} view is read-only; use --role admin to edit",
            role
        ));
        return false;
    }
    true
}

fn finish<B: ScheduleBackend>(session: &mut ScheduleSession<B>) {
    redraw(session);
    println!(
        "{}",
        OutputStyle::muted("Changes are kept for this run only; use `edusched session` to chain edits")
    );
}

/// Drag `args.id` onto the target cell. Returns whether the course moved.
pub(crate) async fn apply_move<B: ScheduleBackend>(
    session: &mut ScheduleSession<B>,
    args: &MoveArgs,
) -> AppResult<bool> {
    let target = Slot::new(args.day, args.time);
    let outcome = session.drop_placement(&args.id, target).await?;

    if let DropOutcome::Unchanged(slot) = &outcome {
        handle_flow(FlowResult::Cancelled(format!(
            "Course [{}] already starts at {}",
            args.id, slot
        )));
    }
    Ok(matches!(outcome, DropOutcome::Placed { .. }))
}

pub(crate) async fn apply_add<B: ScheduleBackend>(
    session: &mut ScheduleSession<B>,
    args: &AddArgs,
) -> AppResult<MutationOutcome> {
    let outcome = session.add_placement(args.to_new_placement()).await?;
    if let MutationOutcome::Applied(placement) = &outcome {
        println!("{}", OutputStyle::format_placement_line(placement));
    }
    Ok(outcome)
}

pub(crate) async fn apply_edit<B: ScheduleBackend>(
    session: &mut ScheduleSession<B>,
    args: &EditArgs,
) -> AppResult<Option<MutationOutcome>> {
    let edit = args.to_edit();
    if edit.is_empty() {
        print_warning("Nothing to change; pass at least one field to edit");
        return Ok(None);
    }

    let outcome = session.edit_placement(&args.id, edit).await?;
    if let MutationOutcome::Applied(placement) = &outcome {
        println!("{}", OutputStyle::format_placement_line(placement));
    }
    Ok(Some(outcome))
}

/// Returns whether the course was deleted
pub(crate) async fn apply_delete<B: ScheduleBackend>(
    session: &mut ScheduleSession<B>,
    args: &DeleteArgs,
) -> AppResult<bool> {
    if !args.force {
        let Some(placement) = session.find_placement(&args.id) else {
            handle_flow(FlowResult::NotFound {
                item_type: "Course".to_string(),
                search_term: args.id.clone(),
            });
            return Ok(false);
        };

        println!("{}", OutputStyle::format_placement_line(placement));
        if !prompt_yes_no("Delete this course?")? {
            handle_flow(FlowResult::Cancelled("Deletion cancelled".to_string()));
            return Ok(false);
        }
    }

    session.delete_placement(&args.id).await?;
    Ok(true)
}
