// Query operations - View, List, Show, Check, Stats

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::backend::ScheduleBackend;
use crate::cli::{CheckArgs, Invocation, ListArgs, ListFormat, ShowArgs};
use crate::core::data::{PlatformOverview, Slot};
use crate::core::operations::ScheduleSession;
use crate::core::role::Role;
use crate::core::traits::ScheduleQuery;
use crate::manager::{backend_for, open_session};
use crate::utils::error::{handle_flow, AppError, AppResult, FlowResult};
use crate::utils::output::DisplayFormatter;
use crate::utils::{print_success, OutputStyle};

/// The role's home screen: platform overview for the super admin, a grid otherwise
pub async fn handle_view_command(invocation: &Invocation) -> AppResult<()> {
    if invocation.role == Role::SuperAdmin {
        let backend = Arc::new(backend_for(invocation)?);
        let overview = collect_overview(backend).await?;
        OutputStyle::print_overview(&overview);
        return Ok(());
    }

    let mut session = open_session(invocation).await?;
    redraw(&mut session);
    if !invocation.role.allows_editing() {
        println!("{}", OutputStyle::muted("Read-only view"));
    }
    Ok(())
}

pub async fn handle_list_command(invocation: &Invocation, args: &ListArgs) -> AppResult<()> {
    let session = open_session(invocation).await?;
    list_schedule(&session, args, invocation.role)
}

pub async fn handle_show_command(invocation: &Invocation, args: &ShowArgs) -> AppResult<()> {
    let session = open_session(invocation).await?;
    show_placement(&session, &args.id, invocation.role);
    Ok(())
}

pub async fn handle_check_command(invocation: &Invocation, args: &CheckArgs) -> AppResult<()> {
    let session = open_session(invocation).await?;
    report_slot(&session, args);
    Ok(())
}

pub async fn handle_stats_command(invocation: &Invocation) -> AppResult<()> {
    let session = open_session(invocation).await?;
    OutputStyle::print_stats(&session.stats(), invocation.role);
    Ok(())
}

pub(crate) fn list_schedule(view: &impl ScheduleQuery, args: &ListArgs, role: Role) -> AppResult<()> {
    let format = args.format.as_ref().unwrap_or(&ListFormat::Simple);
    DisplayFormatter::format_list(view.schedule(), format, role)
}

pub(crate) fn show_placement(view: &impl ScheduleQuery, id: &str, role: Role) {
    match view.find_placement(id) {
        Some(placement) => OutputStyle::print_placement_detailed(placement, role),
        None => handle_flow(FlowResult::NotFound {
            item_type: "Course".to_string(),
            search_term: id.to_string(),
        }),
    }
}

pub(crate) fn report_slot(view: &impl ScheduleQuery, args: &CheckArgs) {
    let slot = Slot::new(args.day, args.time);
    match view.check_slot(args.moving.as_deref(), slot) {
        Some(occupant) => println!(
            "⛔ {} {}",
            OutputStyle::slot(&slot.to_string()),
            OutputStyle::error(&format!(
                "is taken by '{}' [{}]",
                occupant.subject, occupant.id
            ))
        ),
        None => print_success(&format!("{} is free", slot)),
    }
}

/// Print the pending alert, if still showing, then the grid
pub(crate) fn redraw<B: ScheduleBackend>(session: &mut ScheduleSession<B>) {
    if let Some(notification) = session.current_notification() {
        OutputStyle::print_notification(notification);
    }
    OutputStyle::print_grid(session.schedule(), session.role());
}

/// Tenant directory, platform figures and statistics for every view.
///
/// The reads are independent, so they run concurrently.
pub(crate) async fn collect_overview<B: ScheduleBackend + 'static>(
    backend: Arc<B>,
) -> AppResult<PlatformOverview> {
    let (tenant, tenants, analytics, contexts) = tokio::try_join!(
        backend.tenant(),
        backend.tenants(),
        backend.analytics(),
        backend.contexts(),
    )?;

    let mut fetches = JoinSet::new();
    for (index, context) in contexts.into_iter().enumerate() {
        let backend = Arc::clone(&backend);
        fetches.spawn(async move {
            let schedule = backend.fetch_schedule(&context).await?;
            Ok::<_, AppError>((index, context, schedule.stats()))
        });
    }

    let mut views = Vec::new();
    while let Some(joined) = fetches.join_next().await {
        let view = joined.map_err(|e| AppError::System(format!("Overview fetch failed: {}", e)))??;
        views.push(view);
    }
    views.sort_by_key(|(index, _, _)| *index);

    Ok(PlatformOverview {
        tenant,
        tenants,
        analytics,
        views: views
            .into_iter()
            .map(|(_, context, stats)| (context, stats))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures::PROMOTIONS;
    use crate::backend::MockBackend;
    use crate::core::data::{TimeSlot, Weekday};
    use crate::manager::test_support::invocation;
    use std::time::Duration;

    #[tokio::test]
    async fn test_overview_covers_every_view_in_order() {
        let backend = Arc::new(MockBackend::builtin(Duration::from_millis(5)));
        let overview = collect_overview(backend).await.unwrap();

        assert_eq!(overview.tenant.id, "ufr-sciences");
        let contexts: Vec<&str> = overview.views.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(&contexts[..PROMOTIONS.len()], &PROMOTIONS[..]);
        assert!(contexts.contains(&"Prof. Jean Dupont"));

        let l3 = overview.views.iter().find(|(c, _)| c == "L3-INFO").unwrap();
        assert_eq!(l3.1.total_courses, 6);
        assert_eq!(l3.1.total_hours, 12);
    }

    #[tokio::test]
    async fn test_overview_lists_every_tenant() {
        let backend = Arc::new(MockBackend::builtin(Duration::ZERO));
        let overview = collect_overview(backend).await.unwrap();

        assert_eq!(overview.tenants.len(), 5);
        assert_eq!(overview.tenants[0], overview.tenant);
        assert_eq!(overview.analytics.total_tenants, overview.tenants.len());
        assert_eq!(
            overview.analytics.monthly_revenue,
            overview.tenants.iter().map(|t| t.mrr).sum::<u32>()
        );

        // rendering must cope with the full directory
        OutputStyle::print_overview(&overview);
    }

    #[tokio::test]
    async fn test_slot_check_honours_moving_course() {
        let session = open_session(&invocation(Role::Student)).await.unwrap();
        let monday_eight = Slot::new(Weekday::Monday, TimeSlot::from_hour(8).unwrap());

        assert_eq!(session.check_slot(None, monday_eight).unwrap().id, "1");
        assert!(session.check_slot(Some("1"), monday_eight).is_none());

        // printing paths must not fail on a free slot or a missing id
        report_slot(
            &session,
            &CheckArgs {
                day: Weekday::Friday,
                time: TimeSlot::from_hour(17).unwrap(),
                moving: None,
            },
        );
        show_placement(&session, "404", Role::Student);
    }

    #[tokio::test]
    async fn test_list_json_of_teacher_view() {
        let session = open_session(&invocation(Role::Teacher)).await.unwrap();
        assert_eq!(session.context(), "Prof. Jean Dupont");
        let args = ListArgs {
            format: Some(ListFormat::Json),
        };
        assert!(list_schedule(&session, &args, Role::Teacher).is_ok());
    }
}
