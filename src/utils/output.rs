use crate::cli::ListFormat;
use crate::core::data::{
    ColorTag, CoursePlacement, Plan, PlatformOverview, Schedule, ScheduleStats, Slot,
    TenantStatus, TimeSlot, Weekday,
};
use crate::core::notification::{Notification, NotificationKind};
use crate::core::role::Role;
use crate::utils::error::{handle_flow, AppError, AppResult, FlowResult};
use crate::utils::format::{fit, format_clock};
use colored::*;

const TIME_COLUMN: usize = 7;
const MIN_CELL: usize = 12;
const MAX_CELL: usize = 22;

pub struct OutputStyle;

impl OutputStyle {
    pub fn subject(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn id(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn slot(text: &str) -> ColoredString {
        text.bright_cyan()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Cell swatch for a placement's color tag
    pub fn tag(color: ColorTag, text: &str) -> ColoredString {
        match color {
            ColorTag::Blue => text.blue(),
            ColorTag::Green => text.green(),
            ColorTag::Purple => text.purple(),
            ColorTag::Orange => text.truecolor(255, 165, 0),
            ColorTag::Pink => text.bright_magenta(),
            ColorTag::Cyan => text.cyan(),
            ColorTag::Indigo => text.truecolor(75, 0, 130),
            ColorTag::Brand => text.bright_blue(),
        }
    }

    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }

    pub fn print_notification(notification: &Notification) {
        let (icon, title) = match notification.kind {
            NotificationKind::Error => ("⛔", Self::error(&notification.title)),
            NotificationKind::Success => ("✅", Self::success(&notification.title)),
            NotificationKind::Info => ("ℹ️ ", Self::info(&notification.title)),
        };
        println!(
            "{} {} {} {}",
            icon,
            title.bold(),
            notification.message,
            Self::muted(&format!(
                "(jusqu'à {})",
                format_clock(&notification.expires_at)
            ))
        );
    }

    /// One-line summary used by lists and confirmations
    pub fn format_placement_line(placement: &CoursePlacement) -> String {
        format!(
            "{} {:<8} {}-{} {} {} {}",
            Self::id(&format!("[{}]", placement.id)),
            Self::slot(placement.day.label()),
            Self::slot(&placement.start_time.label()),
            Self::slot(&placement.end_time.label()),
            Self::tag(placement.color, "■"),
            Self::subject(&placement.subject),
            Self::muted(&format!("{} · {}", placement.secondary_label, placement.room)),
        )
    }

    pub fn print_placement_detailed(placement: &CoursePlacement, role: Role) {
        println!("{}", Self::title("📅 Cours"));
        Self::print_field_colored("ID", &placement.id, Self::id);
        Self::print_field_colored("Matière", &placement.subject, Self::subject);
        Self::print_field_colored(role.secondary_heading(), &placement.secondary_label, Self::content);
        Self::print_field_colored("Salle", &placement.room, Self::content);
        Self::print_field_colored("Jour", placement.day.label(), Self::slot);
        Self::print_field_colored(
            "Horaire",
            &format!("{} - {}", placement.start_time, placement.end_time),
            Self::slot,
        );
        Self::print_field_colored("Durée", &format!("{}h", placement.duration_hours()), Self::muted);
    }

    pub fn print_stats(stats: &ScheduleStats, role: Role) {
        OutputStyle::print_header("📊 Statistiques");
        let secondary = match role {
            Role::Teacher => "Promotions",
            _ => "Enseignants",
        };

        Self::print_field_colored("Cours", &stats.total_courses.to_string(), Self::info);
        Self::print_field_colored("Heures", &format!("{}h", stats.total_hours), Self::info);
        Self::print_field_colored(secondary, &stats.secondary_labels.to_string(), Self::info);
        Self::print_field_colored("Salles", &stats.rooms.to_string(), Self::info);

        if !stats.per_day.is_empty() {
            println!("\n🗓️  {}:", Self::header("Par jour"));
            for day in Weekday::ALL {
                let count = stats.per_day.get(&day).copied().unwrap_or(0);
                println!("  {:<9} {}", day.label(), Self::info(&count.to_string()));
            }
        }
    }

    fn plan_label(plan: Plan, mrr: u32) -> String {
        match plan {
            Plan::Trial => "Essai gratuit".to_string(),
            Plan::Starter => format!("Starter - {}€", mrr),
            Plan::Premium => format!("Premium - {}€", mrr),
        }
    }

    fn status(status: TenantStatus, text: &str) -> ColoredString {
        match status {
            TenantStatus::Active => Self::success(text),
            TenantStatus::Trial => Self::warning(text),
            TenantStatus::Suspended => Self::error(text),
        }
    }

    /// Super admin dashboard: platform figures, tenant directory, then the
    /// views of the served tenant
    pub fn print_overview(overview: &PlatformOverview) {
        let analytics = &overview.analytics;
        Self::print_header("🛡️  Espace Super-Admin");
        Self::print_field_colored(
            "Établissements",
            &format!(
                "{} ({} actifs, {} en essai, {} suspendus)",
                analytics.total_tenants,
                analytics.active_tenants,
                analytics.trial_tenants,
                analytics.suspended_tenants
            ),
            Self::info,
        );
        Self::print_field_colored(
            "Utilisateurs",
            &format!("{}/{}", analytics.total_users, analytics.user_capacity),
            Self::info,
        );
        Self::print_field_colored("MRR", &format!("{}€", analytics.monthly_revenue), Self::info);

        println!();
        println!(
            "{}",
            Self::header(&format!(
                "{:<34} {:<16} {:<9} {:>12}",
                "Établissement", "Offre", "Statut", "Utilisateurs"
            ))
        );
        println!("{}", "─".repeat(74));
        for tenant in &overview.tenants {
            println!(
                "{} {:<16} {} {:>12}",
                fit(&tenant.name, 34),
                Self::plan_label(tenant.plan, tenant.mrr),
                Self::status(tenant.status, &format!("{:<9}", tenant.status.label())),
                format!("{}/{}", tenant.user_count, tenant.max_users)
            );
        }

        let tenant = &overview.tenant;
        println!();
        println!(
            "🏛️  {} {}",
            Self::title(&tenant.name),
            Self::muted(&format!("({})", tenant.domain))
        );
        println!(
            "{}",
            Self::header(&format!("{:<20} {:>6} {:>7} {:>7}", "Emploi du temps", "Cours", "Heures", "Salles"))
        );
        println!("{}", Self::separator());
        for (context, stats) in &overview.views {
            println!(
                "{:<20} {:>6} {:>6}h {:>7}",
                fit(context, 20),
                stats.total_courses,
                stats.total_hours,
                stats.rooms
            );
        }
    }

    /// Print the weekly grid, sized to the terminal
    pub fn print_grid(schedule: &Schedule, role: Role) {
        Self::print_header(&format!("📅 {} - {}", role.title(), schedule.context));
        let width = crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(100);

        for (i, line) in GridRenderer::new(cell_width_for(width)).render(schedule).iter().enumerate() {
            if i == 0 {
                println!("{}", Self::header(line));
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Column width that fits five day columns into `terminal_width`
pub fn cell_width_for(terminal_width: usize) -> usize {
    let available = terminal_width.saturating_sub(TIME_COLUMN + 1);
    (available / Weekday::ALL.len())
        .saturating_sub(3)
        .clamp(MIN_CELL, MAX_CELL)
}

/// Plain-text layout of a schedule grid.
///
/// A placement is drawn in the row of its start time only, on three lines:
/// subject, secondary label, room.
pub struct GridRenderer {
    cell_width: usize,
}

impl GridRenderer {
    pub fn new(cell_width: usize) -> Self {
        Self { cell_width }
    }

    fn join_row(&self, time: &str, cells: &[String]) -> String {
        let cells: Vec<String> = cells.iter().map(|c| fit(c, self.cell_width)).collect();
        format!("{:<width$} │ {}", time, cells.join(" │ "), width = TIME_COLUMN)
    }

    pub fn render(&self, schedule: &Schedule) -> Vec<String> {
        let mut lines = Vec::new();

        let days: Vec<String> = Weekday::ALL.iter().map(|d| d.label().to_string()).collect();
        lines.push(self.join_row("Horaire", &days));
        lines.push(format!(
            "{}─┼─{}",
            "─".repeat(TIME_COLUMN),
            vec!["─".repeat(self.cell_width); Weekday::ALL.len()].join("─┼─")
        ));

        for time in TimeSlot::all() {
            let row: Vec<Option<&CoursePlacement>> = Weekday::ALL
                .iter()
                .map(|day| schedule.at(Slot::new(*day, time)))
                .collect();

            let pick = |f: fn(&CoursePlacement) -> String| -> Vec<String> {
                row.iter()
                    .map(|cell| cell.map(f).unwrap_or_default())
                    .collect()
            };

            lines.push(self.join_row(&time.label(), &pick(|p| p.subject.clone())));
            if row.iter().any(Option::is_some) {
                lines.push(self.join_row("", &pick(|p| p.secondary_label.clone())));
                lines.push(self.join_row("", &pick(|p| p.room.clone())));
            }
        }

        lines
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

/// Display formatter for the list command
pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn format_list(schedule: &Schedule, format: &ListFormat, role: Role) -> AppResult<()> {
        if schedule.is_empty() && !matches!(format, ListFormat::Json) {
            handle_flow(FlowResult::EmptyList {
                item_type: format!("courses in {}", schedule.context),
            });
            return Ok(());
        }

        match format {
            ListFormat::Simple => Self::print_simple_list(schedule),
            ListFormat::Detailed => Self::print_detailed_list(schedule, role),
            ListFormat::Json => Self::print_json_list(schedule)?,
        }

        Ok(())
    }

    fn print_simple_list(schedule: &Schedule) {
        println!(
            "📅 {} ({} cours)",
            OutputStyle::header(&schedule.context),
            OutputStyle::info(&schedule.len().to_string())
        );
        println!("{}", OutputStyle::separator());
        for placement in schedule.sorted() {
            println!("{}", OutputStyle::format_placement_line(placement));
        }
    }

    fn print_detailed_list(schedule: &Schedule, role: Role) {
        let placements = schedule.sorted();
        for (i, placement) in placements.iter().enumerate() {
            OutputStyle::print_placement_detailed(placement, role);
            if i < placements.len() - 1 {
                println!("{}", OutputStyle::separator());
            }
        }
    }

    fn print_json_list(schedule: &Schedule) -> AppResult<()> {
        let json = serde_json::to_string_pretty(schedule)
            .map_err(|e| AppError::System(format!("Failed to serialize schedule to JSON: {}", e)))?;
        println!("{}", json);
        Ok(())
    }
}
