//! Core data structures for the weekly schedule grid
//!
//! A schedule view is an ordered list of course placements. Each placement
//! occupies one slot, the `(day, start)` pair, and no two placements of the
//! same view may share a slot.

use crate::utils::error::{AppError, AppResult, ScheduleError};
use crate::utils::format;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

/// Earliest hour label of the grid ("08:00")
pub const FIRST_HOUR: u8 = 8;
/// Latest hour label of the grid ("18:00")
pub const LAST_HOUR: u8 = 18;

/// The five modeled weekdays, in grid order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Lundi", alias = "Monday")]
    Monday,
    #[serde(rename = "Mardi", alias = "Tuesday")]
    Tuesday,
    #[serde(rename = "Mercredi", alias = "Wednesday")]
    Wednesday,
    #[serde(rename = "Jeudi", alias = "Thursday")]
    Thursday,
    #[serde(rename = "Vendredi", alias = "Friday")]
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Display label used by the grid and the fixtures
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lundi",
            Weekday::Tuesday => "Mardi",
            Weekday::Wednesday => "Mercredi",
            Weekday::Thursday => "Jeudi",
            Weekday::Friday => "Vendredi",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                day.label().to_lowercase() == needle
                    || day.english() == needle
                    || (needle.len() == 3 && day.english().starts_with(&needle))
            })
            .ok_or_else(|| ScheduleError::Validation(format!("unknown day '{}'", s.trim())))
    }
}

/// An hour-aligned time label between "08:00" and "18:00"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub fn from_hour(hour: u8) -> Option<Self> {
        (FIRST_HOUR..=LAST_HOUR).contains(&hour).then_some(Self(hour))
    }

    pub fn first() -> Self {
        Self(FIRST_HOUR)
    }

    pub fn last() -> Self {
        Self(LAST_HOUR)
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// All labels of the grid, in order
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (FIRST_HOUR..=LAST_HOUR).map(TimeSlot)
    }

    /// Whole hours from `self` to `end`, zero when `end` is not later
    pub fn hours_until(self, end: TimeSlot) -> u8 {
        end.0.saturating_sub(self.0)
    }

    /// Shift by `delta` hours, clamped to the grid bounds
    pub fn shifted(self, delta: i16) -> Self {
        let hour = (self.0 as i16 + delta).clamp(FIRST_HOUR as i16, LAST_HOUR as i16);
        Self(hour as u8)
    }

    pub fn label(self) -> String {
        format!("{:02}:00", self.0)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = chrono::NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| ScheduleError::Validation(format!("invalid time '{}', expected HH:00", s.trim())))?;

        if chrono::Timelike::minute(&time) != 0 {
            return Err(ScheduleError::Validation(format!(
                "time '{}' is not aligned on the hour",
                s.trim()
            )));
        }

        let hour = chrono::Timelike::hour(&time) as u8;
        TimeSlot::from_hour(hour).ok_or_else(|| {
            ScheduleError::Validation(format!(
                "time '{}' is outside {} - {}",
                s.trim(),
                TimeSlot::first(),
                TimeSlot::last()
            ))
        })
    }
}

/// The `(day, start)` pair that must be unique within a schedule view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub day: Weekday,
    pub start: TimeSlot,
}

impl Slot {
    pub fn new(day: Weekday, start: TimeSlot) -> Self {
        Self { day, start }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.start)
    }
}

/// Color tag shown on the grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Cyan,
    Indigo,
    #[default]
    Brand,
}

/// One scheduled class occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePlacement {
    pub id: String,
    pub subject: String,
    /// Teacher name in promotion views, promotion code in teacher views
    pub secondary_label: String,
    pub room: String,
    pub day: Weekday,
    #[serde(with = "format::time_label")]
    pub start_time: TimeSlot,
    #[serde(with = "format::time_label")]
    pub end_time: TimeSlot,
    #[serde(default)]
    pub color: ColorTag,
}

impl CoursePlacement {
    pub fn new(
        subject: String,
        secondary_label: String,
        room: String,
        day: Weekday,
        start_time: TimeSlot,
        end_time: TimeSlot,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject,
            secondary_label,
            room,
            day,
            start_time,
            end_time,
            color: ColorTag::default(),
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.day, self.start_time)
    }

    pub fn duration_hours(&self) -> u8 {
        self.start_time.hours_until(self.end_time)
    }
}

impl fmt::Display for CoursePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} {}-{} [{}]",
            self.subject, self.secondary_label, self.day, self.start_time, self.end_time, self.room
        )
    }
}

/// One schedule view: a promotion's or a teacher's week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub context: String,
    #[serde(default)]
    pub placements: Vec<CoursePlacement>,
}

/// Statistics shown above a schedule grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStats {
    pub total_courses: usize,
    pub total_hours: u32,
    pub secondary_labels: usize,
    pub rooms: usize,
    pub per_day: BTreeMap<Weekday, usize>,
}

impl Schedule {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            placements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CoursePlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.placements.iter().position(|p| p.id == id)
    }

    /// Placement shown in the grid cell for `slot`, first one wins
    pub fn at(&self, slot: Slot) -> Option<&CoursePlacement> {
        self.placements.iter().find(|p| p.slot() == slot)
    }

    /// Placements sorted by day then start time
    pub fn sorted(&self) -> Vec<&CoursePlacement> {
        let mut placements: Vec<&CoursePlacement> = self.placements.iter().collect();
        placements.sort_by_key(|p| p.slot());
        placements
    }

    pub fn stats(&self) -> ScheduleStats {
        let secondary_labels: BTreeSet<&str> = self
            .placements
            .iter()
            .map(|p| p.secondary_label.as_str())
            .collect();
        let rooms: BTreeSet<&str> = self.placements.iter().map(|p| p.room.as_str()).collect();

        let mut per_day = BTreeMap::new();
        for placement in &self.placements {
            *per_day.entry(placement.day).or_insert(0) += 1;
        }

        ScheduleStats {
            total_courses: self.placements.len(),
            total_hours: self
                .placements
                .iter()
                .map(|p| p.duration_hours() as u32)
                .sum(),
            secondary_labels: secondary_labels.len(),
            rooms: rooms.len(),
            per_day,
        }
    }
}

/// Subscription plan of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Trial,
    Starter,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    #[default]
    Active,
    Trial,
    Suspended,
}

impl TenantStatus {
    pub fn label(self) -> &'static str {
        match self {
            TenantStatus::Active => "Actif",
            TenantStatus::Trial => "Essai",
            TenantStatus::Suspended => "Suspendu",
        }
    }
}

/// A customer organization, one university department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub plan: Plan,
    #[serde(default)]
    pub status: TenantStatus,
    pub user_count: u32,
    pub max_users: u32,
    /// Monthly recurring revenue, in euros
    #[serde(default)]
    pub mrr: u32,
}

/// Platform-wide figures for the super admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformAnalytics {
    pub total_tenants: usize,
    pub active_tenants: usize,
    pub trial_tenants: usize,
    pub suspended_tenants: usize,
    pub total_users: u32,
    pub user_capacity: u32,
    pub monthly_revenue: u32,
}

impl PlatformAnalytics {
    pub fn from_tenants(tenants: &[Tenant]) -> Self {
        let count = |status: TenantStatus| tenants.iter().filter(|t| t.status == status).count();

        Self {
            total_tenants: tenants.len(),
            active_tenants: count(TenantStatus::Active),
            trial_tenants: count(TenantStatus::Trial),
            suspended_tenants: count(TenantStatus::Suspended),
            total_users: tenants.iter().map(|t| t.user_count).sum(),
            user_capacity: tenants.iter().map(|t| t.max_users).sum(),
            monthly_revenue: tenants.iter().map(|t| t.mrr).sum(),
        }
    }
}

/// Everything the super admin screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformOverview {
    /// The tenant whose schedules are served
    pub tenant: Tenant,
    pub tenants: Vec<Tenant>,
    pub analytics: PlatformAnalytics,
    /// Statistics per schedule view of `tenant`, in book order
    pub views: Vec<(String, ScheduleStats)>,
}

/// Every schedule view of one tenant, plus the platform's tenant directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBook {
    pub tenant: Tenant,
    /// Other tenants of the platform; `tenant` is listed even when absent here
    #[serde(default, rename = "tenants")]
    pub directory: Vec<Tenant>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl ScheduleBook {
    pub fn schedule(&self, context: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.context == context)
    }

    /// The served tenant first, then the directory without duplicates
    pub fn tenants(&self) -> Vec<Tenant> {
        let mut tenants = vec![self.tenant.clone()];
        for tenant in &self.directory {
            if tenants.iter().all(|t| t.id != tenant.id) {
                tenants.push(tenant.clone());
            }
        }
        tenants
    }

    pub fn contexts(&self) -> Vec<String> {
        self.schedules.iter().map(|s| s.context.clone()).collect()
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse fixture file: {}", e)))
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(hour: u8) -> TimeSlot {
        TimeSlot::from_hour(hour).unwrap()
    }

    #[test]
    fn test_time_slot_parsing() {
        assert_eq!("08:00".parse::<TimeSlot>().unwrap(), slot(8));
        assert_eq!(" 18:00 ".parse::<TimeSlot>().unwrap(), slot(18));
        assert!("07:00".parse::<TimeSlot>().is_err());
        assert!("19:00".parse::<TimeSlot>().is_err());
        assert!("09:30".parse::<TimeSlot>().is_err());
        assert!("nine".parse::<TimeSlot>().is_err());
        assert_eq!(TimeSlot::all().count(), 11);
        assert_eq!(slot(9).to_string(), "09:00");
    }

    #[test]
    fn test_time_slot_shift_is_clamped() {
        assert_eq!(slot(10).shifted(3), slot(13));
        assert_eq!(slot(17).shifted(4), TimeSlot::last());
        assert_eq!(slot(9).shifted(-5), TimeSlot::first());
        assert_eq!(slot(12).hours_until(slot(10)), 0);
    }

    #[test]
    fn test_weekday_parsing() {
        assert_eq!("Lundi".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("mercredi".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("Friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert_eq!("thu".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert!("Samedi".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_placement_serializes_with_labels() {
        let mut placement = CoursePlacement::new(
            "Réseaux".to_string(),
            "Prof. Dubois".to_string(),
            "C301".to_string(),
            Weekday::Wednesday,
            slot(9),
            slot(11),
        );
        placement.id = "4".to_string();

        let json = serde_json::to_value(&placement).unwrap();
        assert_eq!(json["day"], "Mercredi");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "11:00");
        assert_eq!(json["secondaryLabel"], "Prof. Dubois");
        assert_eq!(json["color"], "brand");
    }

    #[test]
    fn test_book_from_toml() {
        let content = r#"
[tenant]
id = "ufr-test"
name = "UFR Test"
domain = "test.univ.fr"
plan = "trial"
user_count = 3
max_users = 25

[[schedules]]
context = "L1-INFO"

[[schedules.placements]]
id = "a"
subject = "Algorithmique"
secondaryLabel = "Prof. Leroy"
room = "B103"
day = "Jeudi"
startTime = "13:00"
endTime = "15:00"
"#;
        let book = ScheduleBook::from_toml_str(content).unwrap();
        assert_eq!(book.tenant.plan, Plan::Trial);
        assert_eq!(book.contexts(), vec!["L1-INFO".to_string()]);

        let schedule = book.schedule("L1-INFO").unwrap();
        assert_eq!(schedule.placements[0].color, ColorTag::Brand);
        assert_eq!(schedule.placements[0].slot(), Slot::new(Weekday::Thursday, slot(13)));
        assert!(ScheduleBook::from_toml_str("[[schedules]]\ncontext = 1").is_err());
    }

    #[test]
    fn test_tenant_directory_and_analytics() {
        let content = r#"
[tenant]
id = "ufr-test"
name = "UFR Test"
domain = "test.univ.fr"
plan = "starter"
user_count = 40
max_users = 50
mrr = 29

[[tenants]]
id = "ufr-droit"
name = "UFR Droit"
domain = "droit.univ.fr"
plan = "trial"
status = "trial"
user_count = 9
max_users = 25

[[tenants]]
id = "ufr-test"
name = "UFR Test (copie)"
domain = "test.univ.fr"
plan = "starter"
user_count = 40
max_users = 50
"#;
        let book = ScheduleBook::from_toml_str(content).unwrap();
        assert_eq!(book.tenant.status, TenantStatus::Active);

        let tenants = book.tenants();
        let ids: Vec<&str> = tenants.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["ufr-test", "ufr-droit"]);
        assert_eq!(tenants[0].name, "UFR Test");

        let analytics = PlatformAnalytics::from_tenants(&tenants);
        assert_eq!(analytics.total_tenants, 2);
        assert_eq!(analytics.active_tenants, 1);
        assert_eq!(analytics.trial_tenants, 1);
        assert_eq!(analytics.suspended_tenants, 0);
        assert_eq!(analytics.total_users, 49);
        assert_eq!(analytics.user_capacity, 75);
        assert_eq!(analytics.monthly_revenue, 29);

        assert_eq!(PlatformAnalytics::from_tenants(&[]), PlatformAnalytics::default());
    }

    #[test]
    fn test_stats() {
        let mut schedule = Schedule::new("L3-INFO");
        let mut math = CoursePlacement::new(
            "Mathématiques".into(),
            "Prof. Dupont".into(),
            "A101".into(),
            Weekday::Monday,
            slot(8),
            slot(10),
        );
        math.id = "1".into();
        let mut friday = math.clone();
        friday.id = "2".into();
        friday.day = Weekday::Friday;
        friday.end_time = slot(11);
        let mut network = CoursePlacement::new(
            "Réseaux".into(),
            "Prof. Dubois".into(),
            "C301".into(),
            Weekday::Monday,
            slot(14),
            slot(16),
        );
        network.id = "3".into();
        schedule.placements = vec![math, friday, network];

        let stats = schedule.stats();
        assert_eq!(stats.total_courses, 3);
        assert_eq!(stats.total_hours, 7);
        assert_eq!(stats.secondary_labels, 2);
        assert_eq!(stats.rooms, 2);
        assert_eq!(stats.per_day.get(&Weekday::Monday), Some(&2));
        assert_eq!(stats.per_day.get(&Weekday::Tuesday), None);

        let order: Vec<&str> = schedule.sorted().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["1", "3", "2"]);
    }
}
