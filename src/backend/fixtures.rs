//! Literal seed data for the mock data service

use crate::core::data::{
    ColorTag, CoursePlacement, Plan, Schedule, ScheduleBook, Tenant, TenantStatus, TimeSlot,
    Weekday,
};

/// Promotion codes offered by the admin promotion picker
pub const PROMOTIONS: [&str; 5] = ["L1-INFO", "L2-INFO", "L3-INFO", "M1-INFO", "M2-INFO"];

#[allow(clippy::too_many_arguments)]
fn placement(
    id: &str,
    subject: &str,
    secondary_label: &str,
    room: &str,
    day: Weekday,
    start: u8,
    end: u8,
    color: ColorTag,
) -> CoursePlacement {
    CoursePlacement {
        id: id.to_string(),
        subject: subject.to_string(),
        secondary_label: secondary_label.to_string(),
        room: room.to_string(),
        day,
        start_time: TimeSlot::from_hour(start).unwrap_or_else(TimeSlot::first),
        end_time: TimeSlot::from_hour(end).unwrap_or_else(TimeSlot::last),
        color,
    }
}

fn l3_info() -> Schedule {
    use ColorTag::*;
    use Weekday::*;

    Schedule {
        context: "L3-INFO".to_string(),
        placements: vec![
            placement("1", "Mathématiques", "Prof. Dupont", "A101", Monday, 8, 10, Blue),
            placement("2", "Programmation", "Prof. Martin", "B205", Monday, 14, 16, Green),
            placement("3", "Base de données", "Prof. Bernard", "A102", Tuesday, 10, 12, Purple),
            placement("4", "Réseaux", "Prof. Dubois", "C301", Wednesday, 9, 11, Orange),
            placement("5", "Algorithmique", "Prof. Leroy", "B103", Thursday, 13, 15, Pink),
            placement("6", "Mathématiques", "Prof. Dupont", "A101", Friday, 10, 12, Blue),
        ],
    }
}

fn teacher_dupont() -> Schedule {
    use ColorTag::*;
    use Weekday::*;

    Schedule {
        context: "Prof. Jean Dupont".to_string(),
        placements: vec![
            placement("t1", "Mathématiques", "L3-INFO", "A101", Monday, 8, 10, Blue),
            placement("t2", "Mathématiques", "L2-INFO", "A103", Monday, 14, 16, Blue),
            placement("t3", "Statistiques", "M1-INFO", "B201", Tuesday, 10, 12, Cyan),
            placement("t4", "Mathématiques", "L3-INFO", "A101", Wednesday, 9, 11, Blue),
            placement("t5", "Algèbre linéaire", "L1-INFO", "C105", Thursday, 13, 15, Indigo),
            placement("t6", "Statistiques", "M1-INFO", "B201", Friday, 10, 12, Cyan),
        ],
    }
}

fn tenant(
    id: &str,
    name: &str,
    domain: &str,
    plan: Plan,
    status: TenantStatus,
    users: (u32, u32),
    mrr: u32,
) -> Tenant {
    Tenant {
        id: id.to_string(),
        name: name.to_string(),
        domain: domain.to_string(),
        plan,
        status,
        user_count: users.0,
        max_users: users.1,
        mrr,
    }
}

fn ufr_sciences() -> Tenant {
    tenant(
        "ufr-sciences",
        "UFR Sciences et Technologies",
        "sciences.univ-paris.fr",
        Plan::Starter,
        TenantStatus::Active,
        (45, 50),
        29,
    )
}

/// The platform's other customers, listed on the super admin dashboard
fn tenant_directory() -> Vec<Tenant> {
    vec![
        tenant(
            "ufr-lsh",
            "UFR Lettres et Sciences Humaines",
            "lettres.univ-paris.fr",
            Plan::Trial,
            TenantStatus::Trial,
            (18, 25),
            0,
        ),
        tenant(
            "ufr-eg",
            "UFR Économie et Gestion",
            "eco.univ-paris.fr",
            Plan::Starter,
            TenantStatus::Active,
            (41, 50),
            29,
        ),
        tenant(
            "ufr-droit",
            "UFR Droit",
            "droit.univ-paris.fr",
            Plan::Trial,
            TenantStatus::Trial,
            (9, 25),
            0,
        ),
        tenant(
            "ufr-medecine",
            "UFR Médecine",
            "medecine.univ-lyon.fr",
            Plan::Starter,
            TenantStatus::Active,
            (48, 50),
            29,
        ),
    ]
}

/// The built-in tenant with every promotion view plus one teacher view
pub fn builtin_book() -> ScheduleBook {
    let mut schedules: Vec<Schedule> = PROMOTIONS
        .iter()
        .map(|code| {
            if *code == "L3-INFO" {
                l3_info()
            } else {
                Schedule::new(*code)
            }
        })
        .collect();
    schedules.push(teacher_dupont());

    ScheduleBook {
        tenant: ufr_sciences(),
        directory: tenant_directory(),
        schedules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conflict::duplicate_slots;

    #[test]
    fn test_builtin_fixtures_are_consistent() {
        let book = builtin_book();
        assert_eq!(book.schedules.len(), PROMOTIONS.len() + 1);
        assert_eq!(book.tenants().len(), 5);
        for tenant in book.tenants() {
            assert!(tenant.user_count <= tenant.max_users, "{}", tenant.id);
            assert_eq!(tenant.mrr == 0, tenant.plan == Plan::Trial, "{}", tenant.id);
        }

        for schedule in &book.schedules {
            assert!(duplicate_slots(&schedule.placements).is_empty(), "{}", schedule.context);
            for p in &schedule.placements {
                assert!(p.end_time > p.start_time, "{}", p.id);
            }
        }

        let l3 = book.schedule("L3-INFO").unwrap();
        assert_eq!(l3.stats().total_hours, 12);
        assert!(book.schedule("M2-INFO").unwrap().is_empty());
        assert_eq!(book.schedule("Prof. Jean Dupont").unwrap().stats().secondary_labels, 4);
    }
}
