//! Built-in sample data for a fresh store.

use chrono::NaiveDate;
use tracing::info;

use crate::access::Role;
use crate::auth::UserRecord;
use crate::contracts::ContractorRecord;
use crate::error::StoreError;
use crate::onboarding::{StaffRecord, Task};
use crate::resources::ResourceRecord;
use crate::uploads::UploadRecord;
use crate::workforce::model::{
    Department, Entity, Groups, Team, TimeEntry, TimeOff, TimeOffPolicy, TimeOffRequest,
    TimeTracking, WeeklySummary,
};

use super::traits::{RecordKind, RecordStore, save, save_document};

/// Write sample data for every collection that has never been saved.
///
/// Existing collections, including ones saved empty, are left alone.
/// Returns the kinds that were seeded.
pub async fn seed_missing(store: &dyn RecordStore) -> Result<Vec<RecordKind>, StoreError> {
    let mut seeded = Vec::new();
    for kind in RecordKind::ALL {
        if store.has_collection(kind).await? {
            continue;
        }
        match kind {
            RecordKind::Contracts => save(store, kind, &contracts()).await?,
            RecordKind::Onboarding => save(store, kind, &onboarding()).await?,
            RecordKind::Resources => save(store, kind, &resources()).await?,
            RecordKind::Uploads => save::<UploadRecord>(store, kind, &[]).await?,
            RecordKind::TimeOff => save_document(store, kind, &time_off()).await?,
            RecordKind::TimeTracking => save_document(store, kind, &time_tracking()).await?,
            RecordKind::Groups => save_document(store, kind, &groups()).await?,
            RecordKind::Entities => save(store, kind, &entities()).await?,
            RecordKind::Users => save(store, kind, &users()).await?,
        }
        info!(kind = %kind, "Seeded collection");
        seeded.push(kind);
    }
    Ok(seeded)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn contracts() -> Vec<ContractorRecord> {
    vec![
        ContractorRecord::new("C001", "John Smith", "Senior Developer", date(2025, 8, 15)),
        ContractorRecord::new("C002", "Sarah Johnson", "UX Designer", date(2025, 7, 30)),
        ContractorRecord::new("C003", "Mike Davis", "DevOps Engineer", date(2025, 9, 12)),
        ContractorRecord::new("C004", "Lisa Chen", "Project Manager", date(2025, 6, 5)),
        ContractorRecord::new("C005", "Alex Rodriguez", "Marketing Specialist", date(2025, 10, 20)),
    ]
}

fn onboarding() -> Vec<StaffRecord> {
    vec![
        StaffRecord::new("S001", "Aisha Rahman", "Software Engineer", date(2025, 7, 1))
            .with_task(Task::new(1, "Sign employment contract").done())
            .with_task(Task::new(2, "Set up laptop and accounts"))
            .with_task(Task::new(3, "Security awareness training"))
            .with_task(Task::new(4, "Meet the engineering team")),
        StaffRecord::new("S002", "Daniel Lee", "Product Designer", date(2025, 7, 14))
            .with_task(Task::new(1, "Sign employment contract").done())
            .with_task(Task::new(2, "Design tools licence").done())
            .with_task(Task::new(3, "Brand guidelines walkthrough")),
        StaffRecord::new("S003", "Priya Nair", "Marketing Associate", date(2025, 8, 4))
            .with_task(Task::new(1, "Sign employment contract"))
            .with_task(Task::new(2, "Set up laptop and accounts"))
            .with_task(Task::new(3, "Campaign calendar review")),
    ]
}

fn resource(
    id: &str,
    title: &str,
    description: &str,
    filename: &str,
    file_size: &str,
    upload_date: NaiveDate,
    category: &str,
    allowed_roles: &[Role],
) -> ResourceRecord {
    ResourceRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        filename: filename.to_string(),
        file_type: filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default(),
        file_size: file_size.to_string(),
        upload_date,
        category: category.to_string(),
        allowed_roles: allowed_roles.to_vec(),
    }
}

fn resources() -> Vec<ResourceRecord> {
    vec![
        resource(
            "R001",
            "Employee Handbook",
            "Company policies, benefits and code of conduct",
            "employee_handbook.pdf",
            "2.4 MB",
            date(2025, 1, 15),
            "Policy",
            &Role::ALL,
        ),
        resource(
            "R002",
            "Leave Policy",
            "Annual, medical and parental leave entitlements",
            "leave_policy.pdf",
            "512.0 KB",
            date(2025, 2, 3),
            "Policy",
            &Role::ALL,
        ),
        resource(
            "R003",
            "Salary Bands 2025",
            "Compensation ranges per grade",
            "salary_bands_2025.xlsx",
            "88.0 KB",
            date(2025, 3, 10),
            "Compensation",
            &[Role::Admin, Role::Hr],
        ),
        resource(
            "R004",
            "Engineering Onboarding Guide",
            "Repositories, environments and on-call basics",
            "engineering_onboarding.pdf",
            "1.1 MB",
            date(2025, 4, 22),
            "Engineering",
            &[Role::Admin, Role::Manager, Role::Engineer, Role::Intern],
        ),
        resource(
            "R005",
            "Brand Guidelines",
            "Logo usage, colours and tone of voice",
            "brand_guidelines.pdf",
            "6.8 MB",
            date(2025, 5, 8),
            "Marketing",
            &[Role::Admin, Role::Manager, Role::Marketing],
        ),
        resource(
            "R006",
            "Performance Review Template",
            "Mid-year and annual review form",
            "performance_review.docx",
            "64.0 KB",
            date(2025, 6, 1),
            "Management",
            &[Role::Admin, Role::Hr, Role::Manager],
        ),
    ]
}

fn time_off() -> TimeOff {
    let policy = |kind: &str, days_per_year, description: &str, carryover_limit| TimeOffPolicy {
        kind: kind.to_string(),
        days_per_year,
        description: description.to_string(),
        carryover_limit,
    };
    let request = |employee: &str, kind: &str, start, end, status: &str| TimeOffRequest {
        employee: employee.to_string(),
        kind: kind.to_string(),
        start_date: start,
        end_date: end,
        status: status.to_string(),
    };
    TimeOff {
        policies: vec![
            policy("Annual Leave", 14, "Paid vacation days", 5),
            policy("Medical Leave", 14, "Paid sick days with certificate", 0),
            policy("Parental Leave", 98, "Maternity or paternity leave", 0),
        ],
        upcoming_time_off: vec![
            request("Daniel Lee", "Annual Leave", date(2025, 8, 4), date(2025, 8, 8), "approved"),
            request("Priya Nair", "Medical Leave", date(2025, 8, 12), date(2025, 8, 12), "pending"),
        ],
    }
}

fn time_tracking() -> TimeTracking {
    let entry = |day, hours, project: &str, description: &str| TimeEntry {
        date: date(2025, 7, day),
        hours,
        project: project.to_string(),
        description: description.to_string(),
    };
    TimeTracking {
        weekly_summary: WeeklySummary {
            total_hours: 31.5,
            expected_hours: 40.0,
        },
        entries: vec![
            entry(14, 8.0, "Payroll Migration", "Data mapping"),
            entry(15, 7.5, "Payroll Migration", "Reconciliation"),
            entry(16, 8.0, "Hiring", "Interview loop"),
            entry(17, 8.0, "Onboarding Revamp", "Checklist redesign"),
        ],
    }
}

fn groups() -> Groups {
    Groups {
        departments: vec![
            Department {
                name: "Engineering".into(),
                manager: "Farid Hakim".into(),
                budget: 1_200_000,
                members: 24,
            },
            Department {
                name: "People".into(),
                manager: "Siti Aminah".into(),
                budget: 350_000,
                members: 6,
            },
            Department {
                name: "Marketing".into(),
                manager: "Grace Tan".into(),
                budget: 480_000,
                members: 9,
            },
        ],
        teams: vec![
            Team {
                name: "Platform".into(),
                focus: "Infrastructure and tooling".into(),
                lead: "Aisha Rahman".into(),
                members: 7,
            },
            Team {
                name: "Growth".into(),
                focus: "Acquisition campaigns".into(),
                lead: "Priya Nair".into(),
                members: 4,
            },
        ],
    }
}

fn entities() -> Vec<Entity> {
    let entity = |id: &str, name: &str, kind: &str, location: &str, employees, status: &str| Entity {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        location: location.to_string(),
        employees,
        status: status.to_string(),
    };
    vec![
        entity("E001", "Muvon Sdn Bhd", "Headquarters", "Kuala Lumpur, MY", 42, "active"),
        entity("E002", "Muvon Pte Ltd", "Subsidiary", "Singapore, SG", 11, "active"),
        entity("E003", "Muvon Labs", "Branch", "Penang, MY", 0, "planned"),
    ]
}

fn users() -> Vec<UserRecord> {
    vec![UserRecord::new("azril", "muvon123", Role::Admin)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, load};

    #[tokio::test]
    async fn seeds_every_missing_collection() {
        let store = MemoryStore::new();
        let seeded = seed_missing(&store).await.unwrap();
        assert_eq!(seeded, RecordKind::ALL.to_vec());

        let staff: Vec<StaffRecord> = load(&store, RecordKind::Onboarding).await.unwrap();
        let s001 = staff.iter().find(|s| s.id == "S001").unwrap();
        assert!(!s001.task(2).unwrap().completed);

        let uploads: Vec<UploadRecord> = load(&store, RecordKind::Uploads).await.unwrap();
        assert!(uploads.is_empty());
    }

    #[tokio::test]
    async fn never_overwrites_existing_collections() {
        let store = MemoryStore::new();
        save::<ContractorRecord>(&store, RecordKind::Contracts, &[]).await.unwrap();

        let seeded = seed_missing(&store).await.unwrap();
        assert!(!seeded.contains(&RecordKind::Contracts));

        let contracts: Vec<ContractorRecord> = load(&store, RecordKind::Contracts).await.unwrap();
        assert!(contracts.is_empty());

        assert!(seed_missing(&store).await.unwrap().is_empty());
    }

    #[test]
    fn sample_ids_are_unique() {
        let mut ids: Vec<_> = onboarding().into_iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        let resources = resources();
        assert!(resources.iter().all(|r| !r.allowed_roles.is_empty()));
        assert!(resources.iter().all(|r| !r.file_type.is_empty()));
    }
}
