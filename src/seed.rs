//! Baseline dataset and the idempotent startup population protocol.

use bson::Document;

use crate::data::activity::Activity;
use crate::data::teacher::TeacherAccount;
use crate::error::BackendError;
use crate::role::Role;
use crate::store::Collection;
use crate::Backend;

/// Populates both collections with the baseline dataset, once. Collections
/// that already hold documents are left untouched, so calling this again
/// (e.g. on a warm restart in a persistent variant) changes nothing.
pub fn init(backend: &mut Backend) -> Result<(), BackendError> {
    if backend.activities.is_empty() {
        let mut dataset = Vec::new();
        for (name, activity) in baseline_activities() {
            dataset.push((name, bson::to_document(&activity)?));
        }
        seed_documents(&mut backend.activities, dataset);
    }

    if backend.teachers.is_empty() {
        let mut dataset = Vec::new();
        for account in baseline_teachers(&backend.config.admin_usernames) {
            dataset.push((account.username.clone(), bson::to_document(&account)?));
        }
        seed_documents(&mut backend.teachers, dataset);
    }

    Ok(())
}

/// Inserts every dataset entry keyed by its natural identifier, provided the
/// collection is still empty.
pub fn seed_documents(store: &mut Collection, dataset: Vec<(String, Document)>) {
    if !store.is_empty() {
        tracing::debug!("Collection '{}' already populated; not seeding.", store.name());
        return;
    }

    tracing::info!("Seeding {} documents into '{}'...", dataset.len(), store.name());
    for (id, body) in dataset {
        store.insert_one(id, body);
    }
}

pub fn baseline_activities() -> Vec<(String, Activity)> {
    let activities = vec![
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Mondays and Fridays, 3:15 PM - 4:45 PM",
                &["Monday", "Friday"],
                "15:15",
                "16:45",
                12,
            )
            .with_difficulty("Beginner")
            .with_participants(&["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 7:00 AM - 8:00 AM",
                &["Tuesday", "Thursday"],
                "07:00",
                "08:00",
                20,
            )
            .with_difficulty("Intermediate")
            .with_participants(&["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Morning Fitness",
            Activity::new(
                "Early morning physical training and exercises",
                "Mondays, Wednesdays, Fridays, 6:30 AM - 7:45 AM",
                &["Monday", "Wednesday", "Friday"],
                "06:30",
                "07:45",
                30,
            )
            .with_participants(&["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Soccer Team",
            Activity::new(
                "Join the school soccer team and compete in matches",
                "Tuesdays and Thursdays, 3:30 PM - 5:30 PM",
                &["Tuesday", "Thursday"],
                "15:30",
                "17:30",
                22,
            )
            .with_participants(&["liam@mergington.edu", "noah@mergington.edu"]),
        ),
        (
            "Basketball Team",
            Activity::new(
                "Practice and compete in basketball tournaments",
                "Wednesdays and Fridays, 3:15 PM - 5:00 PM",
                &["Wednesday", "Friday"],
                "15:15",
                "17:00",
                15,
            )
            .with_participants(&["ava@mergington.edu", "mia@mergington.edu"]),
        ),
        (
            "Art Club",
            Activity::new(
                "Explore various art techniques and create masterpieces",
                "Thursdays, 3:15 PM - 5:00 PM",
                &["Thursday"],
                "15:15",
                "17:00",
                15,
            )
            .with_participants(&["amelia@mergington.edu", "harper@mergington.edu"]),
        ),
        (
            "Drama Club",
            Activity::new(
                "Act, direct, and produce plays and performances",
                "Mondays and Wednesdays, 3:30 PM - 5:30 PM",
                &["Monday", "Wednesday"],
                "15:30",
                "17:30",
                20,
            )
            .with_participants(&["ella@mergington.edu", "scarlett@mergington.edu"]),
        ),
        (
            "Math Club",
            Activity::new(
                "Solve challenging problems and prepare for math competitions",
                "Tuesdays, 7:15 AM - 8:00 AM",
                &["Tuesday"],
                "07:15",
                "08:00",
                10,
            )
            .with_difficulty("Advanced")
            .with_participants(&["james@mergington.edu", "benjamin@mergington.edu"]),
        ),
        (
            "Debate Team",
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 3:30 PM - 5:30 PM",
                &["Friday"],
                "15:30",
                "17:30",
                12,
            )
            .with_participants(&["charlotte@mergington.edu", "amelia@mergington.edu"]),
        ),
        (
            "Weekend Robotics Workshop",
            Activity::new(
                "Build and program robots in our state-of-the-art workshop",
                "Saturdays, 10:00 AM - 2:00 PM",
                &["Saturday"],
                "10:00",
                "14:00",
                15,
            )
            .with_participants(&["ethan@mergington.edu", "oliver@mergington.edu"]),
        ),
        (
            "Science Olympiad",
            Activity::new(
                "Weekend science competition preparation for regional and state events",
                "Saturdays, 1:00 PM - 4:00 PM",
                &["Saturday"],
                "13:00",
                "16:00",
                18,
            )
            .with_difficulty("Advanced")
            .with_participants(&["isabella@mergington.edu", "lucas@mergington.edu"]),
        ),
        (
            "Sunday Chess Tournament",
            Activity::new(
                "Weekly tournament for serious chess players with rankings",
                "Sundays, 2:00 PM - 5:00 PM",
                &["Sunday"],
                "14:00",
                "17:00",
                16,
            )
            .with_difficulty("Advanced")
            .with_participants(&["william@mergington.edu", "jacob@mergington.edu"]),
        ),
        (
            "Manga Maniacs",
            Activity::new(
                "Explore the fantastic stories of the most interesting characters from \
                 Japanese Manga (graphic novels).",
                "Tuesdays at 7:00 PM",
                &["Tuesday"],
                "19:00",
                "20:00",
                15,
            ),
        ),
    ];

    activities
        .into_iter()
        .map(|(name, activity)| (name.to_string(), activity))
        .collect()
}

/// The baseline accounts. Passwords go through the hashing collaborator
/// inside [`TeacherAccount::new`]; usernames on the admin list are granted
/// the admin role.
pub fn baseline_teachers(admin_usernames: &[String]) -> Vec<TeacherAccount> {
    [
        ("mrodriguez", "Ms. Rodriguez", "art123"),
        ("mchen", "Mr. Chen", "chess456"),
        ("principal", "Principal Martinez", "admin789"),
    ]
    .iter()
    .map(|(username, display_name, password)| {
        let role = if admin_usernames.contains(&username.to_string()) {
            Role::Admin
        } else {
            Role::Teacher
        };
        TeacherAccount::new(*username, *display_name, password, role)
    })
    .collect()
}
