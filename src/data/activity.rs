use bson::Document;

/// Structured schedule used by the day/time filters, alongside the
/// human-readable `schedule` string shown to students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDetails {
    pub days: Vec<String>,
    /// "HH:MM", 24-hour.
    pub start_time: String,
    pub end_time: String,
}

/// An extracurricular activity. The activity name is the document identifier
/// and lives outside the body; it comes back as `_id` on reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub schedule_details: ScheduleDetails,
    /// Absent for activities without a stated skill grade; the field is
    /// omitted from the stored document entirely so `$exists` filters work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    pub max_participants: i32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl ToString,
        schedule: impl ToString,
        days: &[&str],
        start_time: impl ToString,
        end_time: impl ToString,
        max_participants: i32,
    ) -> Activity {
        Activity {
            description: description.to_string(),
            schedule: schedule.to_string(),
            schedule_details: ScheduleDetails {
                days: days.iter().map(|d| d.to_string()).collect(),
                start_time: start_time.to_string(),
                end_time: end_time.to_string(),
            },
            difficulty: None,
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: impl ToString) -> Activity {
        self.difficulty = Some(difficulty.to_string());
        self
    }

    pub fn with_participants(mut self, participants: &[&str]) -> Activity {
        self.participants = participants.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Signup capacity policy lives with the caller; the store itself appends
    /// unconditionally.
    pub fn has_capacity(&self) -> bool {
        (self.participants.len() as i32) < self.max_participants
    }

    pub fn from_document(doc: Document) -> Result<Activity, bson::de::Error> {
        bson::from_document(doc)
    }
}
