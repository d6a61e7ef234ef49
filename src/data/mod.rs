pub mod activity;
pub mod filter;
pub mod teacher;

pub static ACTIVITY_COLLECTION_NAME: &str = "activities";
pub static TEACHER_COLLECTION_NAME: &str = "teachers";
