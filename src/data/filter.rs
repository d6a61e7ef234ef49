//! Prebuilt queries for the filters the application layer issues against the
//! activities collection.

use bson::Bson;

use crate::query::{Condition, Query};

#[inline]
pub fn on_days(days: &[&str]) -> Query {
    Query::new().field(
        "schedule_details.days",
        Condition::In(days.iter().map(|d| Bson::String(d.to_string())).collect()),
    )
}

#[inline]
pub fn starting_at_or_after(time: impl ToString) -> Query {
    Query::new().field(
        "schedule_details.start_time",
        Condition::Gte(Bson::String(time.to_string())),
    )
}

#[inline]
pub fn ending_by(time: impl ToString) -> Query {
    Query::new().field(
        "schedule_details.end_time",
        Condition::Lte(Bson::String(time.to_string())),
    )
}

/// Day and time conditions combine in a single query; the filters are a plain
/// conjunction.
#[inline]
pub fn scheduled_within(days: &[&str], start: impl ToString, end: impl ToString) -> Query {
    Query::new()
        .field(
            "schedule_details.days",
            Condition::In(days.iter().map(|d| Bson::String(d.to_string())).collect()),
        )
        .field(
            "schedule_details.start_time",
            Condition::Gte(Bson::String(start.to_string())),
        )
        .field(
            "schedule_details.end_time",
            Condition::Lte(Bson::String(end.to_string())),
        )
}

#[inline]
pub fn has_difficulty(stated: bool) -> Query {
    Query::new().field("difficulty", Condition::Exists(stated))
}

#[inline]
pub fn by_difficulty(level: impl ToString) -> Query {
    Query::new().field("difficulty", Condition::Eq(Bson::String(level.to_string())))
}
