use std::collections::BTreeMap;

use bson::{Bson, Document};

use crate::query::Query;

/// An in-memory stand-in for a MongoDB collection, covering the subset of the
/// driver API the application actually issues. Bodies are stored without their
/// identifier; `_id` is materialized on every read.
///
/// There is no locking here. The collection is owned by the [`Backend`]
/// (single writer); a concurrent adaptation must wrap it in its own
/// synchronization.
///
/// [`Backend`]: crate::Backend
#[derive(Debug, Clone, Default)]
pub struct Collection {
    name: String,
    docs: BTreeMap<String, Document>,
}

/// Outcome of an insert, mirroring the driver's `InsertOneResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    pub inserted_id: String,
}

/// Outcome of a push/pull, mirroring the driver's `UpdateResult`.
/// `modified_count` is 1 only when the stored document actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub modified_count: u64,
}

impl UpdateResult {
    fn noop() -> UpdateResult {
        UpdateResult { modified_count: 0 }
    }

    fn modified() -> UpdateResult {
        UpdateResult { modified_count: 1 }
    }
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Collection {
        Collection {
            name: name.into(),
            docs: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of documents matching `query`; an empty query counts everything.
    pub fn count_documents(&self, query: &Query) -> usize {
        if query.is_empty() {
            return self.docs.len();
        }
        self.docs
            .iter()
            .filter(|(id, body)| query.matches(&materialize(id, body)))
            .count()
    }

    /// Exact-key lookup. A miss is `None`, never an error.
    pub fn find_one(&self, id: &str) -> Option<Document> {
        self.docs.get(id).map(|body| materialize(id, body))
    }

    /// Snapshot of every document matching `query`, in ascending key order.
    /// Callers must not rely on ordering beyond it being deterministic for a
    /// given store state.
    pub fn find(&self, query: &Query) -> Vec<Document> {
        self.docs
            .iter()
            .map(|(id, body)| materialize(id, body))
            .filter(|doc| query.matches(doc))
            .collect()
    }

    /// Stores `body` under `id`, overwriting any previous value. A stray
    /// `_id` inside the body is dropped; the key is the single source of
    /// identity.
    pub fn insert_one(&mut self, id: impl Into<String>, mut body: Document) -> InsertResult {
        let id = id.into();
        body.remove("_id");
        tracing::debug!("inserting '{}' into collection '{}'", id, self.name);
        self.docs.insert(id.clone(), body);
        InsertResult { inserted_id: id }
    }

    /// Appends `value` to the array at `field`, creating the field as a
    /// one-element array when absent. No-op when `id` is unknown or the field
    /// holds a non-array.
    pub fn push(&mut self, id: &str, field: &str, value: impl Into<Bson>) -> UpdateResult {
        let doc = match self.docs.get_mut(id) {
            Some(doc) => doc,
            None => return UpdateResult::noop(),
        };

        match doc.get_mut(field) {
            Some(Bson::Array(items)) => {
                items.push(value.into());
                UpdateResult::modified()
            }
            Some(_) => UpdateResult::noop(),
            None => {
                doc.insert(field, vec![value.into()]);
                UpdateResult::modified()
            }
        }
    }

    /// Removes the first occurrence of `value` from the array at `field`.
    /// Reports zero modifications when the id, field, or value is missing;
    /// a drained array stays behind as an empty array.
    pub fn pull(&mut self, id: &str, field: &str, value: &Bson) -> UpdateResult {
        let items = match self.docs.get_mut(id).and_then(|doc| doc.get_mut(field)) {
            Some(Bson::Array(items)) => items,
            _ => return UpdateResult::noop(),
        };

        match items.iter().position(|item| item == value) {
            Some(index) => {
                items.remove(index);
                UpdateResult::modified()
            }
            None => UpdateResult::noop(),
        }
    }

    /// Distinct string values found in the array at the (possibly dotted)
    /// `path`, across every document; deduplicated and sorted ascending.
    /// This is the one aggregation shape the application uses
    /// (`schedule_details.days`), not a general pipeline.
    pub fn distinct(&self, path: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .docs
            .values()
            .filter_map(|body| resolve_array(body, path))
            .flatten()
            .filter_map(Bson::as_str)
            .map(str::to_string)
            .collect();
        values.sort();
        values.dedup();
        values
    }
}

fn materialize(id: &str, body: &Document) -> Document {
    let mut doc = Document::new();
    doc.insert("_id", id);
    doc.extend(body.clone());
    doc
}

fn resolve_array<'a>(doc: &'a Document, path: &str) -> Option<&'a Vec<Bson>> {
    let mut segments = path.split('.');
    let mut value = doc.get(segments.next()?)?;
    for segment in segments {
        value = value.as_document()?.get(segment)?;
    }
    value.as_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Condition, Query};
    use bson::doc;

    fn activity(days: &[&str]) -> Document {
        doc! {
            "description": "test activity",
            "schedule_details": {
                "days": days.iter().map(|d| Bson::String(d.to_string())).collect::<Vec<_>>(),
                "start_time": "15:00",
                "end_time": "16:00",
            },
            "max_participants": 10,
            "participants": [],
        }
    }

    #[test]
    fn find_one_returns_body_with_id_attached() {
        let mut col = Collection::new("activities");
        let body = activity(&["Monday"]);
        col.insert_one("Chess Club", body.clone());

        let found = col.find_one("Chess Club").expect("just inserted");
        assert_eq!(found.get_str("_id").unwrap(), "Chess Club");

        let mut expected = doc! { "_id": "Chess Club" };
        expected.extend(body);
        assert_eq!(found, expected);

        assert!(col.find_one("Knitting Circle").is_none());
    }

    #[test]
    fn reinsertion_overwrites_without_changing_count() {
        let mut col = Collection::new("activities");
        col.insert_one("Chess Club", activity(&["Monday"]));
        col.insert_one("Chess Club", activity(&["Tuesday"]));

        assert_eq!(col.len(), 1);
        let found = col.find_one("Chess Club").unwrap();
        let details = found.get_document("schedule_details").unwrap();
        assert_eq!(details.get_array("days").unwrap(), &[Bson::String("Tuesday".into())]);
    }

    #[test]
    fn insert_strips_stray_id_from_body() {
        let mut col = Collection::new("teachers");
        let result = col.insert_one("mchen", doc! { "_id": "bogus", "display_name": "Mr. Chen" });
        assert_eq!(result.inserted_id, "mchen");

        let found = col.find_one("mchen").unwrap();
        assert_eq!(found.get_str("_id").unwrap(), "mchen");
    }

    #[test]
    fn push_then_pull_round_trips_to_empty_array() {
        let mut col = Collection::new("activities");
        col.insert_one("Chess Club", doc! { "description": "chess" });

        let pushed = col.push("Chess Club", "participants", "x@mergington.edu");
        assert_eq!(pushed.modified_count, 1);

        let pulled = col.pull(
            "Chess Club",
            "participants",
            &Bson::String("x@mergington.edu".into()),
        );
        assert_eq!(pulled.modified_count, 1);

        // The field key survives as an empty array rather than disappearing.
        let found = col.find_one("Chess Club").unwrap();
        assert_eq!(found.get_array("participants").unwrap().len(), 0);
    }

    #[test]
    fn pull_removes_only_the_first_occurrence() {
        let mut col = Collection::new("activities");
        col.insert_one("Chess Club", doc! { "participants": ["a", "b", "a"] });

        col.pull("Chess Club", "participants", &Bson::String("a".into()));

        let found = col.find_one("Chess Club").unwrap();
        assert_eq!(
            found.get_array("participants").unwrap(),
            &[Bson::String("b".into()), Bson::String("a".into())]
        );
    }

    #[test]
    fn updates_against_missing_targets_modify_nothing() {
        let mut col = Collection::new("activities");
        col.insert_one("Chess Club", activity(&["Monday"]));
        let before = col.find(&Query::new());

        assert_eq!(col.push("Ghost Club", "participants", "x@y.edu").modified_count, 0);
        assert_eq!(
            col.pull("Ghost Club", "participants", &Bson::String("x@y.edu".into()))
                .modified_count,
            0
        );
        assert_eq!(
            col.pull("Chess Club", "participants", &Bson::String("nobody@y.edu".into()))
                .modified_count,
            0
        );
        assert_eq!(
            col.pull("Chess Club", "description", &Bson::String("test activity".into()))
                .modified_count,
            0
        );

        assert_eq!(col.find(&Query::new()), before);
    }

    #[test]
    fn push_creates_missing_field_and_skips_non_arrays() {
        let mut col = Collection::new("activities");
        col.insert_one("Chess Club", doc! { "description": "chess" });

        assert_eq!(col.push("Chess Club", "participants", "a@y.edu").modified_count, 1);
        assert_eq!(col.push("Chess Club", "description", "b@y.edu").modified_count, 0);

        let found = col.find_one("Chess Club").unwrap();
        assert_eq!(
            found.get_array("participants").unwrap(),
            &[Bson::String("a@y.edu".into())]
        );
    }

    #[test]
    fn count_documents_honors_the_query() {
        let mut col = Collection::new("activities");
        col.insert_one("Chess Club", activity(&["Monday", "Friday"]));
        col.insert_one("Art Club", activity(&["Thursday"]));

        assert_eq!(col.count_documents(&Query::new()), 2);

        let q = Query::new().field(
            "schedule_details.days",
            Condition::In(vec![Bson::String("Friday".into())]),
        );
        assert_eq!(col.count_documents(&q), 1);
    }

    #[test]
    fn distinct_flattens_sorts_and_dedups() {
        let mut col = Collection::new("activities");
        col.insert_one("A", activity(&["Monday", "Friday"]));
        col.insert_one("B", activity(&["Tuesday", "Thursday"]));
        col.insert_one("C", activity(&["Monday"]));

        assert_eq!(
            col.distinct("schedule_details.days"),
            vec!["Friday", "Monday", "Thursday", "Tuesday"]
        );
    }

    #[test]
    fn distinct_skips_documents_without_the_path() {
        let mut col = Collection::new("activities");
        col.insert_one("A", activity(&["Sunday"]));
        col.insert_one("B", doc! { "description": "no schedule yet" });

        assert_eq!(col.distinct("schedule_details.days"), vec!["Sunday"]);
    }

    #[test]
    fn find_scans_in_deterministic_key_order() {
        let mut col = Collection::new("activities");
        col.insert_one("Soccer Team", activity(&["Tuesday"]));
        col.insert_one("Art Club", activity(&["Thursday"]));

        let ids: Vec<String> = col
            .find(&Query::new())
            .iter()
            .map(|doc| doc.get_str("_id").unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["Art Club", "Soccer Team"]);
    }
}
