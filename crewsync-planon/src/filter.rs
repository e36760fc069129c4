//! Field predicates for datastore queries.
//!
//! Serialized in Planon's wire form:
//!
//! ```json
//! {"filter": {"FreeString7": {"exists": true}, "IsArchived": {"eq": false}}}
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// One field predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    /// Field equals the value.
    Eq(Value),
    /// Field is present and non-null (`true`) or absent/null (`false`).
    Exists(bool),
}

impl Predicate {
    fn matches(&self, field: Option<&Value>) -> bool {
        let present = field.filter(|v| !v.is_null());
        match self {
            Predicate::Eq(expected) => match present {
                Some(actual) => actual == expected,
                // An absent boolean flag reads as false in Planon.
                None => expected == &Value::Bool(false) || expected.is_null(),
            },
            Predicate::Exists(should_exist) => present.is_some() == *should_exist,
        }
    }
}

/// A conjunction of field predicates. The empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Filter {
    filter: BTreeMap<String, Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter.insert(field.to_owned(), Predicate::Eq(value.into()));
        self
    }

    pub fn exists(mut self, field: &str, should_exist: bool) -> Self {
        self.filter
            .insert(field.to_owned(), Predicate::Exists(should_exist));
        self
    }

    /// Non-archived records only.
    pub fn active() -> Self {
        Self::new().eq("IsArchived", false)
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
    }

    /// Evaluate against a record in its wire (JSON object) form.
    pub fn matches(&self, record: &Value) -> bool {
        self.filter
            .iter()
            .all(|(field, predicate)| predicate.matches(record.get(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_planon_filter_body() {
        let filter = Filter::active().exists("FreeString7", true);
        assert_eq!(
            serde_json::to_value(&filter).expect("serialize"),
            json!({"filter": {"FreeString7": {"exists": true}, "IsArchived": {"eq": false}}})
        );
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&json!({"Syscode": 1})));
    }

    #[test]
    fn eq_and_exists_are_conjunctive() {
        let filter = Filter::active().exists("FreeString7", true);
        assert!(filter.matches(&json!({"FreeString7": "d20171b", "IsArchived": false})));
        assert!(!filter.matches(&json!({"FreeString7": "d20171b", "IsArchived": true})));
        assert!(!filter.matches(&json!({"FreeString7": null, "IsArchived": false})));
        assert!(!filter.matches(&json!({"IsArchived": false})));
    }

    #[test]
    fn missing_archive_flag_counts_as_not_archived() {
        assert!(Filter::active().matches(&json!({"Syscode": 3})));
    }

    #[test]
    fn exists_false_matches_absent_and_null() {
        let filter = Filter::new().exists("TradeRef", false);
        assert!(filter.matches(&json!({})));
        assert!(filter.matches(&json!({"TradeRef": null})));
        assert!(!filter.matches(&json!({"TradeRef": 117})));
    }
}
